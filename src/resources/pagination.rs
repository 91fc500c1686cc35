//! Paged list responses and their query parameters.

use std::marker::PhantomData;

use bon::Builder;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    core::{Strictness, Validate},
    errors::Result,
    model::{JsonModel, RawData},
    transport::ApiRequest,
};

/// Page selection shared by every list endpoint.
#[derive(Builder, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Page size, defaults to the server's choice when unset.
    pub page_size: Option<u32>,
    /// Zero-based page number.
    pub page_number: Option<u32>,
}

impl ListParams {
    /// Adds `page_size` / `page_number` to `request` when set.
    pub fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("page_size", self.page_size)
            .query_opt("page_number", self.page_number)
    }

    /// Parameters for the page after this one.
    pub fn next(&self) -> Self {
        ListParams {
            page_size: self.page_size,
            page_number: Some(self.page_number.unwrap_or(0).saturating_add(1)),
        }
    }
}

/// One page of a list response: `{"items": [...]}` plus whatever else the server sends.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Page<T> {
    raw: RawData,
    #[serde(skip)]
    _item: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Page<T> {
    pub fn items(&self) -> Result<Vec<T>> {
        self.raw.get("items")
    }

    /// `true` when the page has no items (or the items field is missing).
    pub fn is_empty(&self) -> bool {
        self.raw
            .field("items")
            .and_then(|items| items.as_array())
            .is_none_or(|items| items.is_empty())
    }
}

impl<T> Clone for Page<T> {
    fn clone(&self) -> Self {
        Page {
            raw: self.raw.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> PartialEq for Page<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> std::fmt::Debug for Page<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Page").field(&self.raw).finish()
    }
}

impl<T: DeserializeOwned + Validate> Validate for Page<T> {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.items()?.check(strictness)
    }
}

impl<T: DeserializeOwned + Validate> JsonModel for Page<T> {
    fn raw(&self) -> &RawData {
        &self.raw
    }

    fn raw_mut(&mut self) -> &mut RawData {
        &mut self.raw
    }

    fn from_raw(raw: RawData) -> Self {
        Page {
            raw,
            _item: PhantomData,
        }
    }
}
