//! Raw-JSON-backed models.
//!
//! Every generated request, response and nested object stores its fields in a
//! [`RawData`]: an insertion-ordered map from field name to raw JSON value. Typed
//! accessors decode from that map on every read and encode into it on every
//! write, so unknown fields, explicit `null`s and not-yet-recognized values all
//! survive a decode / encode round trip untouched.
//!
//! ```
//! use dodopayments_kit::model::RawData;
//!
//! let mut raw = RawData::new();
//! raw.set("quantity", 2i64).unwrap();
//! raw.set("addon_id", None::<String>).unwrap();
//!
//! assert_eq!(raw.get::<i64>("quantity").unwrap(), 2);
//! // Explicit null is stored, not dropped.
//! assert!(raw.contains_key("addon_id"));
//! assert_eq!(raw.get_optional::<String>("addon_id").unwrap(), None);
//! // Absent is a different state from null.
//! assert!(!raw.contains_key("description"));
//! ```

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    core::Validate,
    errors::{Error, Result},
    types::{AnyJson, JsonObject},
};

/// The backing store of a raw-JSON model.
///
/// Equality compares keys and values and ignores insertion order. Cloning copies
/// the map, so a clone never observes writes made to its source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawData(JsonObject);

impl RawData {
    pub fn new() -> Self {
        RawData(JsonObject::new())
    }

    /// Decodes a required field.
    ///
    /// Fails with [`Error::MissingRequiredField`] if the key is absent and with
    /// [`Error::InvalidData`] if the stored value (including `null`) does not
    /// decode into `T`.
    pub fn get<T: DeserializeOwned>(&self, field: &str) -> Result<T> {
        let value = self.0.get(field).ok_or_else(|| Error::MissingRequiredField {
            field: field.to_string(),
        })?;
        decode_field(field, value)
    }

    /// Decodes an optional field.
    ///
    /// Both an absent key and an explicit `null` read as `None`; use
    /// [`RawData::contains_key`] to tell them apart.
    pub fn get_optional<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>> {
        match self.0.get(field) {
            None | Some(AnyJson::Null) => Ok(None),
            Some(value) => decode_field(field, value).map(Some),
        }
    }

    /// Encodes `value` and stores it under `field`, replacing any prior entry.
    ///
    /// A value that encodes to `null` (such as `None`) is stored as an explicit
    /// `null`; the key is never removed.
    pub fn set<T: Serialize>(&mut self, field: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|err| Error::invalid_field(field, err))?;
        self.0.insert(field.to_string(), value);
        Ok(())
    }

    /// Like [`RawData::set`], but `None` removes the key instead of storing `null`.
    ///
    /// Used by fields where the API defines a null assignment as "omit".
    pub fn set_or_remove<T: Serialize>(&mut self, field: &str, value: Option<T>) -> Result<()> {
        match value {
            Some(value) => self.set(field, value),
            None => {
                self.0.shift_remove(field);
                Ok(())
            }
        }
    }

    /// Stores an already-encoded value.
    pub fn set_raw(&mut self, field: impl Into<String>, value: AnyJson) {
        self.0.insert(field.into(), value);
    }

    /// Removes `field`, returning its raw value if it was present.
    pub fn remove(&mut self, field: &str) -> Option<AnyJson> {
        self.0.shift_remove(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the raw, undecoded value stored under `field`.
    pub fn field(&self, field: &str) -> Option<&AnyJson> {
        self.0.get(field)
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &JsonObject {
        &self.0
    }

    pub fn into_map(self) -> JsonObject {
        self.0
    }
}

fn decode_field<T: DeserializeOwned>(field: &str, value: &AnyJson) -> Result<T> {
    T::deserialize(value).map_err(|err| Error::invalid_field(field, err))
}

impl From<JsonObject> for RawData {
    fn from(map: JsonObject) -> Self {
        RawData(map)
    }
}

impl From<RawData> for AnyJson {
    fn from(raw: RawData) -> Self {
        AnyJson::Object(raw.0)
    }
}

impl TryFrom<AnyJson> for RawData {
    type Error = Error;

    fn try_from(value: AnyJson) -> Result<Self> {
        match value {
            AnyJson::Object(map) => Ok(RawData(map)),
            other => Err(Error::invalid_data(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<'a> IntoIterator for &'a RawData {
    type Item = (&'a String, &'a AnyJson);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub(crate) fn json_kind(value: &AnyJson) -> &'static str {
    match value {
        AnyJson::Null => "null",
        AnyJson::Bool(_) => "a boolean",
        AnyJson::Number(_) => "a number",
        AnyJson::String(_) => "a string",
        AnyJson::Array(_) => "an array",
        AnyJson::Object(_) => "an object",
    }
}

/// A generated type whose state lives entirely in a [`RawData`].
pub trait JsonModel: Sized + Validate {
    fn raw(&self) -> &RawData;

    fn raw_mut(&mut self) -> &mut RawData;

    /// Wraps `raw` without checking any field.
    fn from_raw(raw: RawData) -> Self;

    fn to_json(&self) -> AnyJson {
        AnyJson::Object(self.raw().as_map().clone())
    }

    /// Wraps a JSON object. Only the top-level shape is checked; fields are
    /// decoded lazily.
    fn from_json(value: AnyJson) -> Result<Self> {
        RawData::try_from(value).map(Self::from_raw)
    }

    fn from_json_str(s: &str) -> Result<Self> {
        let value: AnyJson = serde_json::from_str(s)?;
        Self::from_json(value)
    }

    fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self.raw())?)
    }
}

/// Declares a raw-JSON-backed model.
///
/// The generated struct serializes transparently as its field map, compares by
/// map contents and implements [`JsonModel`]. Typed accessors and
/// [`Validate`] are written next to each declaration.
macro_rules! raw_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name {
            raw: $crate::model::RawData,
        }

        impl $crate::model::JsonModel for $name {
            fn raw(&self) -> &$crate::model::RawData {
                &self.raw
            }

            fn raw_mut(&mut self) -> &mut $crate::model::RawData {
                &mut self.raw
            }

            fn from_raw(raw: $crate::model::RawData) -> Self {
                Self { raw }
            }
        }

        impl From<$crate::model::RawData> for $name {
            fn from(raw: $crate::model::RawData) -> Self {
                Self { raw }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let json = ::serde_json::to_string(&self.raw).map_err(|_| ::std::fmt::Error)?;
                f.write_str(&json)
            }
        }
    };
}

pub(crate) use raw_model;
