//! The seam between generated endpoints and whatever sends HTTP requests.
//!
//! Endpoints only describe a request ([`ApiRequest`]); a [`Transport`] carries
//! it. Retries, auth refresh and connection handling all live behind that trait.

use http::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    errors::{Error, Result},
    types::AnyJson,
};

/// A transport-agnostic description of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Unencoded path segments; the transport percent-encodes each one.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<AnyJson>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ApiRequest {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I: IntoIterator<Item = S>, S: Into<String>>(segments: I) -> Self {
        Self::new(Method::GET, segments)
    }

    pub fn post<I: IntoIterator<Item = S>, S: Into<String>>(segments: I) -> Self {
        Self::new(Method::POST, segments)
    }

    pub fn patch<I: IntoIterator<Item = S>, S: Into<String>>(segments: I) -> Self {
        Self::new(Method::PATCH, segments)
    }

    pub fn delete<I: IntoIterator<Item = S>, S: Into<String>>(segments: I) -> Self {
        Self::new(Method::DELETE, segments)
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends a query parameter if `value` is set.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Sets the JSON body.
    pub fn json(mut self, body: impl Serialize) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(Error::invalid_data)?);
        Ok(self)
    }

    /// The slash-joined path, for display and logging.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// A generated API operation: how to build its request and what it returns.
pub trait Endpoint {
    /// Response type, decoded lazily from the response body.
    type Response: DeserializeOwned;

    fn request(&self) -> Result<ApiRequest>;
}

/// Sends [`ApiRequest`]s and returns the decoded JSON body.
///
/// Implementations report an empty body as JSON `null`.
pub trait Transport {
    type Error: Into<Error>;

    fn send(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = std::result::Result<AnyJson, Self::Error>>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn builds_path_query_and_body() {
        let request = ApiRequest::post(["refunds"])
            .query("page_size", 10)
            .query_opt("status", None::<&str>)
            .query_opt("customer_id", Some("cus_1"))
            .json(json!({ "payment_id": "pay_1" }))
            .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/refunds");
        assert_eq!(
            request.query,
            [
                ("page_size".to_string(), "10".to_string()),
                ("customer_id".to_string(), "cus_1".to_string()),
            ]
        );
        assert_eq!(request.body, Some(json!({ "payment_id": "pay_1" })));
    }

    #[test]
    fn segments_are_kept_unencoded() {
        let request = ApiRequest::get(["subscriptions", "sub/1"]);
        assert_eq!(request.segments, ["subscriptions", "sub/1"]);
        assert_eq!(request.path(), "/subscriptions/sub/1");
        assert!(request.body.is_none());
    }
}
