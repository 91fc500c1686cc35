//! Error types surfaced by the models, codecs and transport seam.

use std::fmt::Display;

use crate::types::AnyJson;

/// Error types for Dodo Payments client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required property was read but its key is absent from the raw map.
    #[error("Missing required field `{field}`")]
    MissingRequiredField { field: String },

    /// A present value could not be decoded into the expected type.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// An open enum holds a raw value outside of its known constants.
    ///
    /// Only raised by [`ApiEnum::known`](crate::enums::ApiEnum::known) and validation,
    /// never while decoding.
    #[error("Unrecognized value {value:?} for {enum_name}")]
    UnrecognizedValue {
        enum_name: &'static str,
        value: String,
    },

    /// Every declared variant of a tagged union rejected the input.
    #[error("No variant of {union_name} matched: {failures}")]
    UnionDecodeFailed {
        union_name: &'static str,
        failures: VariantFailures,
    },

    /// JSON text could not be parsed at all.
    #[error("Serde JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// URL parsing errors.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// A required configuration value was not provided.
    #[error("Missing configuration: {name}")]
    MissingConfiguration { name: &'static str },

    /// A configuration value was provided but could not be used.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The API answered with a non-success status code.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: AnyJson },

    /// HTTP request errors.
    #[cfg(feature = "client")]
    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),
}

impl Error {
    /// Builds an [`Error::InvalidData`] for a value stored under `field`.
    pub fn invalid_field(field: &str, reason: impl Display) -> Self {
        Error::InvalidData {
            message: format!("field `{field}`: {reason}"),
        }
    }

    /// Builds an [`Error::InvalidData`] without field context.
    pub fn invalid_data(reason: impl Display) -> Self {
        Error::InvalidData {
            message: reason.to_string(),
        }
    }

    pub fn is_missing_required_field(&self) -> bool {
        matches!(self, Error::MissingRequiredField { .. })
    }

    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Error::InvalidData { .. })
    }

    pub fn is_unrecognized_value(&self) -> bool {
        matches!(self, Error::UnrecognizedValue { .. })
    }

    pub fn is_union_decode_failed(&self) -> bool {
        matches!(self, Error::UnionDecodeFailed { .. })
    }
}

/// Why a single union variant rejected its input.
#[derive(Debug)]
pub struct VariantFailure {
    /// The variant's declared name.
    pub variant: &'static str,
    /// The decode or validation error it produced.
    pub error: Box<Error>,
}

impl Display for VariantFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.variant, self.error)
    }
}

/// The per-variant failures collected by a union decode, in declared order.
#[derive(Debug, Default)]
pub struct VariantFailures(pub Vec<VariantFailure>);

impl VariantFailures {
    pub fn iter(&self) -> std::slice::Iter<'_, VariantFailure> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for VariantFailures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "[{failure}]")?;
        }
        Ok(())
    }
}

/// A specialized `Result` type for Dodo Payments client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_failure_lists_every_variant() {
        let err = Error::UnionDecodeFailed {
            union_name: "Price",
            failures: VariantFailures(vec![
                VariantFailure {
                    variant: "OneTime",
                    error: Box::new(Error::MissingRequiredField {
                        field: "price".into(),
                    }),
                },
                VariantFailure {
                    variant: "Recurring",
                    error: Box::new(Error::invalid_field("type", "expected a string")),
                },
            ]),
        };

        assert_eq!(
            err.to_string(),
            "No variant of Price matched: [OneTime: Missing required field `price`]; \
             [Recurring: Invalid data: field `type`: expected a string]"
        );
        assert!(err.is_union_decode_failed());
    }

    #[test]
    fn unrecognized_value_quotes_raw() {
        let err = Error::UnrecognizedValue {
            enum_name: "ProrationBillingMode",
            value: "invalid value".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unrecognized value \"invalid value\" for ProrationBillingMode"
        );
    }
}
