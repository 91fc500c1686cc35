//! [`Decimal`] carries a money-like decimal exactly as the API sent it.
//!
//! Prices such as a meter's `price_per_unit` may need more precision than a
//! binary float holds, so the wire text is kept verbatim and never parsed into
//! `f64`.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    core::{Strictness, Validate},
    errors::Error,
};

/// An exact decimal number, serialized as a JSON string.
///
/// ```
/// use dodopayments_kit::types::Decimal;
///
/// let price: Decimal = serde_json::from_value(serde_json::json!("0.000001234567890123")).unwrap();
/// assert_eq!(price.as_str(), "0.000001234567890123");
/// assert_eq!(serde_json::to_value(&price).unwrap(), serde_json::json!("0.000001234567890123"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    all_digits(int) && frac.is_none_or(all_digits)
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_decimal(s) {
            Ok(Decimal(s.to_string()))
        } else {
            Err(Error::invalid_data(format!("{s:?} is not a decimal number")))
        }
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal(value.to_string())
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(value.to_string())
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Validate for Decimal {
    fn check(&self, _strictness: Strictness) -> crate::errors::Result<()> {
        Ok(())
    }
}
