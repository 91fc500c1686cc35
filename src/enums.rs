//! Open ("extensible") string enums.
//!
//! The API adds enum members faster than clients ship, so an enum field is
//! stored as an [`ApiEnum`]: the raw wire string plus a statically known set of
//! named constants. Decoding always succeeds; recognizing the value is an
//! explicit step ([`ApiEnum::known`] or [`Validate::validate`]).
//!
//! ```
//! use dodopayments_kit::{core::Validate, enums::ApiEnum, resources::subscriptions::ProrationBillingMode};
//!
//! let mode: ApiEnum<ProrationBillingMode> = serde_json::from_value(serde_json::json!("full_immediately")).unwrap();
//! assert_eq!(mode.known().unwrap(), ProrationBillingMode::FullImmediately);
//!
//! let future: ApiEnum<ProrationBillingMode> = serde_json::from_value(serde_json::json!("next_cycle")).unwrap();
//! assert_eq!(future.raw(), "next_cycle");
//! assert!(future.validate().is_err());
//! assert_eq!(serde_json::to_value(&future).unwrap(), serde_json::json!("next_cycle"));
//! ```

use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Serialize};

use crate::{
    core::{Strictness, Validate},
    errors::{Error, Result},
};

/// The closed set of named constants an open enum recognizes.
pub trait KnownEnum: Copy + Eq + 'static {
    /// The enum's name, used in error messages.
    const NAME: &'static str;

    /// Every known constant, in declaration order.
    const VALUES: &'static [Self];

    /// The wire value of this constant.
    fn as_raw(&self) -> &'static str;

    /// Looks up the constant whose wire value is `raw`.
    fn from_raw(raw: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|value| value.as_raw() == raw)
    }
}

/// A raw enum value that may or may not be one of `K`'s known constants.
///
/// Equality and hashing use the raw string only, so a value built from a
/// constant equals the same value decoded from the wire.
pub struct ApiEnum<K> {
    raw: String,
    _known: PhantomData<fn() -> K>,
}

impl<K: KnownEnum> ApiEnum<K> {
    /// Wraps any raw value. Never fails.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        ApiEnum {
            raw: raw.into(),
            _known: PhantomData,
        }
    }

    /// The underlying wire value, verbatim.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Maps the raw value to a known constant.
    pub fn known(&self) -> Result<K> {
        K::from_raw(&self.raw).ok_or_else(|| Error::UnrecognizedValue {
            enum_name: K::NAME,
            value: self.raw.clone(),
        })
    }

    pub fn is_known(&self) -> bool {
        K::from_raw(&self.raw).is_some()
    }

    pub fn into_raw(self) -> String {
        self.raw
    }
}

impl<K: KnownEnum> From<K> for ApiEnum<K> {
    fn from(value: K) -> Self {
        ApiEnum::from_raw(value.as_raw())
    }
}

impl<K> Clone for ApiEnum<K> {
    fn clone(&self) -> Self {
        ApiEnum {
            raw: self.raw.clone(),
            _known: PhantomData,
        }
    }
}

impl<K> PartialEq for ApiEnum<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K> Eq for ApiEnum<K> {}

impl<K: KnownEnum> PartialEq<K> for ApiEnum<K> {
    fn eq(&self, other: &K) -> bool {
        self.raw == other.as_raw()
    }
}

impl<K> Hash for ApiEnum<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K: KnownEnum> Debug for ApiEnum<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", K::NAME, self.raw)
    }
}

impl<K> Display for ApiEnum<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl<K> Serialize for ApiEnum<K> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, K: KnownEnum> Deserialize<'de> for ApiEnum<K> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ApiEnum::from_raw(raw))
    }
}

impl<K: KnownEnum> Validate for ApiEnum<K> {
    fn check(&self, strictness: Strictness) -> Result<()> {
        match strictness {
            Strictness::Strict => self.known().map(|_| ()),
            Strictness::Structural => Ok(()),
        }
    }
}

/// Declares the known constants of an open enum.
///
/// ```ignore
/// known_enum! {
///     pub enum RefundStatus {
///         Succeeded => "succeeded",
///         Failed => "failed",
///     }
/// }
/// ```
macro_rules! known_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $raw:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::enums::KnownEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VALUES: &'static [Self] = &[$(Self::$variant),+];

            fn as_raw(&self) -> &'static str {
                match self {
                    $(Self::$variant => $raw,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::enums::KnownEnum::as_raw(self))
            }
        }
    };
}

pub(crate) use known_enum;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    known_enum! {
        enum Color {
            Red => "red",
            Green => "green",
        }
    }

    #[test]
    fn constant_and_decoded_values_are_equal() {
        let from_constant = ApiEnum::from(Color::Red);
        let decoded: ApiEnum<Color> = serde_json::from_value(json!("red")).unwrap();

        assert_eq!(from_constant, decoded);
        assert_eq!(decoded, Color::Red);

        let set: HashSet<_> = [from_constant, decoded].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unknown_value_decodes_but_does_not_validate() {
        let value: ApiEnum<Color> = serde_json::from_value(json!("ultraviolet")).unwrap();

        assert_eq!(value.raw(), "ultraviolet");
        assert!(!value.is_known());

        let err = value.known().unwrap_err();
        assert!(err.is_unrecognized_value());
        assert!(matches!(
            value.validate().unwrap_err(),
            Error::UnrecognizedValue { enum_name: "Color", .. }
        ));

        assert_eq!(serde_json::to_value(&value).unwrap(), json!("ultraviolet"));
    }

    #[test]
    fn non_string_is_a_decode_error() {
        assert!(serde_json::from_value::<ApiEnum<Color>>(json!(3)).is_err());
    }

    #[test]
    fn known_enum_round_trips_every_constant() {
        for color in Color::VALUES {
            assert_eq!(Color::from_raw(color.as_raw()), Some(*color));
            assert_eq!(ApiEnum::from(*color).known().unwrap(), *color);
        }
        assert_eq!(Color::Green.to_string(), "green");
        assert_eq!(format!("{:?}", ApiEnum::from(Color::Green)), "Color(\"green\")");
    }
}
