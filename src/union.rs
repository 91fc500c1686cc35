//! Tagged unions: fields that hold exactly one of several known shapes.
//!
//! Decoding is first-match, not best-match: variants are tried in declared
//! order, and the first one that deserializes and passes a
//! [`Strictness::Structural`] check wins, even if a later variant would also
//! accept the input. A structural check requires every field to be present and
//! well-typed but lets unrecognized enum values through, so a variant carrying
//! a currency or status added after this release still matches. Discriminated
//! unions carry their tag as an ordinary single-constant
//! [`ApiEnum`](crate::enums::ApiEnum) field inside each variant and check it
//! strictly, so a tag mismatch rejects the variant. Encoding writes the held
//! variant's own shape with no wrapper.

use serde::de::DeserializeOwned;

use crate::{
    core::{Strictness, Validate},
    errors::{Error, Result},
    types::AnyJson,
};

pub use crate::errors::{VariantFailure, VariantFailures};

/// Trial-decodes a JSON value against a union's variants in order.
///
/// ```
/// use dodopayments_kit::union::UnionDecoder;
///
/// #[derive(Debug, PartialEq)]
/// enum IdOrCount {
///     Id(String),
///     Count(i64),
/// }
///
/// let value = serde_json::json!(7);
/// let decoded = UnionDecoder::new("IdOrCount", &value)
///     .variant("Id", IdOrCount::Id)
///     .variant("Count", IdOrCount::Count)
///     .finish()
///     .unwrap();
/// assert_eq!(decoded, IdOrCount::Count(7));
/// ```
#[derive(Debug)]
pub struct UnionDecoder<'a, U> {
    union_name: &'static str,
    value: &'a AnyJson,
    matched: Option<U>,
    failures: Vec<VariantFailure>,
}

impl<'a, U> UnionDecoder<'a, U> {
    pub fn new(union_name: &'static str, value: &'a AnyJson) -> Self {
        UnionDecoder {
            union_name,
            value,
            matched: None,
            failures: Vec::new(),
        }
    }

    /// Tries the next declared variant unless an earlier one already matched.
    pub fn variant<V, F>(mut self, variant: &'static str, wrap: F) -> Self
    where
        V: DeserializeOwned + Validate,
        F: FnOnce(V) -> U,
    {
        if self.matched.is_some() {
            return self;
        }

        match try_variant::<V>(self.value) {
            Ok(decoded) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("{} decoded as variant {}", self.union_name, variant);

                self.matched = Some(wrap(decoded));
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("{} rejected variant {}: {}", self.union_name, variant, err);

                self.failures.push(VariantFailure {
                    variant,
                    error: Box::new(err),
                });
            }
        }

        self
    }

    /// Returns the first matching variant, or every rejection if none matched.
    pub fn finish(self) -> Result<U> {
        match self.matched {
            Some(matched) => Ok(matched),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "{} rejected by all {} variants",
                    self.union_name,
                    self.failures.len()
                );

                Err(Error::UnionDecodeFailed {
                    union_name: self.union_name,
                    failures: VariantFailures(self.failures),
                })
            }
        }
    }
}

fn try_variant<V: DeserializeOwned + Validate>(value: &AnyJson) -> Result<V> {
    let decoded = V::deserialize(value).map_err(Error::invalid_data)?;
    decoded.check(Strictness::Structural)?;
    Ok(decoded)
}

/// Declares a tagged union over already-declared variant types.
///
/// Variant order is the decode order.
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+

        impl $name {
            /// Decodes `value` by trying each variant in declared order.
            pub fn decode(value: &$crate::types::AnyJson) -> $crate::errors::Result<Self> {
                $crate::union::UnionDecoder::new(stringify!($name), value)
                    $(.variant(stringify!($variant), Self::$variant))+
                    .finish()
            }

            /// The declared name of the held variant.
            pub fn variant_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                match self {
                    $(Self::$variant(value) => ::serde::Serialize::serialize(value, serializer),)+
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <$crate::types::AnyJson as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::decode(&value).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }

        impl $crate::core::Validate for $name {
            fn check(&self, strictness: $crate::core::Strictness) -> $crate::errors::Result<()> {
                match self {
                    $(Self::$variant(value) => $crate::core::Validate::check(value, strictness),)+
                }
            }
        }
    };
}

pub(crate) use tagged_union;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        enums::{ApiEnum, known_enum},
        model::{JsonModel, RawData, raw_model},
    };

    known_enum! {
        enum CircleKind {
            Circle => "circle",
        }
    }

    known_enum! {
        enum SquareKind {
            Square => "square",
        }
    }

    known_enum! {
        enum Fill {
            Solid => "solid",
            Hollow => "hollow",
        }
    }

    raw_model! {
        struct Circle;
    }

    raw_model! {
        struct Square;
    }

    impl Circle {
        fn radius(&self) -> Result<i64> {
            self.raw.get("radius")
        }
    }

    impl Validate for Circle {
        fn check(&self, strictness: Strictness) -> Result<()> {
            self.raw.get::<ApiEnum<CircleKind>>("kind")?.validate()?;
            self.radius()?;
            self.raw
                .get_optional::<ApiEnum<Fill>>("fill")?
                .check(strictness)?;
            Ok(())
        }
    }

    impl Validate for Square {
        fn check(&self, _strictness: Strictness) -> Result<()> {
            self.raw.get::<ApiEnum<SquareKind>>("kind")?.validate()?;
            self.raw.get::<i64>("side")?;
            Ok(())
        }
    }

    tagged_union! {
        enum Shape {
            Circle(Circle),
            Square(Square),
        }
    }

    raw_model! {
        struct Loose;
    }

    raw_model! {
        struct AlsoLoose;
    }

    impl Validate for Loose {
        fn check(&self, _strictness: Strictness) -> Result<()> {
            Ok(())
        }
    }

    impl Validate for AlsoLoose {
        fn check(&self, _strictness: Strictness) -> Result<()> {
            Ok(())
        }
    }

    tagged_union! {
        enum Ambiguous {
            Loose(Loose),
            AlsoLoose(AlsoLoose),
        }
    }

    #[test]
    fn discriminator_selects_the_variant() {
        let shape: Shape = serde_json::from_value(json!({ "kind": "square", "side": 2 })).unwrap();
        assert_eq!(shape.variant_name(), "Square");
    }

    #[test]
    fn first_declared_variant_wins_ties() {
        let ambiguous = Ambiguous::decode(&json!({ "anything": true })).unwrap();
        assert!(matches!(ambiguous, Ambiguous::Loose(_)));
    }

    #[test]
    fn aggregate_error_keeps_every_failure() {
        let err = Shape::decode(&json!({ "kind": "triangle", "radius": 1 })).unwrap_err();
        match err {
            Error::UnionDecodeFailed {
                union_name,
                failures,
            } => {
                assert_eq!(union_name, "Shape");
                let variants: Vec<_> = failures.iter().map(|f| f.variant).collect();
                assert_eq!(variants, ["Circle", "Square"]);
                assert!(failures.iter().all(|f| f.error.is_unrecognized_value()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_value_in_other_field_keeps_the_variant() {
        let value = json!({ "kind": "circle", "radius": 1, "fill": "striped" });
        let shape = Shape::decode(&value).unwrap();

        let Shape::Circle(circle) = &shape else {
            panic!("expected a circle, got {}", shape.variant_name());
        };
        assert_eq!(circle.to_json(), value);
        assert!(shape.check(Strictness::Structural).is_ok());
        assert!(shape.validate().unwrap_err().is_unrecognized_value());
    }

    #[test]
    fn wrong_type_in_other_field_still_rejects_the_variant() {
        let err = Shape::decode(&json!({ "kind": "circle", "radius": 1, "fill": 3 })).unwrap_err();
        let Error::UnionDecodeFailed { failures, .. } = err else {
            panic!("expected a union failure");
        };
        let circle = failures.iter().find(|f| f.variant == "Circle").unwrap();
        assert!(circle.error.is_invalid_data());
    }

    #[test]
    fn structural_failure_is_reported_per_variant() {
        let err = Shape::decode(&json!("not an object")).unwrap_err();
        let Error::UnionDecodeFailed { failures, .. } = err else {
            panic!("expected a union failure");
        };
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| f.error.is_invalid_data()));
    }

    #[test]
    fn encodes_the_bare_variant() {
        let circle = Circle::from_json(json!({ "kind": "circle", "radius": 3 })).unwrap();
        let shape = Shape::from(circle.clone());

        assert_eq!(
            serde_json::to_value(&shape).unwrap(),
            serde_json::to_value(&circle).unwrap()
        );
        assert!(shape.validate().is_ok());
    }

    #[test]
    fn validate_delegates_to_held_variant() {
        let mut raw = RawData::new();
        raw.set("kind", "circle").unwrap();
        let shape = Shape::Circle(Circle::from_raw(raw));
        assert!(shape.validate().unwrap_err().is_missing_required_field());
    }
}
