//! Core traits shared by models, enums and unions.

use crate::{errors::Result, types::AnyJson};

/// How much of a value [`Validate::check`] inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Every declared property decodes and every open enum holds a known value.
    Strict,
    /// Every declared property decodes. Open enums may hold any value, except
    /// discriminator tags, which must always match their variant.
    Structural,
}

/// Explicit, opt-in validation.
///
/// Nothing is validated while decoding: a payload may be partially formed or
/// carry values newer than this client. Calling `validate` forces every declared
/// property to be read (surfacing missing required fields and malformed values)
/// and recurses into nested models, open enums and unions.
///
/// Union decoding runs the [`Strictness::Structural`] check, so a variant that
/// carries a not-yet-known enum value is still selected.
pub trait Validate {
    fn check(&self, strictness: Strictness) -> Result<()>;

    fn validate(&self) -> Result<()> {
        self.check(Strictness::Strict)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn check(&self, strictness: Strictness) -> Result<()> {
        match self {
            Some(value) => value.check(strictness),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.iter().try_for_each(|value| value.check(strictness))
    }
}

impl<T: Validate> Validate for std::collections::HashMap<String, T> {
    fn check(&self, strictness: Strictness) -> Result<()> {
        self.values().try_for_each(|value| value.check(strictness))
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn check(&self, strictness: Strictness) -> Result<()> {
        (**self).check(strictness)
    }
}

macro_rules! always_valid {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Validate for $ty {
                fn check(&self, _strictness: Strictness) -> Result<()> {
                    Ok(())
                }
            }
        )+
    };
}

always_valid!(String, bool, i32, i64, u32, u64, f64, AnyJson, ());
