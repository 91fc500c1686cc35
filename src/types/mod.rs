//! Scalar wire types shared by every generated model.

mod amount;
mod common;
mod timestamp;

pub use amount::*;
pub use common::*;
pub use timestamp::*;
