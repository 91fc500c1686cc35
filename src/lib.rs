//! Dodo Payments client library.
//!
//! Every generated type is built from three primitives:
//!
//! - raw-JSON-backed models ([`model::RawData`], [`model::JsonModel`]) that keep
//!   every field they were decoded from and check fields only when read or
//!   validated,
//! - open enums ([`enums::ApiEnum`]) that accept values this version does not know,
//! - tagged unions ([`union::UnionDecoder`]) decoded by first matching variant.
//!
//! Requests are described by [`transport::Endpoint`]s and sent through a
//! [`transport::Transport`]; with the `client` feature, [`http_client::HttpTransport`]
//! sends them over HTTP.

pub mod client;
pub mod config;
pub mod core;
pub mod enums;
pub mod errors;
#[cfg(feature = "client")]
pub mod http_client;
pub mod model;
pub mod resources;
pub mod transport;
pub mod types;
pub mod union;

pub use client::Client;
pub use errors::{Error, Result};
