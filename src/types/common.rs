//! Miscellaneous common types used throughout the client.

/// Represents a key-value mapping on the wire, such as a `metadata` object. The key is a `String`.
pub type Record<V> = std::collections::HashMap<String, V>;

/// Represents any JSON value. Used for storing raw, not yet decoded, field values.
pub type AnyJson = serde_json::Value;

/// An insertion-ordered JSON object.
pub type JsonObject = serde_json::Map<String, AnyJson>;
