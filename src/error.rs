//! Error types for the configuration store.
//!
//! Two families with different blast radii: [`ConfigError`] is fatal to a
//! whole loader pipeline run, while [`AccessError`] is local to a single
//! get/set call and leaves the store usable. Accessing a released store is
//! neither: it is a caller bug and panics (see [`crate::store::ConfigStore`]).

use thiserror::Error;

use crate::value::Kind;

/// Fatal pipeline errors. A failed pipeline leaves no usable store behind.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A base or included source could not be located or read.
    #[error("configuration source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },
}

/// Per-call accessor failures, recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The key is not in the recognized-field table.
    #[error("unrecognized configuration key: {0}")]
    KeyNotRecognized(String),

    /// The requested kind does not match the key's declared kind.
    /// Never coerced.
    #[error("type mismatch for '{key}': requested {requested}, declared {declared}")]
    TypeMismatch {
        key: String,
        requested: Kind,
        declared: Kind,
    },

    /// The key is recognized but no layer or default has set it.
    #[error("no value set for '{0}'")]
    ValueUnset(String),

    /// The text could not be parsed as the key's declared kind.
    #[error("invalid value for '{key}': {text:?}")]
    InvalidValue { key: String, text: String },
}
