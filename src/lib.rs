//! termcfg - layered, typed terminal configuration store.
//!
//! Accumulates configuration from ordered sources (a base file,
//! command-line-style overrides, recursively discovered includes), resolves
//! compiled-in defaults in a single finalize step, and exposes the result
//! through one typed key/value surface that can re-serialize to canonical
//! source text.

pub mod error;
pub mod export;
pub mod loader;
pub mod schema;
pub mod source;
pub mod store;
pub mod value;

pub use error::{AccessError, ConfigError};
pub use loader::{load, load_finalized, LoadOptions, LoadReport, SourceOrigin, SourceRecord};
pub use store::{ConfigStore, FromConfig};
pub use value::{Kind, Rgb, Value};
