//! Parsing and validation of `electron.toml` compiler configuration.
//!
//! The configuration selects the IR pass pipeline, toggles instance sharing
//! in the compiler, and extends the parts catalog that the `@cpl` attribute
//! resolves against.

#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod loader;
pub mod types;

pub use catalog::builtin_parts;
pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::*;
