//! Error types produced while loading and resolving configuration.

mod constructors;
mod types;

pub use types::{BoxError, ConfigError};
