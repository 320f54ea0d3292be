//! Extensions for mapping foreign errors to `ConfigResult` concisely.
//!
//! Providers touch the filesystem and several parsers; these helpers replace
//! repetitive `.map_err(|e| ConfigError::source_read(name, e))` chains.
//!
//! # Examples
//!
//! ```
//! use layered_config::{ConfigResult, SourceResultExt};
//!
//! fn parse(text: &str) -> ConfigResult<serde_json::Value> {
//!     serde_json::from_str(text).read_context("inline")
//! }
//!
//! assert!(parse("{").is_err());
//! ```

use crate::{BoxError, ConfigError, ConfigResult};

/// Attach a source name to read or write failures.
pub trait SourceResultExt<T> {
    /// Convert the error into [`ConfigError::SourceRead`] for `source_name`.
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped in a shared [`ConfigError`].
    fn read_context(self, source_name: &str) -> ConfigResult<T>;

    /// Convert the error into [`ConfigError::SourceWrite`] for `source_name`.
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped in a shared [`ConfigError`].
    fn write_context(self, source_name: &str) -> ConfigResult<T>;
}

impl<T, E> SourceResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn read_context(self, source_name: &str) -> ConfigResult<T> {
        self.map_err(|e| ConfigError::source_read(source_name, e))
    }

    fn write_context(self, source_name: &str) -> ConfigResult<T> {
        self.map_err(|e| ConfigError::source_write(source_name, e))
    }
}
