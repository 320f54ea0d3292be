//! Backing sources a [`crate::ConfigSession`] reads from.
//!
//! A provider yields one raw configuration mapping per load. Providers that
//! persist data also implement [`ConfigProvider::save`]; the rest inherit a
//! default that reports [`ConfigError::SaveUnsupported`].

mod env_aware;
mod file;
mod memory;

pub use env_aware::{DEFAULT_ENV_FLAG, DEFAULT_FLAG, EnvAwareProvider, EnvAwareProviderBuilder};
pub use file::{FileFormat, FileProvider};
pub use memory::MemoryProvider;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{ConfigError, ConfigResult, ConfigValue};

/// Source of raw configuration consumed by a session.
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Label used in diagnostics, usually a path.
    fn name(&self) -> &str;

    /// Read the provider's sources and return one configuration mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceRead`] when a source cannot be read or
    /// parsed, and [`ConfigError::NotAMapping`] when its root is not a mapping.
    async fn load(&mut self) -> ConfigResult<ConfigValue>;

    /// Persist the provider's current data.
    ///
    /// # Errors
    ///
    /// The default implementation returns [`ConfigError::SaveUnsupported`].
    async fn save(&self) -> ConfigResult<()> {
        Err(Arc::new(ConfigError::SaveUnsupported {
            provider: self.name().to_owned(),
        }))
    }

    /// Read the value at `path`, falling back to `default` when it is absent.
    fn get_item(&self, path: &str, default: ConfigValue) -> ConfigValue;

    /// Write `value` at `path` in the provider's data.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] when `path` cannot be written.
    fn set_item(&mut self, path: &str, value: ConfigValue) -> ConfigResult<()>;
}
