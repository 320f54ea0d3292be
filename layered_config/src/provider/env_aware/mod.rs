//! Provider pairing a default file with an environment-specific override.
//!
//! For a directory `config`, base name `app`, and environment `production`,
//! the provider reads `config/app.default.json` and then
//! `config/app.production.json`, deep-merging the second over the first.

mod builder;

pub use builder::EnvAwareProviderBuilder;

use async_trait::async_trait;
use camino::Utf8PathBuf;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{ConfigProvider, FileProvider};
use crate::merge::{SourceComposer, SourceProvenance};
use crate::path::{get_path, set_path};
use crate::{ConfigResult, ConfigValue};

/// Flag naming the file every environment inherits from.
pub const DEFAULT_FLAG: &str = "default";

/// Environment flag used when none is configured.
pub const DEFAULT_ENV_FLAG: &str = "development";

/// Provider merging `<base>.<env>.<ext>` over `<base>.default.<ext>`.
///
/// Either file may be missing. Writes land in the merged view and in the
/// environment file; [`ConfigProvider::save`] persists only the latter so the
/// shared defaults are never rewritten.
#[derive(Clone, Debug)]
pub struct EnvAwareProvider {
    name: String,
    env_flag: String,
    default_source: FileProvider,
    env_source: FileProvider,
    config: Value,
}

impl EnvAwareProvider {
    /// Start building a provider for `base_name` files inside `dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::EnvAwareProvider;
    ///
    /// let provider = EnvAwareProvider::builder("config", "app")
    ///     .env_flag("production")
    ///     .build()?;
    /// assert_eq!(provider.env_flag(), "production");
    /// assert_eq!(provider.env_source().path(), "config/app.production.json");
    /// # Ok::<_, std::sync::Arc<layered_config::ConfigError>>(())
    /// ```
    #[must_use]
    pub fn builder(
        dir: impl Into<Utf8PathBuf>,
        base_name: impl Into<String>,
    ) -> EnvAwareProviderBuilder {
        EnvAwareProviderBuilder::new(dir, base_name)
    }

    fn from_parts(
        name: String,
        env_flag: String,
        default_source: FileProvider,
        env_source: FileProvider,
    ) -> Self {
        Self {
            name,
            env_flag,
            default_source,
            env_source,
            config: Value::Object(Map::new()),
        }
    }

    /// Environment flag selecting the override file.
    #[must_use]
    pub fn env_flag(&self) -> &str {
        &self.env_flag
    }

    /// Provider for the shared defaults file.
    #[must_use]
    pub const fn default_source(&self) -> &FileProvider {
        &self.default_source
    }

    /// Provider for the environment-specific file.
    #[must_use]
    pub const fn env_source(&self) -> &FileProvider {
        &self.env_source
    }

    /// Mutable access to the environment-specific file, for edits that should
    /// be persisted without touching the merged view.
    pub const fn env_source_mut(&mut self) -> &mut FileProvider {
        &mut self.env_source
    }
}

#[async_trait]
impl ConfigProvider for EnvAwareProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&mut self) -> ConfigResult<ConfigValue> {
        let defaults = self.default_source.load().await?;
        let overrides = self.env_source.load().await?;

        let mut composer = SourceComposer::new();
        composer.push_default(defaults, Some(self.default_source.path().to_owned()));
        composer.push_environment(overrides, Some(self.env_source.path().to_owned()));
        let overridden = composer.has_entries_from(SourceProvenance::Environment);
        self.config = composer.compose();

        if overridden {
            info!(
                env = %self.env_flag,
                path = %self.env_source.path(),
                "configuration overridden by environment-specific settings"
            );
        } else {
            debug!(env = %self.env_flag, "no environment-specific settings found");
        }
        Ok(self.config.clone())
    }

    async fn save(&self) -> ConfigResult<()> {
        self.env_source.save().await
    }

    fn get_item(&self, path: &str, default: ConfigValue) -> ConfigValue {
        get_path(&self.config, path).cloned().unwrap_or(default)
    }

    fn set_item(&mut self, path: &str, value: ConfigValue) -> ConfigResult<()> {
        set_path(&mut self.config, path, value.clone())?;
        let Some(prefix) = inherited_sequence(&self.config, self.env_source.config(), path) else {
            return self.env_source.set_item(path, value);
        };
        // Sequences replace wholesale on merge, so the override must carry
        // the whole edited sequence rather than a mapping keyed by index.
        let sequence = get_path(&self.config, prefix).cloned().unwrap_or_default();
        debug!(path, sequence = prefix, "copying inherited sequence into environment file");
        self.env_source.set_item(prefix, sequence)
    }
}

/// Shortest proper prefix of `path` that is a sequence in `merged` but not in
/// `overrides`.
fn inherited_sequence<'p>(merged: &Value, overrides: &Value, path: &'p str) -> Option<&'p str> {
    path.match_indices('.')
        .filter_map(|(end, _)| path.get(..end))
        .find(|prefix| {
            get_path(merged, prefix).is_some_and(Value::is_array)
                && !get_path(overrides, prefix).is_some_and(Value::is_array)
        })
}
