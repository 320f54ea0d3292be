//! Builder for [`EnvAwareProvider`].

use camino::Utf8PathBuf;
use tracing::debug;

use super::{DEFAULT_ENV_FLAG, DEFAULT_FLAG, EnvAwareProvider};
use crate::{ConfigResult, FileProvider};

/// Builder for [`EnvAwareProvider`].
///
/// The environment flag is resolved in order: an explicit
/// [`env_flag`](Self::env_flag), then a non-empty value of the variable named
/// by [`env_flag_from_var`](Self::env_flag_from_var), then
/// [`DEFAULT_ENV_FLAG`].
#[derive(Clone, Debug)]
pub struct EnvAwareProviderBuilder {
    dir: Utf8PathBuf,
    base_name: String,
    extension: String,
    default_flag: String,
    env_flag: Option<String>,
    env_var: Option<String>,
}

impl EnvAwareProviderBuilder {
    /// Create a builder for `base_name` files inside `dir`, using JSON files
    /// and the standard flags.
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_name: base_name.into(),
            extension: String::from("json"),
            default_flag: String::from(DEFAULT_FLAG),
            env_flag: None,
            env_var: None,
        }
    }

    /// Set the file extension; a leading dot is ignored.
    #[must_use]
    pub fn extension(mut self, extension: impl AsRef<str>) -> Self {
        extension
            .as_ref()
            .trim_start_matches('.')
            .clone_into(&mut self.extension);
        self
    }

    /// Override the flag naming the defaults file.
    #[must_use]
    pub fn default_flag(mut self, flag: impl Into<String>) -> Self {
        self.default_flag = flag.into();
        self
    }

    /// Select the environment explicitly.
    #[must_use]
    pub fn env_flag(mut self, flag: impl Into<String>) -> Self {
        self.env_flag = Some(flag.into());
        self
    }

    /// Read the environment flag from the variable `var`, such as `APP_ENV`.
    #[must_use]
    pub fn env_flag_from_var(mut self, var: impl Into<String>) -> Self {
        self.env_var = Some(var.into());
        self
    }

    fn resolve_env_flag(&self) -> String {
        if let Some(flag) = &self.env_flag {
            return flag.clone();
        }
        self.env_var
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|flag| !flag.is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_ENV_FLAG))
    }

    fn file_for(&self, flag: &str) -> Utf8PathBuf {
        self.dir
            .join(format!("{}.{flag}.{}", self.base_name, self.extension))
    }

    /// Build the provider.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::UnsupportedFormat`] when the extension
    /// names no supported format.
    pub fn build(self) -> ConfigResult<EnvAwareProvider> {
        let env_flag = self.resolve_env_flag();
        let default_source = FileProvider::new(self.file_for(&self.default_flag))?;
        let env_source = FileProvider::new(self.file_for(&env_flag))?;
        let name = format!(
            "{}.{{{},{env_flag}}}.{}",
            self.dir.join(&self.base_name),
            self.default_flag,
            self.extension
        );
        debug!(provider = %name, "built environment-aware provider");
        Ok(EnvAwareProvider::from_parts(
            name,
            env_flag,
            default_source,
            env_source,
        ))
    }
}
