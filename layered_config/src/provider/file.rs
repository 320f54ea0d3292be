//! Single-file configuration provider.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::ConfigProvider;
use crate::path::{get_path, remove_path, set_path};
use crate::{ConfigError, ConfigResult, ConfigValue, SourceResultExt};

/// Serialisation format of a configuration file, chosen by extension.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum FileFormat {
    /// `.json` files.
    Json,
    /// `.toml` files.
    #[cfg(feature = "toml")]
    Toml,
}

impl FileFormat {
    /// Select the format for `path` from its extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use layered_config::FileFormat;
    ///
    /// assert_eq!(FileFormat::from_path(Utf8Path::new("app.JSON")), Some(FileFormat::Json));
    /// assert_eq!(FileFormat::from_path(Utf8Path::new("app.ini")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension().map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Some(Self::Json),
            #[cfg(feature = "toml")]
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse `text` read from `source_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceRead`] when the text is malformed.
    pub fn parse(self, source_name: &str, text: &str) -> ConfigResult<Value> {
        match self {
            Self::Json => serde_json::from_str(text).read_context(source_name),
            #[cfg(feature = "toml")]
            Self::Toml => toml::from_str(text).read_context(source_name),
        }
    }

    /// Render `value` for writing to `source_name`.
    ///
    /// JSON is indented with four spaces and ends with a newline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceWrite`] when `value` cannot be expressed in
    /// the format, such as a `null` in TOML.
    pub fn render(self, source_name: &str, value: &Value) -> ConfigResult<String> {
        match self {
            Self::Json => {
                let mut buffer = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
                value.serialize(&mut serializer).write_context(source_name)?;
                buffer.push(b'\n');
                String::from_utf8(buffer).write_context(source_name)
            }
            #[cfg(feature = "toml")]
            Self::Toml => toml::to_string_pretty(value).write_context(source_name),
        }
    }
}

/// Provider reading one configuration file.
///
/// A missing file loads as an empty mapping, so optional overrides need not
/// exist on disk.
#[derive(Clone, Debug)]
pub struct FileProvider {
    path: Utf8PathBuf,
    format: FileFormat,
    config: Value,
}

impl FileProvider {
    /// Create a provider for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] when the extension names no
    /// supported format.
    pub fn new(path: impl Into<Utf8PathBuf>) -> ConfigResult<Self> {
        let path: Utf8PathBuf = path.into();
        let format =
            FileFormat::from_path(&path).ok_or_else(|| ConfigError::unsupported_format(&path))?;
        Ok(Self {
            path,
            format,
            config: Value::Object(Map::new()),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Format used to read and write the file.
    #[must_use]
    pub const fn format(&self) -> FileFormat {
        self.format
    }

    /// Data read by the last load, including later `set_item` writes.
    #[must_use]
    pub const fn config(&self) -> &Value {
        &self.config
    }

    /// Remove and return the value at `path`, if present.
    pub fn remove_item(&mut self, path: &str) -> Option<Value> {
        remove_path(&mut self.config, path)
    }
}

/// Return the parent directory of `path` when it names one.
fn parent_dir(path: &Utf8Path) -> Option<&Utf8Path> {
    path.parent().filter(|parent| !parent.as_str().is_empty())
}

#[async_trait]
impl ConfigProvider for FileProvider {
    fn name(&self) -> &str {
        self.path.as_str()
    }

    async fn load(&mut self) -> ConfigResult<ConfigValue> {
        let name = self.path.as_str();
        let exists = tokio::fs::try_exists(&self.path).await.read_context(name)?;
        let value = if exists {
            let text = tokio::fs::read_to_string(&self.path)
                .await
                .read_context(name)?;
            self.format.parse(name, &text)?
        } else {
            debug!(path = %self.path, "configuration file not found; using an empty mapping");
            Value::Object(Map::new())
        };
        if !value.is_object() {
            return Err(ConfigError::not_a_mapping(name));
        }
        self.config = value;
        Ok(self.config.clone())
    }

    async fn save(&self) -> ConfigResult<()> {
        let name = self.path.as_str();
        let text = self.format.render(name, &self.config)?;
        if let Some(parent) = parent_dir(&self.path) {
            tokio::fs::create_dir_all(parent).await.write_context(name)?;
        }
        tokio::fs::write(&self.path, text).await.write_context(name)?;
        debug!(path = %self.path, "saved configuration file");
        Ok(())
    }

    fn get_item(&self, path: &str, default: ConfigValue) -> ConfigValue {
        get_path(&self.config, path).cloned().unwrap_or(default)
    }

    fn set_item(&mut self, path: &str, value: ConfigValue) -> ConfigResult<()> {
        set_path(&mut self.config, path, value)
    }
}
