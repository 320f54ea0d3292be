//! Temporary configuration directories for filesystem-backed tests.
//!
//! # Examples
//!
//! ```
//! use layered_config_test_helpers::fixtures::ConfigDir;
//!
//! let dir = ConfigDir::new()?;
//! dir.write_json("app.default.json", &serde_json::json!({"port": 80}))?;
//! assert_eq!(dir.read_json("app.default.json")?["port"], 80);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

/// Temporary directory with a UTF-8 path, removed on drop.
#[derive(Debug)]
pub struct ConfigDir {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl ConfigDir {
    /// Create an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temporary config directory")?;
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|non_utf8| anyhow!("temp dir is not valid UTF-8: {}", non_utf8.display()))?;
        Ok(Self { _dir: dir, path })
    }

    /// Root of the directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Absolute path of `name` inside the directory.
    #[must_use]
    pub fn join(&self, name: &str) -> Utf8PathBuf {
        self.path.join(name)
    }

    /// Write `text` verbatim to `name`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, text: &str) -> Result<Utf8PathBuf> {
        let file = self.join(name);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&file, text).with_context(|| format!("write {file}"))?;
        Ok(file)
    }

    /// Write `value` as pretty-printed JSON to `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when serialisation or the write fails.
    pub fn write_json(&self, name: &str, value: &Value) -> Result<Utf8PathBuf> {
        let text = serde_json::to_string_pretty(value).context("serialise JSON fixture")?;
        self.write(name, &text)
    }

    /// Write TOML `text` to `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_toml(&self, name: &str, text: &str) -> Result<Utf8PathBuf> {
        self.write(name, text)
    }

    /// Read the raw contents of `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(&self, name: &str) -> Result<String> {
        let file = self.join(name);
        std::fs::read_to_string(&file).with_context(|| format!("read {file}"))
    }

    /// Read and parse `name` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid JSON.
    pub fn read_json(&self, name: &str) -> Result<Value> {
        let text = self.read(name)?;
        serde_json::from_str(&text).with_context(|| format!("parse {name} as JSON"))
    }

    /// Returns `true` when `name` exists inside the directory.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.join(name).exists()
    }
}
