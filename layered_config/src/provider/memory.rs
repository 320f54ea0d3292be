//! In-memory configuration provider.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::ConfigProvider;
use crate::path::{get_path, set_path};
use crate::{ConfigError, ConfigResult, ConfigValue};

/// Provider serving a mapping assembled in code.
///
/// # Examples
///
/// ```
/// use layered_config::{ConfigProvider, MemoryProvider};
/// use serde_json::json;
///
/// let mut provider = MemoryProvider::new(json!({"db": {"port": 5432}}));
/// provider.set_item("db.host", json!("localhost"))?;
/// assert_eq!(provider.get_item("db.host", json!(null)), json!("localhost"));
/// # Ok::<_, std::sync::Arc<layered_config::ConfigError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct MemoryProvider {
    name: String,
    value: Value,
}

impl MemoryProvider {
    /// Create a provider serving `value`.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self::named("memory", value)
    }

    /// Create a provider with a custom diagnostic name.
    #[must_use]
    pub fn named(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Replace the served value.
    pub fn replace(&mut self, value: Value) -> Value {
        std::mem::replace(&mut self.value, value)
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

#[async_trait]
impl ConfigProvider for MemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&mut self) -> ConfigResult<ConfigValue> {
        if !self.value.is_object() {
            return Err(ConfigError::not_a_mapping(&self.name));
        }
        Ok(self.value.clone())
    }

    fn get_item(&self, path: &str, default: ConfigValue) -> ConfigValue {
        get_path(&self.value, path).cloned().unwrap_or(default)
    }

    fn set_item(&mut self, path: &str, value: ConfigValue) -> ConfigResult<()> {
        set_path(&mut self.value, path, value)
    }
}
