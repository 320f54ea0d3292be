//! Caller-supplied runtime variables for interpolation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ConfigError, ConfigValue};

/// Flat mapping of names to values visible to interpolation processors.
///
/// The context is read-only input to a single load; it is never persisted.
///
/// # Examples
///
/// ```
/// use layered_config::VariableContext;
/// use serde_json::json;
///
/// let vars = VariableContext::try_from(json!({"name": "Bob", "place": "Sydney"}))?;
/// assert_eq!(vars.get("name"), Some(&json!("Bob")));
/// # Ok::<_, std::sync::Arc<layered_config::ConfigError>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableContext(Map<String, Value>);

impl VariableContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert or replace a variable, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Look up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of variables in the context.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no variables are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for VariableContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<ConfigValue> for VariableContext {
    type Error = Arc<ConfigError>;

    fn try_from(value: ConfigValue) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(Arc::new(ConfigError::InvalidVariables {
                found: kind_name(&other),
            })),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for VariableContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::VariableContext;
    use crate::ConfigError;

    #[test]
    fn collects_pairs() {
        let vars: VariableContext = [("value1", 10), ("value2", 20)].into_iter().collect();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("value2"), Some(&json!(20)));
        assert_eq!(
            Value::Object(vars.as_map().clone()),
            json!({"value1": 10, "value2": 20})
        );
    }

    #[test]
    fn null_is_an_empty_context() {
        let vars = VariableContext::try_from(Value::Null).expect("null converts");
        assert!(vars.is_empty());
    }

    #[rstest]
    #[case::string(json!("Bob"), "a string")]
    #[case::sequence(json!([1, 2]), "a sequence")]
    #[case::number(json!(3), "a number")]
    fn rejects_non_mappings(#[case] value: Value, #[case] found: &str) {
        let err = VariableContext::try_from(value).expect_err("non-mapping must fail");
        assert!(
            matches!(&*err, ConfigError::InvalidVariables { found: f } if *f == found),
            "unexpected error: {err}"
        );
    }
}
