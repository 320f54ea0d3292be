//! Interpolation processors and the registry that dispatches to them.
//!
//! A directive `"#!<token>:<payload>"` names a processor by token. The
//! registry maps tokens to [`Processor`] implementations; the built-ins cover
//! single expressions, `${...}` string templates, and full text templates.

mod builtin;
mod scan;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{BoxError, ConfigError, ConfigResult, ConfigValue, VariableContext};

pub use builtin::{GeneralTemplate, StringTemplate, ValueExpression};

/// Token of the single-expression processor.
pub const VALUE_EXPRESSION_TOKEN: &str = "jsv";
/// Token of the `${...}` string-template processor.
pub const STRING_TEMPLATE_TOKEN: &str = "jst";
/// Older token for the string-template processor, kept for existing files.
pub const LEGACY_STRING_TEMPLATE_TOKEN: &str = "es6";
/// Token of the general text-template processor.
pub const GENERAL_TEMPLATE_TOKEN: &str = "swig";

/// Resolves a directive payload to a replacement value.
///
/// Processors see only the payload text and the variable context, never the
/// configuration tree being interpolated.
///
/// Any closure with the matching signature is a processor:
///
/// ```
/// use layered_config::{ConfigValue, ProcessorRegistry, VariableContext};
///
/// let mut registry = ProcessorRegistry::empty();
/// registry.register("upper", |payload: &str, _vars: &VariableContext| {
///     Ok::<_, layered_config::BoxError>(ConfigValue::from(payload.to_uppercase()))
/// })?;
/// assert!(registry.lookup("upper").is_some());
/// # Ok::<_, std::sync::Arc<layered_config::ConfigError>>(())
/// ```
pub trait Processor: Send + Sync {
    /// Resolve `payload` against `variables`.
    ///
    /// # Errors
    ///
    /// Returns the processor's own failure; the interpolation engine wraps it
    /// in [`ConfigError::Processor`] together with the payload.
    fn resolve(&self, payload: &str, variables: &VariableContext) -> Result<ConfigValue, BoxError>;
}

impl<F> Processor for F
where
    F: Fn(&str, &VariableContext) -> Result<ConfigValue, BoxError> + Send + Sync,
{
    fn resolve(&self, payload: &str, variables: &VariableContext) -> Result<ConfigValue, BoxError> {
        self(payload, variables)
    }
}

/// Lookup table from directive token to processor.
#[derive(Clone)]
pub struct ProcessorRegistry {
    processors: HashMap<String, Arc<dyn Processor>>,
}

impl ProcessorRegistry {
    /// Create a registry with no processors.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            processors: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in processors.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        let string_template: Arc<dyn Processor> = Arc::new(StringTemplate::new());
        registry.insert(VALUE_EXPRESSION_TOKEN, Arc::new(ValueExpression::new()));
        registry.insert(STRING_TEMPLATE_TOKEN, Arc::clone(&string_template));
        registry.insert(LEGACY_STRING_TEMPLATE_TOKEN, string_template);
        registry.insert(GENERAL_TEMPLATE_TOKEN, Arc::new(GeneralTemplate::new()));
        registry
    }

    /// Register `processor` under `token`, returning any processor it replaces.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidToken`] when `token` is empty or contains
    /// `:`, since no directive could address it.
    pub fn register(
        &mut self,
        token: impl Into<String>,
        processor: impl Processor + 'static,
    ) -> ConfigResult<Option<Arc<dyn Processor>>> {
        let name: String = token.into();
        validate_token(&name)?;
        Ok(self.insert(name, Arc::new(processor)))
    }

    /// Find the processor registered for `token`.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<&dyn Processor> {
        self.processors.get(token).map(AsRef::as_ref)
    }

    /// Returns `true` when `token` has a processor.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.processors.contains_key(token)
    }

    /// Iterate over the registered tokens in sorted order.
    #[must_use = "iterators should be consumed to inspect tokens"]
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        let mut tokens: Vec<&str> = self.processors.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens.into_iter()
    }

    fn insert(
        &mut self,
        token: impl Into<String>,
        processor: Arc<dyn Processor>,
    ) -> Option<Arc<dyn Processor>> {
        self.processors.insert(token.into(), processor)
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("tokens", &self.tokens().collect::<Vec<_>>())
            .finish()
    }
}

fn validate_token(token: &str) -> ConfigResult<()> {
    let message = if token.is_empty() {
        "token must not be empty"
    } else if token.contains(':') {
        "token must not contain ':'"
    } else {
        return Ok(());
    };
    Err(Arc::new(ConfigError::InvalidToken {
        token: token.to_owned(),
        message: message.to_owned(),
    }))
}
