//! Breadth-first resolution of directive strings inside a configuration tree.
//!
//! The walker keeps an append-only worklist of mutable references to the
//! tree's own containers and an advancing read offset. Each container is
//! visited once: its string entries are resolved in place and its nested
//! containers are queued, so a level is fully resolved before the walk
//! descends. No recursion is involved, so deeply nested files cannot exhaust
//! the stack.

mod directive;

pub use directive::{DIRECTIVE_MARKER, Directive};

use serde_json::Value;
use tracing::debug;

use crate::{ConfigError, ConfigResult, ConfigValue, ProcessorRegistry, VariableContext};

/// Resolves directives against a [`ProcessorRegistry`].
///
/// # Examples
///
/// ```
/// use layered_config::{Interpolator, ProcessorRegistry, VariableContext};
/// use serde_json::json;
///
/// let registry = ProcessorRegistry::builtin();
/// let vars = VariableContext::try_from(json!({"name": "Bob"}))?;
/// let mut cfg = json!({"greeting": "#!jst:Hello ${name}!", "sum": ["#!jsv:1+2"]});
/// Interpolator::new(&registry).interpolate(&mut cfg, &vars)?;
/// assert_eq!(cfg, json!({"greeting": "Hello Bob!", "sum": [3]}));
/// # Ok::<_, std::sync::Arc<layered_config::ConfigError>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Interpolator<'r> {
    registry: &'r ProcessorRegistry,
}

impl<'r> Interpolator<'r> {
    /// Create an interpolator dispatching to `registry`.
    #[must_use]
    pub const fn new(registry: &'r ProcessorRegistry) -> Self {
        Self { registry }
    }

    /// Resolve every directive string under `root`, mutating it in place.
    ///
    /// Values produced by processors replace their leaf and are not walked
    /// again. A scalar `root` is left untouched.
    ///
    /// # Errors
    ///
    /// Stops at the first directive that fails to parse, names an unknown
    /// token, or whose processor fails. Leaves resolved before the failure
    /// keep their new values; callers needing atomicity interpolate a copy.
    pub fn interpolate(&self, root: &mut ConfigValue, variables: &VariableContext) -> ConfigResult<()> {
        let mut queue: Vec<Option<&mut Value>> = vec![Some(root)];
        let mut offset = 0;
        let mut resolved = 0_usize;
        while let Some(slot) = queue.get_mut(offset) {
            offset += 1;
            let children: Vec<&mut Value> = match slot.take() {
                Some(Value::Object(map)) => map.values_mut().collect(),
                Some(Value::Array(items)) => items.iter_mut().collect(),
                _ => continue,
            };
            for child in children {
                if child.is_object() || child.is_array() {
                    queue.push(Some(child));
                } else if let Value::String(text) = &*child {
                    if let Some(replacement) = self.resolve_string(text, variables)? {
                        *child = replacement;
                        resolved += 1;
                    }
                }
            }
        }
        debug!(containers = offset, resolved, "interpolated configuration");
        Ok(())
    }

    /// Resolve a single string leaf.
    ///
    /// Returns `Ok(None)` when `value` is not a directive and should stay as
    /// it is.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DirectiveSyntax`],
    /// [`ConfigError::UnsupportedDirective`], or [`ConfigError::Processor`].
    pub fn resolve_string(
        &self,
        value: &str,
        variables: &VariableContext,
    ) -> ConfigResult<Option<ConfigValue>> {
        let Some(Directive { token, payload }) = Directive::parse(value)? else {
            return Ok(None);
        };
        let processor = self
            .registry
            .lookup(token)
            .ok_or_else(|| ConfigError::unsupported_directive(token))?;
        processor
            .resolve(payload, variables)
            .map(Some)
            .map_err(|source| ConfigError::processor(token, payload, source))
    }
}

#[cfg(test)]
mod tests;
