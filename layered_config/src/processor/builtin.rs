//! Built-in processors backed by `minijinja`.
//!
//! Every resolution runs in a fresh template environment with no globals
//! beyond the engine's own filters and tests, so evaluation only ever sees the
//! caller's [`VariableContext`].

use minijinja::{Environment, UndefinedBehavior, Value as TemplateValue};
use serde_json::Value;

use super::Processor;
use super::scan::{Segment, TemplateError, split_template};
use crate::{BoxError, ConfigValue, VariableContext};

fn sandbox<'source>(undefined: UndefinedBehavior) -> Environment<'source> {
    let mut env = Environment::new();
    env.set_undefined_behavior(undefined);
    env
}

fn evaluate<'source>(
    env: &Environment<'source>,
    expression: &'source str,
    variables: &VariableContext,
) -> Result<TemplateValue, BoxError> {
    let value = env.compile_expression(expression)?.eval(variables)?;
    if value.is_undefined() {
        return Err(Box::new(TemplateError::Undefined {
            expression: expression.trim().to_owned(),
        }));
    }
    Ok(value)
}

/// Evaluates the payload as a single expression and returns its value.
///
/// `"#!jsv:value1 * value2"` with `value1 = 10`, `value2 = 20` resolves to the
/// number `200`; non-string results are preserved as numbers, booleans,
/// sequences or mappings. Undefined names are errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueExpression;

impl ValueExpression {
    /// Create the processor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Processor for ValueExpression {
    fn resolve(&self, payload: &str, variables: &VariableContext) -> Result<ConfigValue, BoxError> {
        let env = sandbox(UndefinedBehavior::Strict);
        let value = evaluate(&env, payload, variables)?;
        Ok(serde_json::to_value(&value)?)
    }
}

/// Expands `${expr}` placeholders inside the payload and returns a string.
///
/// `"#!jst:Hello ${name}!"` with `name = "Bob"` resolves to `"Hello Bob!"`.
/// Undefined names are errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringTemplate;

impl StringTemplate {
    /// Create the processor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Processor for StringTemplate {
    fn resolve(&self, payload: &str, variables: &VariableContext) -> Result<ConfigValue, BoxError> {
        let env = sandbox(UndefinedBehavior::Strict);
        let mut rendered = String::with_capacity(payload.len());
        for segment in split_template(payload)? {
            match segment {
                Segment::Literal(text) => rendered.push_str(&text),
                Segment::Expression(source) => {
                    let value = evaluate(&env, source, variables)?;
                    rendered.push_str(&value.to_string());
                }
            }
        }
        Ok(Value::String(rendered))
    }
}

/// Renders the payload as a full template with conditionals, loops and filters.
///
/// Undefined names render as empty text.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeneralTemplate;

impl GeneralTemplate {
    /// Create the processor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Processor for GeneralTemplate {
    fn resolve(&self, payload: &str, variables: &VariableContext) -> Result<ConfigValue, BoxError> {
        let env = sandbox(UndefinedBehavior::Lenient);
        Ok(Value::String(env.render_str(payload, variables)?))
    }
}
