//! Parsing of `#!<token>:<payload>` directive strings.

use crate::{ConfigError, ConfigResult};

/// Marker that introduces a directive inside a string leaf.
pub const DIRECTIVE_MARKER: &str = "#!";

/// A directive parsed from a string leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Token naming the processor.
    pub token: &'a str,
    /// Opaque text handed to the processor.
    pub payload: &'a str,
}

impl<'a> Directive<'a> {
    /// Parse `value`, returning `Ok(None)` when it does not start with the
    /// directive marker.
    ///
    /// The token runs from the marker to the first `:` and must not be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::interpolate::Directive;
    ///
    /// let directive = Directive::parse("#!jst:a:b")?.expect("directive");
    /// assert_eq!(directive.token, "jst");
    /// assert_eq!(directive.payload, "a:b");
    /// assert!(Directive::parse("plain text")?.is_none());
    /// # Ok::<_, std::sync::Arc<layered_config::ConfigError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DirectiveSyntax`] when the marker is present but
    /// no non-empty `token:` segment follows it.
    pub fn parse(value: &'a str) -> ConfigResult<Option<Self>> {
        let Some(body) = value.strip_prefix(DIRECTIVE_MARKER) else {
            return Ok(None);
        };
        match body.split_once(':') {
            Some((token, payload)) if !token.is_empty() => Ok(Some(Self { token, payload })),
            _ => Err(ConfigError::directive_syntax(value)),
        }
    }
}
