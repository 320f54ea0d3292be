//! Splits `${...}` string templates into literal and expression segments.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/// Failures reported while scanning or evaluating a string template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A `${` has no matching `}`.
    #[error("unterminated '${{' at position {position}")]
    Unterminated {
        /// Byte offset of the opening `$`.
        position: usize,
    },
    /// A `${}` contains no expression.
    #[error("empty expression at position {position}")]
    EmptyExpression {
        /// Byte offset of the opening `$`.
        position: usize,
    },
    /// An expression evaluated to an undefined value.
    #[error("'{expression}' is undefined")]
    Undefined {
        /// The expression as written.
        expression: String,
    },
}

/// Piece of a string template.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Segment<'a> {
    /// Text copied to the output after escape processing.
    Literal(String),
    /// Source of an embedded `${...}` expression.
    Expression(&'a str),
}

/// Split `template` into segments.
///
/// A backslash escapes `$`, `` ` `` and `\`; other backslashes are kept.
/// Braces and quoted strings inside an expression are balanced, so
/// `${ {'a': '}'}['a'] }` is a single expression.
pub(super) fn split_template(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();
    while let Some((position, c)) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&(_, next @ ('$' | '`' | '\\'))) => {
                    literal.push(next);
                    chars.next();
                }
                _ => literal.push('\\'),
            },
            '$' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                chars.next();
                let end = expression_end(&mut chars).ok_or(TemplateError::Unterminated { position })?;
                let source = template
                    .get(position + 2..end)
                    .filter(|source| !source.trim().is_empty())
                    .ok_or(TemplateError::EmptyExpression { position })?;
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Expression(source));
            }
            _ => literal.push(c),
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Consume an expression body, returning the byte offset of its closing `}`.
fn expression_end(chars: &mut Peekable<CharIndices<'_>>) -> Option<usize> {
    let mut depth = 0_usize;
    let mut quote: Option<char> = None;
    while let Some((position, c)) = chars.next() {
        if let Some(open) = quote {
            if c == '\\' {
                chars.next();
            } else if c == open {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '{' => depth += 1,
            '}' if depth == 0 => return Some(position),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}
