//! Shared constructors returning `Arc<ConfigError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;

use super::{BoxError, ConfigError};

impl ConfigError {
    /// Construct a [`ConfigError::SourceRead`] for `source_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::ConfigError;
    ///
    /// let io = std::io::Error::other("disk on fire");
    /// let err = ConfigError::source_read("app.default.json", io);
    /// assert!(matches!(&*err, ConfigError::SourceRead { .. }));
    /// ```
    #[must_use]
    pub fn source_read(source_name: impl Into<String>, source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::SourceRead {
            source_name: source_name.into(),
            source: source.into(),
        })
    }

    /// Construct a [`ConfigError::SourceWrite`] for `source_name`.
    #[must_use]
    pub fn source_write(source_name: impl Into<String>, source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::SourceWrite {
            source_name: source_name.into(),
            source: source.into(),
        })
    }

    /// Construct a [`ConfigError::NotAMapping`].
    #[must_use]
    pub fn not_a_mapping(source_name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::NotAMapping {
            source_name: source_name.into(),
        })
    }

    /// Construct a [`ConfigError::DirectiveSyntax`] naming the offending leaf.
    #[must_use]
    pub fn directive_syntax(value: &str) -> Arc<Self> {
        Arc::new(Self::DirectiveSyntax {
            value: value.to_owned(),
        })
    }

    /// Construct a [`ConfigError::UnsupportedDirective`] naming the token.
    #[must_use]
    pub fn unsupported_directive(token: &str) -> Arc<Self> {
        Arc::new(Self::UnsupportedDirective {
            token: token.to_owned(),
        })
    }

    /// Wrap a processor failure together with its token and payload.
    #[must_use]
    pub fn processor(token: &str, payload: &str, source: BoxError) -> Arc<Self> {
        Arc::new(Self::Processor {
            token: token.to_owned(),
            payload: payload.to_owned(),
            source,
        })
    }

    /// Construct a [`ConfigError::InvalidPath`].
    #[must_use]
    pub fn invalid_path(path: &str, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::InvalidPath {
            path: path.to_owned(),
            message: message.into(),
        })
    }

    /// Construct a [`ConfigError::UnsupportedFormat`] for `path`.
    #[must_use]
    pub fn unsupported_format(path: impl Into<Utf8PathBuf>) -> Arc<Self> {
        Arc::new(Self::UnsupportedFormat { path: path.into() })
    }
}
