//! Primary error enum for configuration loading and interpolation.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Boxed error type used by providers and interpolation processors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while loading, merging, or interpolating
/// configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A provider failed to read or parse one of its raw sources.
    #[error("failed to read configuration source '{source_name}': {source}")]
    SourceRead {
        /// Name of the source, usually its path.
        source_name: String,
        /// Underlying I/O or parse failure.
        #[source]
        source: BoxError,
    },

    /// A provider failed to persist one of its sources.
    #[error("failed to write configuration source '{source_name}': {source}")]
    SourceWrite {
        /// Name of the source, usually its path.
        source_name: String,
        /// Underlying I/O or serialisation failure.
        #[source]
        source: BoxError,
    },

    /// A source produced a root value that is not a mapping.
    #[error("configuration source '{source_name}' did not produce a mapping")]
    NotAMapping {
        /// Name of the offending source.
        source_name: String,
    },

    /// No parser is available for the file extension.
    #[error("unsupported configuration file format for '{path}'")]
    UnsupportedFormat {
        /// Path whose extension was not recognised.
        path: Utf8PathBuf,
    },

    /// The provider cannot persist its configuration.
    #[error("configuration provider '{provider}' does not support saving")]
    SaveUnsupported {
        /// Name of the provider.
        provider: String,
    },

    /// A string starts with the directive marker but has no `token:` segment.
    #[error("invalid interpolation syntax: {value}")]
    DirectiveSyntax {
        /// The offending string leaf.
        value: String,
    },

    /// No processor is registered for the directive token.
    #[error("unsupported interpolation method: {token}")]
    UnsupportedDirective {
        /// Token that has no registered processor.
        token: String,
    },

    /// A processor failed to resolve its payload.
    #[error("interpolation processor '{token}' failed for payload '{payload}': {source}")]
    Processor {
        /// Token of the failing processor.
        token: String,
        /// Payload handed to the processor.
        payload: String,
        /// Failure reported by the processor.
        #[source]
        source: BoxError,
    },

    /// A processor token cannot be addressed by a directive.
    #[error("invalid processor token '{token}': {message}")]
    InvalidToken {
        /// Rejected token.
        token: String,
        /// Reason for the rejection.
        message: String,
    },

    /// A dotted configuration path could not be resolved.
    #[error("invalid configuration path '{path}': {message}")]
    InvalidPath {
        /// Dotted path supplied by the caller.
        path: String,
        /// Reason the path was rejected.
        message: String,
    },

    /// Interpolation variables were supplied as something other than a mapping.
    #[error("interpolation variables must be a mapping, found {found}")]
    InvalidVariables {
        /// Kind of value that was supplied instead.
        found: &'static str,
    },
}
