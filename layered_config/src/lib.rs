//! Layered, interpolated configuration loading.
//!
//! `layered_config` reads configuration mappings from pluggable providers,
//! deep-merges them by precedence, and resolves string directives of the form
//! `"#!<token>:<payload>"` against caller-supplied variables. A
//! [`ConfigSession`] ties the pieces together and publishes each successfully
//! loaded configuration as an immutable snapshot.
//!
//! ```no_run
//! use layered_config::{ConfigSession, EnvAwareProvider, VariableContext};
//!
//! # async fn run() -> Result<(), std::sync::Arc<layered_config::ConfigError>> {
//! let provider = EnvAwareProvider::builder("config", "app")
//!     .env_flag_from_var("APP_ENV")
//!     .build()?;
//! let mut session = ConfigSession::new(provider);
//!
//! let mut vars = VariableContext::new();
//! vars.insert("name", "Bob");
//! let config = session.load(&vars).await?;
//! assert!(config.is_object());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

mod error;
pub mod interpolate;
pub mod merge;
pub mod path;
mod processor;
mod provider;
mod result_ext;
mod session;
mod variables;

pub use error::{BoxError, ConfigError};
pub use interpolate::Interpolator;
pub use processor::{
    GENERAL_TEMPLATE_TOKEN, GeneralTemplate, LEGACY_STRING_TEMPLATE_TOKEN, Processor,
    ProcessorRegistry, STRING_TEMPLATE_TOKEN, StringTemplate, VALUE_EXPRESSION_TOKEN,
    ValueExpression,
};
pub use provider::{
    ConfigProvider, DEFAULT_ENV_FLAG, DEFAULT_FLAG, EnvAwareProvider, EnvAwareProviderBuilder,
    FileFormat, FileProvider, MemoryProvider,
};
pub use result_ext::SourceResultExt;
pub use session::ConfigSession;
pub use variables::VariableContext;

/// Tree of configuration data: mappings, sequences, and scalars.
pub type ConfigValue = serde_json::Value;

/// Result type used throughout the crate.
pub type ConfigResult<T> = Result<T, Arc<ConfigError>>;
