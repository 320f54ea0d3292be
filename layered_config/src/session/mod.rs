//! Stateful loading of interpolated configuration.
//!
//! A [`ConfigSession`] owns one provider and the last configuration it
//! published. Each load merges the provider's fresh data over what the session
//! already held, resolves directives against a [`VariableContext`], and only
//! then replaces the published snapshot. A failed load leaves the previous
//! snapshot in place.

use std::sync::Arc;

use tracing::{debug, info};

use crate::merge::SourceComposer;
use crate::path::get_path;
use crate::{
    ConfigError, ConfigProvider, ConfigResult, ConfigValue, Interpolator, ProcessorRegistry,
    VariableContext,
};

/// Owner of a provider and the configuration it last produced.
///
/// # Examples
///
/// ```
/// use layered_config::{ConfigSession, MemoryProvider, VariableContext};
/// use serde_json::json;
///
/// # tokio::runtime::Builder::new_current_thread().build().map_err(anyhow::Error::from)?.block_on(async {
/// let provider = MemoryProvider::new(json!({"greeting": "#!jst:Hello ${name}!"}));
/// let mut session = ConfigSession::new(provider);
///
/// let mut vars = VariableContext::new();
/// vars.insert("name", "Bob");
/// session.load(&vars).await?;
/// assert_eq!(session.get("greeting"), Some(&json!("Hello Bob!")));
/// # Ok::<(), anyhow::Error>(())
/// # })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct ConfigSession {
    provider: Box<dyn ConfigProvider>,
    registry: Arc<ProcessorRegistry>,
    interpolate: bool,
    data: Option<Arc<ConfigValue>>,
}

impl ConfigSession {
    /// Create an unloaded session over `provider` using the built-in
    /// processors.
    #[must_use]
    pub fn new(provider: impl ConfigProvider + 'static) -> Self {
        Self::with_registry(provider, Arc::new(ProcessorRegistry::builtin()))
    }

    /// Create an unloaded session resolving directives with `registry`.
    #[must_use]
    pub fn with_registry(
        provider: impl ConfigProvider + 'static,
        registry: Arc<ProcessorRegistry>,
    ) -> Self {
        Self {
            provider: Box::new(provider),
            registry,
            interpolate: true,
            data: None,
        }
    }

    /// Enable or disable directive resolution. When disabled, directive
    /// strings are published verbatim.
    pub const fn set_interpolation(&mut self, enabled: bool) {
        self.interpolate = enabled;
    }

    /// Returns `true` when loads resolve directives.
    #[must_use]
    pub const fn interpolation_enabled(&self) -> bool {
        self.interpolate
    }

    /// Registry used to resolve directives.
    #[must_use]
    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    /// Load from the current provider and publish the result.
    ///
    /// Fresh provider data wins over previously published values, which only
    /// fill gaps. Directives are resolved on a private copy, so nothing is
    /// published unless every directive succeeds.
    ///
    /// # Errors
    ///
    /// Propagates provider failures, returns [`ConfigError::NotAMapping`] when
    /// the provider yields a non-mapping root, and returns directive or
    /// processor errors from interpolation. The previous data stays published
    /// on every error.
    pub async fn load(&mut self, variables: &VariableContext) -> ConfigResult<Arc<ConfigValue>> {
        let fresh = self.provider.load().await?;
        if !fresh.is_object() {
            return Err(ConfigError::not_a_mapping(self.provider.name()));
        }

        let mut composer = SourceComposer::new();
        if let Some(previous) = self.data.as_deref() {
            composer.push_retained(previous);
        }
        composer.push_loaded(fresh);
        let mut candidate = composer.compose();
        if self.interpolate {
            Interpolator::new(&self.registry).interpolate(&mut candidate, variables)?;
        } else {
            debug!(provider = self.provider.name(), "interpolation disabled; publishing raw data");
        }

        let published = Arc::new(candidate);
        self.data = Some(Arc::clone(&published));
        info!(provider = self.provider.name(), "configuration published");
        Ok(published)
    }

    /// Reload from the current provider.
    ///
    /// Identical to [`load`](Self::load); the separate name records intent
    /// after a provider swap or an external file change.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub async fn reload(&mut self, variables: &VariableContext) -> ConfigResult<Arc<ConfigValue>> {
        debug!(provider = self.provider.name(), "reloading configuration");
        self.load(variables).await
    }

    /// Last published configuration, if any.
    #[must_use]
    pub fn data(&self) -> Option<&ConfigValue> {
        self.data.as_deref()
    }

    /// Shared handle to the last published configuration.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<ConfigValue>> {
        self.data.clone()
    }

    /// Read the value at dotted `path` in the published configuration.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        self.data().and_then(|data| get_path(data, path))
    }

    /// Replace the backing provider, returning the previous one.
    ///
    /// Published data is kept and seeds the next load.
    pub fn set_provider(
        &mut self,
        provider: impl ConfigProvider + 'static,
    ) -> Box<dyn ConfigProvider> {
        debug!(provider = provider.name(), "switching configuration provider");
        std::mem::replace(&mut self.provider, Box::new(provider))
    }

    /// Current provider.
    #[must_use]
    pub fn provider(&self) -> &dyn ConfigProvider {
        self.provider.as_ref()
    }

    /// Mutable access to the current provider, for `set_item` edits.
    pub fn provider_mut(&mut self) -> &mut dyn ConfigProvider {
        self.provider.as_mut()
    }

    /// Persist the provider's data.
    ///
    /// # Errors
    ///
    /// Propagates the provider's save failure, including
    /// [`ConfigError::SaveUnsupported`].
    pub async fn save(&self) -> ConfigResult<()> {
        self.provider.save().await
    }
}

impl std::fmt::Debug for ConfigSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSession")
            .field("provider", &self.provider.name())
            .field("registry", &self.registry)
            .field("interpolate", &self.interpolate)
            .field("loaded", &self.data.is_some())
            .finish()
    }
}
