//! Accumulates raw sources and folds them into one mapping.

use std::borrow::Cow;

use camino::Utf8PathBuf;
use serde_json::{Map, Value};
use tracing::debug;

use super::{RawSource, SourceProvenance, merge_value};

/// Builder that stacks [`RawSource`]s from lowest to highest priority.
///
/// ```rust
/// use layered_config::merge::SourceComposer;
/// use serde_json::json;
///
/// let mut composer = SourceComposer::new();
/// composer.push_default(json!({"port": 3000, "host": "localhost"}), None);
/// composer.push_environment(json!({"port": 4000}), None);
/// assert_eq!(composer.compose(), json!({"port": 4000, "host": "localhost"}));
/// ```
#[derive(Debug, Default)]
pub struct SourceComposer<'a> {
    sources: Vec<RawSource<'a>>,
}

impl<'a> SourceComposer<'a> {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Push data held from a previous load.
    pub fn push_retained(&mut self, value: &'a Value) {
        self.push_source(RawSource::new(
            SourceProvenance::Retained,
            Cow::Borrowed(value),
            None,
        ));
    }

    /// Push the default source.
    pub fn push_default(&mut self, value: Value, path: Option<Utf8PathBuf>) {
        self.push_source(RawSource::new(
            SourceProvenance::Default,
            Cow::Owned(value),
            path,
        ));
    }

    /// Push the environment-specific source.
    pub fn push_environment(&mut self, value: Value, path: Option<Utf8PathBuf>) {
        self.push_source(RawSource::new(
            SourceProvenance::Environment,
            Cow::Owned(value),
            path,
        ));
    }

    /// Push data freshly produced by a provider.
    pub fn push_loaded(&mut self, value: Value) {
        self.push_source(RawSource::new(
            SourceProvenance::Loaded,
            Cow::Owned(value),
            None,
        ));
    }

    /// Push an arbitrary source.
    pub fn push_source(&mut self, source: RawSource<'a>) {
        self.sources.push(source);
    }

    /// Returns `true` when any source of `provenance` contributed entries.
    #[must_use]
    pub fn has_entries_from(&self, provenance: SourceProvenance) -> bool {
        self.sources
            .iter()
            .any(|source| source.provenance() == provenance && !source.is_empty())
    }

    /// Fold every source into a fresh mapping, later sources winning.
    #[must_use]
    pub fn compose(self) -> Value {
        let mut merged = Value::Object(Map::new());
        for source in self.sources {
            debug!(
                provenance = ?source.provenance(),
                path = source.path().map(camino::Utf8Path::as_str),
                "applying configuration source"
            );
            merge_value(&mut merged, source.into_value());
        }
        merged
    }
}

impl<'a> IntoIterator for SourceComposer<'a> {
    type Item = RawSource<'a>;
    type IntoIter = std::vec::IntoIter<RawSource<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.into_iter()
    }
}
