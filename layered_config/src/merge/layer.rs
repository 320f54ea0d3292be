//! Raw sources and their provenance.

use std::borrow::Cow;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

/// Where a raw source came from, in increasing order of precedence within a
/// single load.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SourceProvenance {
    /// Data held from a previous load, used to fill gaps on reload.
    Retained,
    /// The default, environment-independent source.
    Default,
    /// The environment-specific override.
    Environment,
    /// Data freshly produced by a provider.
    Loaded,
}

/// One unmerged configuration mapping read from a single location.
#[derive(Clone, Debug)]
pub struct RawSource<'a> {
    provenance: SourceProvenance,
    value: Cow<'a, Value>,
    path: Option<Utf8PathBuf>,
}

impl<'a> RawSource<'a> {
    /// Construct a source with the given provenance.
    #[must_use]
    pub const fn new(
        provenance: SourceProvenance,
        value: Cow<'a, Value>,
        path: Option<Utf8PathBuf>,
    ) -> Self {
        Self {
            provenance,
            value,
            path,
        }
    }

    /// Returns the provenance of the source.
    #[must_use]
    pub const fn provenance(&self) -> SourceProvenance {
        self.provenance
    }

    /// Returns the path the source was read from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Borrow the source's value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns `true` when the source holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self.value.as_ref() {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }

    /// Returns an owned value; borrowed sources are cloned, never mutated.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value.into_owned()
    }
}
