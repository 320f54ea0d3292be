//! Precedence rules for combining configuration sources.
//!
//! Sources are plain [`serde_json::Value`] trees. Mappings merge recursively;
//! every other kind of value, sequences included, is replaced wholesale by the
//! higher-priority side.
//!
//! # Example
//!
//! ```rust
//! use layered_config::merge::{merge, merge_reload};
//! use serde_json::json;
//!
//! let defaults = json!({"key1": {"key1_1": "a", "key1_2": "b"}});
//! let production = json!({"key1": {"key1_2": "c"}});
//! let merged = merge(defaults, production);
//! assert_eq!(merged, json!({"key1": {"key1_1": "a", "key1_2": "c"}}));
//!
//! // On reload the fresh data wins and the previous data only fills gaps.
//! let reloaded = merge_reload(json!({"key1": {"key1_2": "d"}}), merged);
//! assert_eq!(reloaded, json!({"key1": {"key1_1": "a", "key1_2": "d"}}));
//! ```

mod composer;
mod layer;

pub use composer::SourceComposer;
pub use layer::{RawSource, SourceProvenance};

use serde_json::map::Entry;
use serde_json::{Map, Value};

/// Merge `high_priority` over `low_priority`, returning the combined tree.
///
/// Keys present on only one side are kept unchanged. For keys present on both
/// sides, two mappings merge recursively and anything else resolves to the
/// high-priority value, so `null` and sequences replace rather than combine.
#[must_use]
pub fn merge(low_priority: Value, high_priority: Value) -> Value {
    let mut merged = low_priority;
    merge_value(&mut merged, high_priority);
    merged
}

/// Combine freshly loaded data with the data held before a reload.
///
/// The fresh load has priority; `previously_held` only fills the gaps it leaves,
/// so runtime additions survive a reload unless the source redefines them.
#[must_use]
pub fn merge_reload(newly_loaded: Value, previously_held: Value) -> Value {
    merge(previously_held, newly_loaded)
}

/// Fold one source into the accumulated configuration in place.
///
/// This is the step [`SourceComposer`] repeats for every pushed source, so a
/// reload folds the retained snapshot first and the provider's fresh data on
/// top. An incoming mapping walks into the accumulator key by key, turning a
/// non-mapping slot into an empty mapping before filling it. Any other
/// incoming value, a sequence included, takes the slot as it stands.
///
/// # Examples
///
/// ```rust
/// use layered_config::merge::merge_value;
/// use serde_json::json;
///
/// let mut retained = json!({"db": {"host": "old", "pool": 4}, "tags": ["a"]});
/// merge_value(&mut retained, json!({"db": {"host": "new"}, "tags": ["b", "c"]}));
/// assert_eq!(
///     retained,
///     json!({"db": {"host": "new", "pool": 4}, "tags": ["b", "c"]})
/// );
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match layer {
        Value::Object(entries) => overlay_entries(target, entries),
        replacement => *target = replacement,
    }
}

fn overlay_entries(target: &mut Value, entries: Map<String, Value>) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(existing) = target else {
        return;
    };
    for (key, incoming) in entries {
        match existing.entry(key) {
            Entry::Occupied(mut slot) => merge_value(slot.get_mut(), incoming),
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
        }
    }
}

#[cfg(test)]
mod tests;
