//! Dotted-path access into configuration trees.
//!
//! A path such as `"item.subItem.key"` addresses
//! `{"item": {"subItem": {"key": ...}}}`. Inside sequences a segment is a
//! decimal index, so `"servers.0.host"` reaches the first server's host.

use serde_json::{Map, Value};

use crate::{ConfigError, ConfigResult};

/// Resolve `path` inside `root`, returning `None` when any segment is missing.
///
/// # Examples
///
/// ```
/// use layered_config::path::get_path;
/// use serde_json::json;
///
/// let cfg = json!({"db": {"hosts": ["a", "b"]}});
/// assert_eq!(get_path(&cfg, "db.hosts.1"), Some(&json!("b")));
/// assert_eq!(get_path(&cfg, "db.port"), None);
/// ```
#[must_use]
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        _ => None,
    })
}

/// Write `value` at `path` inside `root`, creating intermediate mappings.
///
/// Scalar intermediates are replaced by mappings. Sequences are only indexed,
/// never grown.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPath`] for empty paths or segments, and for
/// sequence segments that are not an in-range index.
pub fn set_path(root: &mut Value, path: &str, value: Value) -> ConfigResult<()> {
    let Some((parents, leaf)) = split_path(path)? else {
        return Err(ConfigError::invalid_path(path, "path is empty"));
    };
    let mut cursor = root;
    for segment in parents {
        cursor = descend_or_create(cursor, segment, path)?;
    }
    ensure_container(cursor);
    match cursor {
        Value::Array(items) => {
            let slot = index_into(items, leaf, path)?;
            *slot = value;
        }
        Value::Object(map) => {
            map.insert(leaf.to_owned(), value);
        }
        _ => return Err(ConfigError::invalid_path(path, "cannot write into a scalar")),
    }
    Ok(())
}

/// Remove the value at `path` inside `root`, returning it when present.
///
/// Only mapping entries are removed; sequence elements are left in place so
/// sibling indices stay stable.
pub fn remove_path(root: &mut Value, path: &str) -> Option<Value> {
    let (parents, leaf) = split_path(path).ok()??;
    let parent = parents.into_iter().try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get_mut(index)),
        _ => None,
    })?;
    parent.as_object_mut()?.remove(leaf)
}

fn split_path(path: &str) -> ConfigResult<Option<(Vec<&str>, &str)>> {
    if path.is_empty() {
        return Ok(None);
    }
    let mut segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ConfigError::invalid_path(path, "path contains an empty segment"));
    }
    Ok(segments.pop().map(|leaf| (segments, leaf)))
}

fn ensure_container(node: &mut Value) {
    if !(node.is_object() || node.is_array()) {
        *node = Value::Object(Map::new());
    }
}

fn descend_or_create<'a>(
    node: &'a mut Value,
    segment: &str,
    path: &str,
) -> ConfigResult<&'a mut Value> {
    ensure_container(node);
    match node {
        Value::Array(items) => index_into(items, segment, path),
        Value::Object(map) => Ok(map
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()))),
        _ => Err(ConfigError::invalid_path(path, "cannot descend into a scalar")),
    }
}

fn index_into<'a>(
    items: &'a mut [Value],
    segment: &str,
    path: &str,
) -> ConfigResult<&'a mut Value> {
    let index = segment.parse::<usize>().map_err(|_| {
        ConfigError::invalid_path(path, format!("'{segment}' is not a sequence index"))
    })?;
    let len = items.len();
    items.get_mut(index).ok_or_else(|| {
        ConfigError::invalid_path(path, format!("index {index} is out of range for length {len}"))
    })
}
