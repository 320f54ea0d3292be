//! Unit tests for source precedence.

use rstest::rstest;
use serde_json::{Value, json};

use super::{SourceComposer, SourceProvenance, merge, merge_reload, merge_value};

#[test]
fn disjoint_keys_form_a_union() {
    let merged = merge(json!({"a": 1, "b": {"c": true}}), json!({"d": "x"}));
    assert_eq!(merged, json!({"a": 1, "b": {"c": true}, "d": "x"}));
}

#[rstest]
#[case::string(json!("low"), json!("high"))]
#[case::number(json!(1), json!(2.5))]
#[case::null_wins(json!("low"), Value::Null)]
#[case::scalar_over_mapping(json!({"nested": 1}), json!(false))]
#[case::sequence_replaces(json!([1, 2, 3]), json!([9]))]
#[case::sequence_over_mapping(json!({"x": 1}), json!(["x"]))]
fn high_priority_leaf_wins(#[case] low: Value, #[case] high: Value) {
    let merged = merge(json!({"k": low}), json!({"k": high.clone()}));
    assert_eq!(merged["k"], high);
}

#[test]
fn nested_mappings_merge_recursively() {
    let low = json!({"k": {"a": 1, "b": {"x": 1}}});
    let high = json!({"k": {"b": {"y": 2}, "c": 3}});
    let merged = merge(low.clone(), high.clone());
    let nested = merge(low["k"].clone(), high["k"].clone());
    assert_eq!(merged["k"], nested);
    assert_eq!(merged["k"], json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
}

#[test]
fn mapping_replaces_scalar_target() {
    let mut target = json!({"k": "flat"});
    merge_value(&mut target, json!({"k": {"deep": 1}}));
    assert_eq!(target, json!({"k": {"deep": 1}}));
}

#[test]
fn environment_overrides_default_scenario() {
    let merged = merge(
        json!({"key1": {"key1_1": "a", "key1_2": "b"}}),
        json!({"key1": {"key1_2": "c"}}),
    );
    assert_eq!(merged, json!({"key1": {"key1_1": "a", "key1_2": "c"}}));
}

#[test]
fn reload_keeps_previous_values_only_in_gaps() {
    let previous = json!({"kept": "old", "shared": {"a": "old", "b": "old"}});
    let fresh = json!({"shared": {"a": "new"}, "added": 1});
    let merged = merge_reload(fresh, previous);
    assert_eq!(
        merged,
        json!({"kept": "old", "shared": {"a": "new", "b": "old"}, "added": 1})
    );
}

#[test]
fn composer_folds_in_push_order() {
    let retained = json!({"a": "retained", "b": "retained", "c": "retained"});
    let mut composer = SourceComposer::new();
    composer.push_retained(&retained);
    composer.push_default(json!({"a": "default", "b": "default"}), None);
    composer.push_environment(json!({"a": "environment"}), None);
    assert!(composer.has_entries_from(SourceProvenance::Environment));
    assert!(!composer.has_entries_from(SourceProvenance::Loaded));
    assert_eq!(
        composer.compose(),
        json!({"a": "environment", "b": "default", "c": "retained"})
    );
    assert_eq!(retained["a"], "retained", "borrowed sources stay untouched");
}

#[test]
fn empty_environment_does_not_count_as_override() {
    let mut composer = SourceComposer::new();
    composer.push_default(json!({"a": 1}), None);
    composer.push_environment(json!({}), None);
    assert!(!composer.has_entries_from(SourceProvenance::Environment));
}

#[test]
fn composer_exposes_sources_with_provenance() {
    let mut composer = SourceComposer::new();
    composer.push_default(json!({"a": 1}), Some("cfg/app.default.json".into()));
    composer.push_loaded(json!({"b": 2}));
    let sources: Vec<_> = composer
        .into_iter()
        .map(|source| {
            (
                source.provenance(),
                source.path().map(ToString::to_string),
                source.value().clone(),
            )
        })
        .collect();
    assert_eq!(
        sources,
        vec![
            (
                SourceProvenance::Default,
                Some(String::from("cfg/app.default.json")),
                json!({"a": 1}),
            ),
            (SourceProvenance::Loaded, None, json!({"b": 2})),
        ]
    );
}
