//! Unit tests for directive parsing and the breadth-first walker.

use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::{Directive, Interpolator};
use crate::{BoxError, ConfigError, ProcessorRegistry, VariableContext};

#[fixture]
fn registry() -> ProcessorRegistry {
    ProcessorRegistry::builtin()
}

#[fixture]
fn variables() -> VariableContext {
    VariableContext::try_from(json!({
        "name": "Bob",
        "place": "Sydney",
        "value1": 10,
        "value2": 20,
    }))
    .expect("fixture variables form a mapping")
}

#[rstest]
#[case::plain("hello", None)]
#[case::hash_only("#not a directive", None)]
#[case::simple("#!jsv:1+2", Some(("jsv", "1+2")))]
#[case::empty_payload("#!jst:", Some(("jst", "")))]
#[case::colon_in_payload("#!jst:a:b", Some(("jst", "a:b")))]
fn parses_directives(#[case] input: &str, #[case] expected: Option<(&str, &str)>) {
    let parsed = Directive::parse(input).expect("valid input");
    assert_eq!(
        parsed.map(|directive| (directive.token, directive.payload)),
        expected
    );
}

#[rstest]
#[case::no_colon("#!noColonHere")]
#[case::empty_token("#!:payload")]
#[case::marker_only("#!")]
fn rejects_malformed_directives(#[case] input: &str) {
    let err = Directive::parse(input).expect_err("malformed directive");
    assert!(
        matches!(&*err, ConfigError::DirectiveSyntax { value } if value == input),
        "unexpected error: {err}"
    );
}

#[rstest]
fn resolves_nested_mappings_and_sequences(registry: ProcessorRegistry, variables: VariableContext) {
    let mut cfg = json!({
        "key": "#!jst:Hello ${name}, welcome to ${place}!",
        "key2": {
            "array": [
                "#!jst:value1: ${value1}",
                "#!jst:value2: ${value2}",
                "#!jst:sum: ${value1 + value2}",
            ],
            "object": {"non": "nothing", "itpl": "#!swig:{{ name }}"},
            "jsv1": "#!jsv:value1 * value2",
            "jsv2": "#!jsv:name ~ ' ' ~ place",
        },
        "untouched": [1, true, null],
    });
    Interpolator::new(&registry)
        .interpolate(&mut cfg, &variables)
        .expect("interpolation succeeds");
    assert_eq!(
        cfg,
        json!({
            "key": "Hello Bob, welcome to Sydney!",
            "key2": {
                "array": ["value1: 10", "value2: 20", "sum: 30"],
                "object": {"non": "nothing", "itpl": "Bob"},
                "jsv1": 200,
                "jsv2": "Bob Sydney",
            },
            "untouched": [1, true, null],
        })
    );
}

#[rstest]
fn sum_directive_yields_number_with_any_variables(registry: ProcessorRegistry, variables: VariableContext) {
    for vars in [VariableContext::new(), variables] {
        let mut cfg = json!({"sum": "#!jsv:1+2"});
        Interpolator::new(&registry)
            .interpolate(&mut cfg, &vars)
            .expect("interpolation succeeds");
        assert_eq!(cfg["sum"], json!(3));
    }
}

#[rstest]
fn replacements_are_not_walked_again(mut registry: ProcessorRegistry) {
    registry
        .register("emit", |payload: &str, _: &VariableContext| {
            Ok::<_, BoxError>(json!({ "inner": payload }))
        })
        .expect("token is valid");
    let mut cfg = json!({"leaf": "#!emit:#!jsv:1+2"});
    Interpolator::new(&registry)
        .interpolate(&mut cfg, &VariableContext::new())
        .expect("interpolation succeeds");
    assert_eq!(cfg, json!({"leaf": {"inner": "#!jsv:1+2"}}));
}

#[test]
fn visits_levels_breadth_first() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut registry = ProcessorRegistry::empty();
    registry
        .register("mark", move |payload: &str, _: &VariableContext| {
            sink.lock().map_err(|e| e.to_string())?.push(payload.to_owned());
            Ok::<_, BoxError>(Value::from(payload))
        })
        .expect("token is valid");
    let mut cfg = json!({
        "a": {"b": {"c": "#!mark:depth3"}, "d": "#!mark:depth2"},
        "e": "#!mark:depth1",
    });
    Interpolator::new(&registry)
        .interpolate(&mut cfg, &VariableContext::new())
        .expect("interpolation succeeds");
    let order = seen.lock().expect("mutex is not poisoned").clone();
    assert_eq!(order, vec!["depth1", "depth2", "depth3"]);
}

#[rstest]
fn unknown_token_names_the_token(registry: ProcessorRegistry) {
    let mut cfg = json!({"x": "#!zzz:anything"});
    let err = Interpolator::new(&registry)
        .interpolate(&mut cfg, &VariableContext::new())
        .expect_err("unknown token must fail");
    assert!(
        matches!(&*err, ConfigError::UnsupportedDirective { token } if token == "zzz"),
        "unexpected error: {err}"
    );
    assert_eq!(err.to_string(), "unsupported interpolation method: zzz");
}

#[rstest]
fn processor_failure_carries_payload(registry: ProcessorRegistry) {
    let mut cfg = json!({"x": "#!jsv:1 +"});
    let err = Interpolator::new(&registry)
        .interpolate(&mut cfg, &VariableContext::new())
        .expect_err("bad expression must fail");
    assert!(
        matches!(&*err, ConfigError::Processor { token, payload, .. } if token == "jsv" && payload == "1 +"),
        "unexpected error: {err}"
    );
}

#[rstest]
fn failure_keeps_earlier_mutations(registry: ProcessorRegistry) {
    let mut cfg = json!({"first": "#!jsv:1+2", "nested": {"bad": "#!noColonHere"}});
    let result = Interpolator::new(&registry).interpolate(&mut cfg, &VariableContext::new());
    assert!(result.is_err());
    assert_eq!(cfg["first"], json!(3), "no rollback of resolved leaves");
}

#[rstest]
fn scalar_root_is_left_alone(registry: ProcessorRegistry) {
    let mut cfg = json!("#!jsv:1+2");
    Interpolator::new(&registry)
        .interpolate(&mut cfg, &VariableContext::new())
        .expect("scalar roots are ignored");
    assert_eq!(cfg, json!("#!jsv:1+2"));
}

#[rstest]
fn resolves_deeply_nested_leaves(registry: ProcessorRegistry) {
    let mut cfg = json!("#!jsv:1+2");
    for _ in 0..1_000 {
        cfg = json!([cfg]);
    }
    let mut root = json!({"deep": cfg});
    Interpolator::new(&registry)
        .interpolate(&mut root, &VariableContext::new())
        .expect("deep trees interpolate");
    let mut cursor = &root["deep"];
    while let Some(inner) = cursor.get(0) {
        cursor = inner;
    }
    assert_eq!(cursor, &json!(3));
}
