//! Shared test fixtures for integration tests.
//!
//! Populates a temporary directory with the `test` and `test-itpl`
//! configuration families used across the session flows.

use anyhow::Result;
use layered_config::VariableContext;
use serde_json::json;
use test_helpers::fixtures::ConfigDir;

/// Base name of the plain configuration family.
pub const BASE: &str = "test";

/// Base name of the interpolated configuration family.
pub const ITPL_BASE: &str = "test-itpl";

/// Write the JSON and TOML fixture files into a fresh directory.
pub fn populated_dir() -> Result<ConfigDir> {
    let dir = ConfigDir::new()?;
    dir.write_json(
        "test.default.json",
        &json!({
            "key1": {
                "key1_1": {"key1_1_1": "value1_1_1", "key1_1_2": "value1_1_2"}
            }
        }),
    )?;
    dir.write_json(
        "test.production.json",
        &json!({
            "key1": {
                "key1_1": {"key1_1_2": "value1_1_2_override"},
                "key1_3": "original2"
            }
        }),
    )?;
    dir.write_json(
        "test.development.json",
        &json!({"key1": {"key1_2": "original1"}, "key1_4": "dev only"}),
    )?;
    dir.write_toml(
        "test.default.toml",
        concat!(
            "[key1]\n",
            "key1_2 = \"value1_2\"\n",
            "\n",
            "[key1.key1_1]\n",
            "key1_1_1 = \"value1_1_1\"\n",
            "key1_1_2 = \"value1_1_2\"\n",
        ),
    )?;
    dir.write_toml(
        "test.development.toml",
        "key1_3 = \"reloaded for dev\"\nkey1_4 = \"new value for dev\"\n",
    )?;
    dir.write_json(
        "test-itpl.default.json",
        &json!({
            "key": "#!jst:Hello ${name}, welcome to ${place}!",
            "key2": {
                "array": [
                    "#!jst:value1: ${value1}",
                    "#!jst:value2: ${value2}",
                    "#!jst:sum: ${value1 + value2}"
                ],
                "object": {"non": "nothing", "itpl": "#!swig:{{ name }} in {{ place }}"}
            }
        }),
    )?;
    dir.write_json(
        "test-itpl.development.json",
        &json!({"key2": {"jsv1": "#!jsv:value1 * value2", "jsv2": "#!jsv:name ~ ' ' ~ place"}}),
    )?;
    Ok(dir)
}

/// Variables used by the interpolated family.
pub fn greeting_variables() -> Result<VariableContext> {
    Ok(VariableContext::try_from(json!({
        "name": "Bob",
        "place": "Sydney",
        "value1": 10,
        "value2": 20
    }))?)
}
