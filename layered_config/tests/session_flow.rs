//! End-to-end session flows over files on disk.

mod common;

use anyhow::{Result, ensure};
use layered_config::{
    ConfigError, ConfigSession, EnvAwareProvider, MemoryProvider, VariableContext,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use test_helpers::{env, fixtures::ConfigDir};

use common::{BASE, ITPL_BASE, greeting_variables, populated_dir};

#[fixture]
fn dir() -> ConfigDir {
    populated_dir().expect("write configuration fixtures")
}

fn json_provider(dir: &ConfigDir, base: &str, env_flag: &str) -> Result<EnvAwareProvider> {
    Ok(EnvAwareProvider::builder(dir.path(), base)
        .env_flag(env_flag)
        .build()?)
}

#[rstest]
#[tokio::test]
async fn loads_production_overrides(dir: ConfigDir) -> Result<()> {
    let mut session = ConfigSession::new(json_provider(&dir, BASE, "production")?);
    let cfg = session.load(&VariableContext::new()).await?;
    ensure!(
        *cfg == json!({
            "key1": {
                "key1_1": {"key1_1_1": "value1_1_1", "key1_1_2": "value1_1_2_override"},
                "key1_3": "original2"
            }
        }),
        "unexpected configuration: {cfg}"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn env_flag_follows_environment_variable(dir: ConfigDir) -> Result<()> {
    const VAR: &str = "LAYERED_CONFIG_SESSION_FLOW_ENV";
    let _lock = env::lock();
    let _guard = env::set_var(VAR, "production");
    let provider = EnvAwareProvider::builder(dir.path(), BASE)
        .env_flag_from_var(VAR)
        .build()?;
    ensure!(provider.env_flag() == "production");
    let mut session = ConfigSession::new(provider);
    session.load(&VariableContext::new()).await?;
    ensure!(session.get("key1.key1_3") == Some(&json!("original2")));
    Ok(())
}

#[cfg(feature = "toml")]
#[rstest]
#[tokio::test]
async fn reload_after_switching_to_toml_keeps_gaps(dir: ConfigDir) -> Result<()> {
    let mut session = ConfigSession::new(json_provider(&dir, BASE, "development")?);
    let dev = session.load(&VariableContext::new()).await?;
    ensure!(dev.get("key1_4") == Some(&json!("dev only")));
    ensure!(dev.pointer("/key1/key1_2") == Some(&json!("original1")));

    let toml_provider = EnvAwareProvider::builder(dir.path(), BASE)
        .extension("toml")
        .env_flag("development")
        .build()?;
    session.set_provider(toml_provider);
    let cfg = session.reload(&VariableContext::new()).await?;
    ensure!(
        *cfg == json!({
            "key1": {
                "key1_1": {"key1_1_1": "value1_1_1", "key1_1_2": "value1_1_2"},
                "key1_2": "value1_2"
            },
            "key1_3": "reloaded for dev",
            "key1_4": "new value for dev"
        }),
        "unexpected configuration: {cfg}"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn interpolates_directives_across_files(dir: ConfigDir) -> Result<()> {
    let mut session = ConfigSession::new(json_provider(&dir, ITPL_BASE, "development")?);
    let cfg = session.load(&greeting_variables()?).await?;
    ensure!(
        *cfg == json!({
            "key": "Hello Bob, welcome to Sydney!",
            "key2": {
                "array": ["value1: 10", "value2: 20", "sum: 30"],
                "object": {"non": "nothing", "itpl": "Bob in Sydney"},
                "jsv1": 200,
                "jsv2": "Bob Sydney"
            }
        }),
        "unexpected configuration: {cfg}"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn set_item_save_and_reload_persists_env_file(dir: ConfigDir) -> Result<()> {
    let mut session = ConfigSession::new(json_provider(&dir, BASE, "production")?);
    let vars = VariableContext::new();
    session.load(&vars).await?;
    session
        .provider_mut()
        .set_item("key9.key10", json!("newly added"))?;
    session.save().await?;

    let cfg = session.reload(&vars).await?;
    ensure!(cfg.pointer("/key9/key10") == Some(&json!("newly added")));
    ensure!(
        cfg.pointer("/key1/key1_1/key1_1_2") == Some(&json!("value1_1_2_override"))
    );
    ensure!(session.provider().get_item("key9.key10", Value::Null) == json!("newly added"));

    let saved = dir.read_json("test.production.json")?;
    ensure!(saved.pointer("/key9/key10") == Some(&json!("newly added")));
    let defaults = dir.read_json("test.default.json")?;
    ensure!(defaults.get("key9").is_none(), "defaults were rewritten: {defaults}");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn modified_value_survives_reload(dir: ConfigDir) -> Result<()> {
    let mut session = ConfigSession::new(json_provider(&dir, BASE, "development")?);
    let vars = VariableContext::new();
    session.load(&vars).await?;
    session.provider_mut().set_item("key1_4", json!("modified"))?;
    session.save().await?;
    let cfg = session.reload(&vars).await?;
    ensure!(cfg.get("key1_4") == Some(&json!("modified")));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unknown_token_keeps_previous_snapshot(dir: ConfigDir) -> Result<()> {
    let mut session = ConfigSession::new(json_provider(&dir, BASE, "production")?);
    let vars = VariableContext::new();
    let before = session.load(&vars).await?;
    session.set_provider(MemoryProvider::new(json!({"key1": "#!bogus:1"})));
    let err = session.reload(&vars).await.expect_err("unknown token must fail");
    ensure!(
        err.to_string() == "unsupported interpolation method: bogus",
        "unexpected error: {err}"
    );
    ensure!(matches!(&*err, ConfigError::UnsupportedDirective { .. }));
    ensure!(session.data() == Some(&*before));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn repeated_reloads_are_stable(dir: ConfigDir) -> Result<()> {
    let mut session = ConfigSession::new(json_provider(&dir, ITPL_BASE, "development")?);
    let vars = greeting_variables()?;
    let first = session.load(&vars).await?;
    let second = session.reload(&vars).await?;
    let third = session.reload(&vars).await?;
    ensure!(first == second && second == third);
    Ok(())
}
