//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, reset behavior and the
//! handling of the API token.

use ghcard::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use ghcard::types::errors::SettingsError;
use ghcard::types::settings::{ApiToken, ClientSettings, DEFAULT_API_BASE_URL};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

/// Without a config file the client talks to the public GitHub API.
#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.timeout_secs, 10);
    assert!(settings.user_agent.starts_with("ghcard/"));
}

/// A change made through `set_value` is visible to a fresh engine reading the same file.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value(
                "api_base_url",
                serde_json::Value::String("http://127.0.0.1:9999".to_string()),
            )
            .unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.api_base_url, "http://127.0.0.1:9999");
}

/// `reset` restores defaults both in memory and on disk.
#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.set_value("timeout_secs", serde_json::json!(30)).unwrap();
    engine.set_value("repos_per_page", serde_json::json!(100)).unwrap();

    engine.reset().unwrap();
    assert_eq!(engine.get_settings().timeout_secs, 10);
    assert_eq!(engine.get_settings().repos_per_page, None);

    let mut reloaded = engine_in_temp(&dir);
    let settings = reloaded.load().unwrap();
    assert_eq!(settings.timeout_secs, 10);
}

/// A partial file only overrides the keys it names.
#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"timeout_secs": 3}"#).unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    let settings = engine.load().unwrap();

    assert_eq!(settings.timeout_secs, 3);
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_unknown_and_empty_keys_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    assert!(matches!(
        engine.set_value("", serde_json::json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("no_such_key", serde_json::json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    // The token is not part of the persisted settings.
    assert!(matches!(
        engine.set_value("token", serde_json::json!("ghp_x")),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_wrong_type_rejected_and_settings_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("timeout_secs", serde_json::json!("ten"));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    assert_eq!(engine.get_settings().timeout_secs, 10);
}

/// In-memory overrides are not written until something saves.
#[test]
fn test_settings_mut_is_not_persisted_until_save() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.settings_mut().api_base_url = "http://localhost:1".to_string();

    assert!(!std::path::Path::new(engine.get_config_path()).exists());

    engine.save().unwrap();
    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap().api_base_url, "http://localhost:1");
}

#[test]
fn test_token_survives_set_value_and_reset_but_not_disk() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.settings_mut().token = Some(ApiToken::new("ghp_secret_value"));

    engine.set_value("timeout_secs", serde_json::json!(5)).unwrap();
    assert_eq!(
        engine.get_settings().token.as_ref().map(|t| t.expose()),
        Some("ghp_secret_value")
    );

    engine.reset().unwrap();
    assert!(engine.get_settings().token.is_some());

    let on_disk = std::fs::read_to_string(engine.get_config_path()).unwrap();
    assert!(!on_disk.contains("ghp_secret_value"));
}

#[test]
fn test_token_debug_is_redacted() {
    let settings = ClientSettings {
        token: Some(ApiToken::new("ghp_secret_value")),
        ..ClientSettings::default()
    };
    let debug = format!("{:?}", settings);
    assert!(!debug.contains("ghp_secret_value"));
    assert!(debug.contains("ApiToken(***)"));
}
