//! Tests for input and settings resolution

use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const OVERRIDES: [&str; 6] = [
    ENV_API_URL,
    ENV_WEB_URL,
    ENV_REPOSITORY,
    ENV_INSTALL_DIR,
    ENV_KEY_DIR,
    ENV_STEP_DEBUG,
];

fn clear_overrides() {
    for key in OVERRIDES {
        env::remove_var(key);
    }
}

#[test]
fn test_input_env_key_follows_runner_convention() {
    assert_eq!(InputLoader::env_key("file_path"), "INPUT_FILE_PATH");
    assert_eq!(InputLoader::env_key("ejson version"), "INPUT_EJSON_VERSION");
}

#[test]
#[serial]
fn test_inputs_from_env_are_trimmed() {
    env::set_var("INPUT_ACTION", "  decrypt \n");
    env::set_var("INPUT_FILE_PATH", "secrets.ejson");
    env::remove_var("INPUT_PRIVATE_KEY");
    env::remove_var("INPUT_OUT_FILE");
    env::set_var("INPUT_EJSON_VERSION", "latest");

    let inputs = ActionInputs::from_env();

    env::remove_var("INPUT_ACTION");
    env::remove_var("INPUT_FILE_PATH");
    env::remove_var("INPUT_EJSON_VERSION");

    assert_eq!(inputs.action, "decrypt");
    assert_eq!(inputs.file_path, "secrets.ejson");
    assert_eq!(inputs.private_key, "");
    assert_eq!(inputs.out_file, "");
    assert_eq!(inputs.ejson_version, "latest");
}

#[test]
#[serial]
fn test_settings_defaults() {
    clear_overrides();
    let settings = ActionSettings::from_env().unwrap();

    assert_eq!(settings.source.api_base, "https://api.github.com");
    assert_eq!(settings.source.web_base, "https://github.com");
    assert_eq!(settings.source.owner, "Shopify");
    assert_eq!(settings.source.repo, "ejson");
    assert_eq!(settings.paths.binary_path(), PathBuf::from("/usr/local/bin/ejson"));
    assert_eq!(
        settings.paths.archive_path(),
        PathBuf::from("/usr/local/bin/ejson.tar.gz")
    );
    assert_eq!(settings.paths.key_dir, PathBuf::from("/opt/ejson/keys"));
    assert!(!settings.debug);
}

#[test]
#[serial]
fn test_settings_overrides() {
    clear_overrides();
    env::set_var(ENV_API_URL, "http://127.0.0.1:9000");
    env::set_var(ENV_WEB_URL, "http://127.0.0.1:9001");
    env::set_var(ENV_REPOSITORY, "acme/ejson-fork");
    env::set_var(ENV_INSTALL_DIR, "/tmp/bin");
    env::set_var(ENV_KEY_DIR, "/tmp/keys");
    env::set_var(ENV_STEP_DEBUG, "true");

    let settings = ActionSettings::from_env();
    clear_overrides();
    let settings = settings.unwrap();

    assert_eq!(settings.source.api_base, "http://127.0.0.1:9000");
    assert_eq!(settings.source.web_base, "http://127.0.0.1:9001");
    assert_eq!(settings.source.owner, "acme");
    assert_eq!(settings.source.repo, "ejson-fork");
    assert_eq!(settings.paths.install_dir, PathBuf::from("/tmp/bin"));
    assert_eq!(settings.paths.key_dir, PathBuf::from("/tmp/keys"));
    assert!(settings.debug);
}

#[test]
#[serial]
fn test_step_debug_requires_exact_true() {
    clear_overrides();
    env::set_var(ENV_STEP_DEBUG, "1");
    assert!(!is_step_debug());
    env::set_var(ENV_STEP_DEBUG, "TRUE");
    assert!(!is_step_debug());
    env::set_var(ENV_STEP_DEBUG, "true");
    assert!(is_step_debug());
    clear_overrides();
}

#[test]
#[serial]
fn test_invalid_repository_override_rejected() {
    clear_overrides();
    env::set_var(ENV_REPOSITORY, "just-a-name");
    let result = ActionSettings::from_env();
    clear_overrides();
    assert!(matches!(result, Err(crate::errors::ActionError::ConfigError(_))));
}

#[test]
fn test_validate_rejects_non_http_base() {
    let mut settings = ActionSettings::default();
    settings.source.api_base = "ftp://example.com".to_string();
    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_deserialize_with_defaults() {
    let settings: ActionSettings = serde_json::from_str(
        r#"{"source": {"owner": "acme", "repo": "ejson"}, "paths": {"key_dir": "/keys"}}"#,
    )
    .unwrap();
    assert_eq!(settings.source.api_base, "https://api.github.com");
    assert_eq!(settings.source.asset_suffix, "linux_amd64.tar.gz");
    assert_eq!(settings.paths.install_dir, PathBuf::from("/usr/local/bin"));
    assert_eq!(settings.paths.key_dir, PathBuf::from("/keys"));
}
