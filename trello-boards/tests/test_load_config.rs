use serial_test::serial;
use std::env;
use std::fs::write;
use tempfile::NamedTempFile;

fn set_secrets() {
    env::set_var("TRELLO_API_KEY", "test-key");
    env::set_var("TRELLO_API_TOKEN", "top-secret-test-token");
}

/// A static config plus env secrets produces a merged CliConfig.
#[tokio::test]
#[serial]
async fn test_load_config_success_injects_env_secrets() {
    let config_yaml = r#"
api:
  base_url: "https://trello.example.test/1/"
  timeout_secs: 12
member: alice
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();
    set_secrets();

    let config =
        trello_boards::load_config::load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.client.base_url, "https://trello.example.test/1/");
    assert_eq!(config.client.timeout_secs, 12);
    assert_eq!(config.client.api_key, "test-key");
    assert_eq!(config.client.api_token, "top-secret-test-token");
    assert_eq!(config.member, "alice");
}

/// Omitted sections fall back to the public API and the authenticated member.
#[tokio::test]
#[serial]
async fn test_load_config_defaults() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "api: {}\n").unwrap();
    set_secrets();
    env::remove_var("TRELLO_BASE_URL");

    let config =
        trello_boards::load_config::load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.client.base_url, trello_boards::client::DEFAULT_BASE_URL);
    assert_eq!(
        config.client.timeout_secs,
        trello_boards::client::DEFAULT_TIMEOUT_SECS
    );
    assert_eq!(config.member, "me");
}

/// Missing secrets make the loader fail and name the variable.
#[tokio::test]
#[serial]
async fn test_load_config_errors_on_missing_env() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "member: me\n").unwrap();

    env::remove_var("TRELLO_API_KEY");
    env::remove_var("TRELLO_API_TOKEN");

    let err = trello_boards::load_config::load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();

    assert!(
        msg.contains("TRELLO_API_KEY") || msg.contains("TRELLO_API_TOKEN"),
        "Must error for missing env var, got: {msg}"
    );
}

/// Invalid YAML is reported as a parse error.
#[tokio::test]
#[serial]
async fn test_load_config_errors_for_invalid_file() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();
    set_secrets();

    let err = trello_boards::load_config::load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[tokio::test]
#[serial]
async fn test_load_config_rejects_unknown_keys_and_zero_timeout() {
    set_secrets();

    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "api:\n  token: inline-secret\n").unwrap();
    assert!(trello_boards::load_config::load_config(config_file.path()).is_err());

    write(config_file.path(), "api:\n  timeout_secs: 0\n").unwrap();
    let err = trello_boards::load_config::load_config(config_file.path()).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"), "got: {err}");
}

#[tokio::test]
#[serial]
async fn test_load_config_missing_file() {
    set_secrets();
    let err =
        trello_boards::load_config::load_config("/nonexistent/trello-boards.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"), "got: {err}");
}
