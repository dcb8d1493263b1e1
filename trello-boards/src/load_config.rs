/// `load_config` module: Loads a static YAML config and injects API secrets from the environment.
///
/// The YAML file never holds credentials. It only tunes the client (base URL,
/// timeout) and the default member used when listing boards:
///
/// ```yaml
/// api:
///   base_url: https://api.trello.com/1
///   timeout_secs: 30
/// member: me
/// ```
///
/// `TRELLO_API_KEY` and `TRELLO_API_TOKEN` are read from the process
/// environment (`main` loads `.env` first). `TRELLO_BASE_URL` is used when the
/// file does not set `api.base_url`. All errors use `anyhow::Error` and are
/// surfaced at the CLI boundary.
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};
use trello_boards_core::DEFAULT_MEMBER;

use crate::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Fully merged configuration: static file settings plus secrets.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub client: ClientConfig,
    pub member: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    member: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiSection {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

/// Loads a static YAML config file (no secrets) and injects required env vars for secrets.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    merge_with_env(raw)
}

/// Configuration when no file is given: defaults plus env secrets.
pub fn default_config() -> Result<CliConfig> {
    merge_with_env(RawConfig::default())
}

fn merge_with_env(raw: RawConfig) -> Result<CliConfig> {
    let api_key = required_env("TRELLO_API_KEY")?;
    let api_token = required_env("TRELLO_API_TOKEN")?;

    let timeout_secs = raw.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be greater than zero");
    }

    let client = ClientConfig {
        base_url: raw
            .api
            .base_url
            .or_else(|| std::env::var("TRELLO_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        api_key,
        api_token,
        timeout_secs,
    };
    let member = raw.member.unwrap_or_else(|| DEFAULT_MEMBER.to_string());

    info!(
        base_url = %client.base_url,
        timeout_secs = client.timeout_secs,
        member = %member,
        "Config loaded and merged successfully"
    );

    Ok(CliConfig { client, member })
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            info!("{name} found in env");
            Ok(value)
        }
        Ok(_) => {
            error!(var = name, "Environment variable is empty");
            Err(anyhow::anyhow!("{name} environment variable is empty"))
        }
        Err(e) => {
            error!(error = ?e, var = name, "Environment variable not set");
            Err(anyhow::anyhow!("{name} environment variable not set: {e}"))
        }
    }
}
