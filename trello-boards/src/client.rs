#![doc = "Trello HTTP client: implements the core transport contract on top of reqwest."]
//
//! # Trello client (CLI <-> Core)
//!
//! This module provides the bridge between the CLI and the transport
//! abstraction in [`trello_boards_core::contract`]. [`TrelloClient`] wires the
//! `TrelloApi` trait to the real REST API.
//!
//! ## Client Usage
//!
//! - Construct [`TrelloClient`] from a [`ClientConfig`], or from environment
//!   variables (`TRELLO_API_KEY`, `TRELLO_API_TOKEN`, optional `TRELLO_BASE_URL`).
//! - Hand it to [`trello_boards_core::BoardService`].
//! - Credentials travel in the `Authorization: OAuth ...` header, never in
//!   the URL, so transport errors and logs cannot echo them.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::{Map, Value};
use trello_boards_core::contract::{TransportError, TrelloApi};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything needed to reach the API.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_token: String,
    pub timeout_secs: u64,
}

// Keep credentials out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key_set", &!self.api_key.is_empty())
            .field("api_token_set", &!self.api_token.is_empty())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

pub struct TrelloClient {
    http: Client,
    base_url: String,
    authorization: String,
}

impl TrelloClient {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to build HTTP client");
                e
            })?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        tracing::info!(
            base_url = %base_url,
            timeout_secs = config.timeout_secs,
            "Initialized TrelloClient"
        );
        Ok(TrelloClient {
            http,
            base_url,
            authorization: format!(
                "OAuth oauth_consumer_key=\"{}\", oauth_token=\"{}\"",
                config.api_key, config.api_token
            ),
        })
    }

    pub fn new_from_env() -> Result<Self, TransportError> {
        dotenvy::dotenv().ok();
        match (env::var("TRELLO_API_KEY"), env::var("TRELLO_API_TOKEN")) {
            (Ok(api_key), Ok(api_token)) => {
                let base_url =
                    env::var("TRELLO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
                Self::new(ClientConfig {
                    base_url,
                    api_key,
                    api_token,
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                })
            }
            (Err(e), _) => {
                tracing::error!(error = ?e, "TRELLO_API_KEY missing in environment");
                Err(format!("TRELLO_API_KEY: {e}").into())
            }
            (_, Err(e)) => {
                tracing::error!(error = ?e, "TRELLO_API_TOKEN missing in environment");
                Err(format!("TRELLO_API_TOKEN: {e}").into())
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/boards/abc`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url_for(path))
            .header(AUTHORIZATION, &self.authorization)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<Value, TransportError> {
        let resp = req.send().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!(error = %e, %method, path, "Request to Trello failed");
            e
        })?;
        read_json(method, path, resp).await
    }
}

async fn read_json(method: Method, path: &str, resp: Response) -> Result<Value, TransportError> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
        tracing::error!(
            %status,
            %method,
            path,
            "Trello API returned error. Response body: {text}"
        );
        return Err(format!("{method} {path} returned {status}: {text}").into());
    }
    let body = resp.json::<Value>().await.map_err(|e| {
        let e = e.without_url();
        tracing::error!(error = %e, %method, path, "Trello API returned a non-JSON body");
        e
    })?;
    tracing::debug!(%status, %method, path, "Trello API call succeeded");
    Ok(body)
}

#[async_trait]
impl TrelloApi for TrelloClient {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        let req = self.request(Method::GET, path);
        self.send(Method::GET, path, req).await
    }

    async fn post(&self, path: &str, data: Map<String, Value>) -> Result<Value, TransportError> {
        let req = self.request(Method::POST, path).json(&data);
        self.send(Method::POST, path, req).await
    }
}
