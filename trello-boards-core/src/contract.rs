//! # contract: transport interface used by the board service
//!
//! The service never talks HTTP itself. It depends on a [`TrelloApi`]
//! implementor exposing two primitives, `get` and `post`, which resolve a
//! path relative to the API root and return the parsed JSON body.
//!
//! Authentication, base URL and timeouts are the implementor's business.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so tests (in this crate and in
//!   dependents with the `test-export-mocks` feature) can use `MockTrelloApi`.

use async_trait::async_trait;
use serde_json::{Map, Value};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Error returned by a transport implementation (network, HTTP status, body decoding).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Minimal REST surface the board service needs from a Trello client.
///
/// Paths are relative to the API root and start with `/`, e.g. `/boards/abc`.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait TrelloApi: Send + Sync {
    /// Issue a GET request and return the parsed JSON body.
    async fn get(&self, path: &str) -> Result<Value, TransportError>;

    /// Issue a POST request with `data` as the request body and return the parsed JSON body.
    async fn post(&self, path: &str, data: Map<String, Value>) -> Result<Value, TransportError>;
}
