//! Error types shared by the payload schema and the board service.

use thiserror::Error;

use crate::contract::TransportError;

/// A payload failed its schema constraints. Raised before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid `{field}`: {reason}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `prefs.voting`.
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// The upstream call failed, or its body could not be mapped to the expected record.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("unexpected response shape from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Either side of a validate-then-send flow.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
