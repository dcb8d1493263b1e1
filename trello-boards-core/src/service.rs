//! Board operations on top of a [`TrelloApi`] transport.
//!
//! Each method is a single stateless request/response cycle: build the
//! path, issue one call, map the JSON into typed records. Nothing is cached
//! and nothing is retried; failures surface as [`UpstreamError`].
//!
//! Ids are percent-encoded as single path segments, so an id containing
//! `/` or `?` cannot address a different resource.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};
use urlencoding::encode;

use crate::contract::TrelloApi;
use crate::error::UpstreamError;
use crate::models::{Board, Label};
use crate::payload::CreateBoardPayload;

/// Member id the API resolves to the authenticated user.
pub const DEFAULT_MEMBER: &str = "me";

pub struct BoardService<C> {
    client: C,
}

impl<C> BoardService<C>
where
    C: TrelloApi,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetch a single board by id.
    pub async fn get_board(&self, board_id: &str) -> Result<Board, UpstreamError> {
        let path = format!("/boards/{}", encode(board_id));
        debug!(board_id, "Fetching board");
        let body = self.fetch(&path).await?;
        decode(&path, body)
    }

    /// Fetch every board of `member_id`, in the order the API returns them.
    pub async fn get_boards(&self, member_id: &str) -> Result<Vec<Board>, UpstreamError> {
        let path = format!("/members/{}/boards", encode(member_id));
        debug!(member_id, "Listing boards");
        let body = self.fetch(&path).await?;
        let boards: Vec<Board> = decode(&path, body)?;
        info!(member_id, count = boards.len(), "Listed boards");
        Ok(boards)
    }

    /// Boards of the authenticated user.
    pub async fn get_my_boards(&self) -> Result<Vec<Board>, UpstreamError> {
        self.get_boards(DEFAULT_MEMBER).await
    }

    /// Fetch the labels defined on a board, in upstream order.
    pub async fn get_board_labels(&self, board_id: &str) -> Result<Vec<Label>, UpstreamError> {
        let path = format!("/boards/{}/labels", encode(board_id));
        debug!(board_id, "Fetching board labels");
        let body = self.fetch(&path).await?;
        let labels: Vec<Label> = decode(&path, body)?;
        info!(board_id, count = labels.len(), "Fetched board labels");
        Ok(labels)
    }

    /// Create a board. Only fields set on `payload` are sent; preferences go out as `prefs_*` keys.
    pub async fn create_board(&self, payload: &CreateBoardPayload) -> Result<Board, UpstreamError> {
        let path = "/boards";
        let data = payload.to_request_body();
        debug!(name = payload.name(), fields = data.len(), "Creating board");

        let body = self.client.post(path, data).await.map_err(|e| {
            error!(error = %e, path, "Create board request failed");
            UpstreamError::Transport {
                path: path.to_string(),
                source: e,
            }
        })?;

        let board: Board = decode(path, body)?;
        info!(board_id = %board.id, name = %board.name, "Created board");
        Ok(board)
    }

    async fn fetch(&self, path: &str) -> Result<Value, UpstreamError> {
        self.client.get(path).await.map_err(|e| {
            error!(error = %e, path, "GET request failed");
            UpstreamError::Transport {
                path: path.to_string(),
                source: e,
            }
        })
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, UpstreamError> {
    serde_json::from_value(body).map_err(|e| {
        error!(error = %e, path, "Response did not match the expected shape");
        UpstreamError::Decode {
            path: path.to_string(),
            source: e,
        }
    })
}
