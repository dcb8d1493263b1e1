#![doc = "trello-boards-core: board model, payload validation and service layer for trello-boards."]

//! This crate holds the transport-agnostic part of trello-boards: the
//! records returned by the API, the create-board schema, the [`contract`]
//! trait an HTTP client has to implement, and the [`service`] that ties them
//! together. The reqwest client and the CLI live in the `trello-boards` crate.

pub mod contract;
pub mod error;
pub mod models;
pub mod payload;
pub mod service;

pub use contract::{TrelloApi, TransportError};
pub use error::{BoardError, UpstreamError, ValidationError};
pub use models::{Board, BoardPrefs, Label};
pub use payload::{
    BoardComments, BoardPermissionLevel, BoardPreferences, BoardVoting, CardAging,
    CreateBoardPayload,
};
pub use service::{BoardService, DEFAULT_MEMBER};
