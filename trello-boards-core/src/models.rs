//! Records returned by the Trello API.
//!
//! Field names follow the upstream JSON (camelCase). Only `id`, `name` and
//! `url` are required on a board; anything else missing from a response
//! falls back to its default so partial field selections still map.

use serde::{Deserialize, Serialize};

/// A Trello board as returned by `/boards/{id}`, `/members/{id}/boards` and `POST /boards`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub id_organization: Option<String>,
    #[serde(default)]
    pub closed: bool,
    pub url: String,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub prefs: Option<BoardPrefs>,
}

/// Read-side view of a board's preferences.
///
/// Kept as plain strings: the API may report values this client does not
/// know about, and a fetch should not fail because of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPrefs {
    #[serde(default)]
    pub permission_level: Option<String>,
    #[serde(default)]
    pub voting: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub invitations: Option<String>,
    #[serde(default)]
    pub self_join: Option<bool>,
    #[serde(default)]
    pub card_covers: Option<bool>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub card_aging: Option<String>,
}

/// A label defined on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub id_board: String,
    /// Upstream allows unnamed labels.
    #[serde(default)]
    pub name: String,
    /// `None` for colorless labels.
    #[serde(default)]
    pub color: Option<String>,
}
