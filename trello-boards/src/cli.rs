///
/// This module implements the CLI interface for trello-boards: command parsing,
/// payload assembly and printing results.
///
/// Validation, board mapping and request shaping live in [`trello_boards_core`];
/// this module is CLI glue only.
///
/// Every command prints its result as pretty JSON on stdout. A `create`
/// whose payload fails validation exits with an error before any request
/// is made.
use crate::client::TrelloClient;
use crate::load_config::{default_config, load_config};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use trello_boards_core::payload::{
    BoardComments, BoardPermissionLevel, BoardPreferences, BoardVoting, CardAging,
    CreateBoardPayload,
};
use trello_boards_core::{BoardError, BoardService};

/// CLI for trello-boards: fetch, list and create Trello boards.
#[derive(Parser)]
#[clap(
    name = "trello-boards",
    version,
    about = "Fetch, list and create Trello boards from the command line"
)]
pub struct Cli {
    /// Path to an optional YAML config file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a single board
    Board {
        board_id: String,
    },
    /// List the boards of a member
    Boards {
        /// Member id or username (defaults to the configured member, usually "me")
        #[clap(long)]
        member: Option<String>,
    },
    /// List the labels of a board
    Labels {
        board_id: String,
    },
    /// Create a board
    Create(CreateArgs),
}

#[derive(Args, Default)]
pub struct CreateArgs {
    /// JSON file with the full create-board payload (upstream field names)
    #[clap(long, conflicts_with = "name")]
    pub payload: Option<PathBuf>,

    /// Board name
    #[clap(long, required_unless_present = "payload")]
    pub name: Option<String>,

    #[clap(long)]
    pub desc: Option<String>,

    /// Organization (workspace) id
    #[clap(long)]
    pub org: Option<String>,

    #[clap(long)]
    pub no_default_labels: bool,

    #[clap(long)]
    pub no_default_lists: bool,

    /// private, org or public
    #[clap(long)]
    pub permission_level: Option<String>,

    /// disabled, members, observers, org or public
    #[clap(long)]
    pub voting: Option<String>,

    /// disabled, members, observers, org or public
    #[clap(long)]
    pub comments: Option<String>,

    /// pirate or regular
    #[clap(long)]
    pub card_aging: Option<String>,
}

impl CreateArgs {
    /// Assemble and validate the payload without touching the network.
    pub fn to_payload(&self) -> Result<CreateBoardPayload> {
        if let Some(path) = &self.payload {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read payload file {:?}", path))?;
            let value: serde_json::Value =
                serde_json::from_str(&raw).context("Payload file is not valid JSON")?;
            return Ok(CreateBoardPayload::from_value(value).map_err(BoardError::from)?);
        }

        let name = self.name.clone().unwrap_or_default();
        let mut payload = CreateBoardPayload::new(name).map_err(BoardError::from)?;
        if let Some(desc) = &self.desc {
            payload = payload.with_desc(desc.clone());
        }
        if let Some(org) = &self.org {
            payload = payload.with_organization(org.clone());
        }
        if self.no_default_labels {
            payload = payload.with_default_labels(false);
        }
        if self.no_default_lists {
            payload = payload.with_default_lists(false);
        }

        let mut prefs = BoardPreferences::default();
        if let Some(v) = &self.permission_level {
            prefs.permission_level =
                Some(parse_pref::<BoardPermissionLevel>("permissionLevel", v)?);
        }
        if let Some(v) = &self.voting {
            prefs.voting = Some(parse_pref::<BoardVoting>("voting", v)?);
        }
        if let Some(v) = &self.comments {
            prefs.comments = Some(parse_pref::<BoardComments>("comments", v)?);
        }
        if let Some(v) = &self.card_aging {
            prefs.card_aging = Some(parse_pref::<CardAging>("cardAging", v)?);
        }
        if prefs != BoardPreferences::default() {
            payload = payload.with_prefs(prefs);
        }
        Ok(payload)
    }
}

fn parse_pref<T>(field: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = trello_boards_core::ValidationError>,
{
    value.parse::<T>().map_err(|mut e| {
        e.field = format!("prefs.{field}");
        anyhow::Error::new(BoardError::from(e))
    })
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Validate before loading secrets so a bad payload never needs credentials.
    let payload = match &cli.command {
        Commands::Create(args) => Some(args.to_payload()?),
        _ => None,
    };

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };
    let client = TrelloClient::new(config.client.clone())
        .map_err(|e| anyhow::anyhow!("Failed to construct Trello client: {e}"))?;
    let service = BoardService::new(client);

    match cli.command {
        Commands::Board { board_id } => {
            tracing::info!(command = "board", %board_id, "Fetching board");
            print_json(&service.get_board(&board_id).await.map_err(BoardError::from)?)
        }
        Commands::Boards { member } => {
            let member = member.unwrap_or(config.member);
            tracing::info!(command = "boards", %member, "Listing boards");
            print_json(&service.get_boards(&member).await.map_err(BoardError::from)?)
        }
        Commands::Labels { board_id } => {
            tracing::info!(command = "labels", %board_id, "Listing labels");
            print_json(
                &service
                    .get_board_labels(&board_id)
                    .await
                    .map_err(BoardError::from)?,
            )
        }
        Commands::Create(_) => {
            let payload = payload.context("create payload was not assembled")?;
            tracing::info!(command = "create", name = payload.name(), "Creating board");
            print_json(&service.create_board(&payload).await.map_err(BoardError::from)?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_payload_with_prefs() {
        let args = CreateArgs {
            name: Some("Ops".into()),
            no_default_lists: true,
            voting: Some("members".into()),
            ..Default::default()
        };
        let payload = args.to_payload().unwrap();
        let body = payload.to_request_body();
        assert_eq!(body.get("defaultLists"), Some(&serde_json::json!(false)));
        assert_eq!(body.get("prefs_voting"), Some(&serde_json::json!("members")));
        assert!(!body.contains_key("defaultLabels"));
    }

    #[test]
    fn no_pref_flags_means_no_prefs() {
        let args = CreateArgs {
            name: Some("Ops".into()),
            ..Default::default()
        };
        assert!(args.to_payload().unwrap().prefs.is_none());
    }

    #[test]
    fn invalid_pref_flag_reports_field() {
        let args = CreateArgs {
            name: Some("Ops".into()),
            comments: Some("everyone".into()),
            ..Default::default()
        };
        let err = args.to_payload().unwrap_err();
        assert!(err.to_string().contains("prefs.comments"), "got: {err}");
    }

    #[test]
    fn cli_parses_create_flags() {
        let cli = Cli::parse_from([
            "trello-boards",
            "create",
            "--name",
            "Ops",
            "--no-default-labels",
            "--permission-level",
            "org",
        ]);
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.name.as_deref(), Some("Ops"));
                assert!(args.no_default_labels);
                assert_eq!(args.permission_level.as_deref(), Some("org"));
            }
            _ => panic!("expected create"),
        }
    }
}
