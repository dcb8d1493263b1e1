//! # payload: create-board request schema
//!
//! Validates and normalizes a create-board request before it reaches the
//! transport layer, and turns it into the flat body the API expects.
//!
//! - Enumerated preference fields are closed sets ([`BoardPermissionLevel`],
//!   [`BoardVoting`], [`BoardComments`], [`CardAging`]); anything else is a
//!   [`ValidationError`].
//! - Every optional field is an `Option`. `None` means "not sent", which is
//!   different from "sent as false/empty".
//! - Defaults (`defaultLabels`, `defaultLists`, `keepFromSource`) are only
//!   reported by the accessors; they are never written into the request body.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

pub const NAME_MAX_CHARS: usize = 16384;

/// Prefix the API expects for flattened board preferences.
pub const PREFS_PREFIX: &str = "prefs_";

const PREFS_KEY: &str = "prefs";

/// Declares a closed set of string literals with `as_str`, `FromStr` and serde support.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $lit:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $lit)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $lit,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($lit => Ok($name::$variant),)+
                    other => Err(ValidationError::new(
                        stringify!($name),
                        format!(
                            "{other:?} is not one of {}",
                            [$($lit),+].join(", ")
                        ),
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_set! {
    /// Who can see the board.
    BoardPermissionLevel {
        Private => "private",
        Org => "org",
        Public => "public",
    }
}

closed_set! {
    /// Who can vote on cards.
    BoardVoting {
        Disabled => "disabled",
        Members => "members",
        Observers => "observers",
        Org => "org",
        Public => "public",
    }
}

closed_set! {
    /// Who can comment on cards.
    BoardComments {
        Disabled => "disabled",
        Members => "members",
        Observers => "observers",
        Org => "org",
        Public => "public",
    }
}

closed_set! {
    /// Card aging style.
    CardAging {
        Pirate => "pirate",
        Regular => "regular",
    }
}

/// Board preferences, nested in the request model and flattened on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_level: Option<BoardPermissionLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting: Option<BoardVoting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<BoardComments>,
    /// Documented as "members" or "admins"; not enforced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_join: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_covers: Option<bool>,
    /// Background color name or custom background id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_aging: Option<CardAging>,
}

impl BoardPreferences {
    /// Build preferences from a JSON object, validating every enumerated field.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        Ok(Self {
            permission_level: enum_field(map, "permissionLevel", "prefs.")?,
            voting: enum_field(map, "voting", "prefs.")?,
            comments: enum_field(map, "comments", "prefs.")?,
            invitations: string_field(map, "invitations", "prefs.")?,
            self_join: bool_field(map, "selfJoin", "prefs.")?,
            card_covers: bool_field(map, "cardCovers", "prefs.")?,
            background: string_field(map, "background", "prefs.")?,
            card_aging: enum_field(map, "cardAging", "prefs.")?,
        })
    }

    pub fn with_permission_level(mut self, value: BoardPermissionLevel) -> Self {
        self.permission_level = Some(value);
        self
    }

    pub fn with_voting(mut self, value: BoardVoting) -> Self {
        self.voting = Some(value);
        self
    }

    pub fn with_comments(mut self, value: BoardComments) -> Self {
        self.comments = Some(value);
        self
    }

    pub fn with_invitations(mut self, value: impl Into<String>) -> Self {
        self.invitations = Some(value.into());
        self
    }

    pub fn with_self_join(mut self, value: bool) -> Self {
        self.self_join = Some(value);
        self
    }

    pub fn with_card_covers(mut self, value: bool) -> Self {
        self.card_covers = Some(value);
        self
    }

    pub fn with_background(mut self, value: impl Into<String>) -> Self {
        self.background = Some(value.into());
        self
    }

    pub fn with_card_aging(mut self, value: CardAging) -> Self {
        self.card_aging = Some(value);
        self
    }
}

/// A validated create-board request.
///
/// The name is private so it can only be set through validation; use
/// [`CreateBoardPayload::new`] or [`CreateBoardPayload::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardPayload {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_lists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_board_source: Option<String>,
    /// `"cards"` keeps cards when copying from `id_board_source`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_from_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_ups: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefs: Option<BoardPreferences>,
}

impl CreateBoardPayload {
    /// Start a payload with only a (validated) name set.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            desc: None,
            default_labels: None,
            default_lists: None,
            id_organization: None,
            id_board_source: None,
            keep_from_source: None,
            power_ups: None,
            prefs: None,
        })
    }

    /// Validate a JSON value holding the request fields (upstream camelCase keys).
    ///
    /// Unknown keys are ignored; an explicit `null` counts as unset.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Self::from_map(&map),
            other => Err(ValidationError::new(
                "payload",
                format!("expected an object, got {}", json_kind(&other)),
            )),
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        let name = match map.get("name") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => {
                return Err(ValidationError::new("name", "field is required"))
            }
            Some(other) => {
                return Err(ValidationError::new(
                    "name",
                    format!("expected a string, got {}", json_kind(other)),
                ))
            }
        };

        let prefs = match map.get(PREFS_KEY) {
            Some(Value::Object(inner)) => Some(BoardPreferences::from_map(inner)?),
            Some(Value::Null) | None => None,
            Some(other) => {
                return Err(ValidationError::new(
                    PREFS_KEY,
                    format!("expected an object, got {}", json_kind(other)),
                ))
            }
        };

        let mut payload = Self::new(name)?;
        payload.desc = string_field(map, "desc", "")?;
        payload.default_labels = bool_field(map, "defaultLabels", "")?;
        payload.default_lists = bool_field(map, "defaultLists", "")?;
        payload.id_organization = string_field(map, "idOrganization", "")?;
        payload.id_board_source = string_field(map, "idBoardSource", "")?;
        payload.keep_from_source = string_field(map, "keepFromSource", "")?;
        payload.power_ups = string_field(map, "powerUps", "")?;
        payload.prefs = prefs;
        Ok(payload)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the default label set is added; `true` unless explicitly disabled.
    pub fn default_labels(&self) -> bool {
        self.default_labels.unwrap_or(true)
    }

    /// Whether the default lists are added; `true` unless explicitly disabled.
    pub fn default_lists(&self) -> bool {
        self.default_lists.unwrap_or(true)
    }

    pub fn keep_from_source(&self) -> &str {
        self.keep_from_source.as_deref().unwrap_or("none")
    }

    pub fn with_desc(mut self, value: impl Into<String>) -> Self {
        self.desc = Some(value.into());
        self
    }

    pub fn with_default_labels(mut self, value: bool) -> Self {
        self.default_labels = Some(value);
        self
    }

    pub fn with_default_lists(mut self, value: bool) -> Self {
        self.default_lists = Some(value);
        self
    }

    pub fn with_organization(mut self, id: impl Into<String>) -> Self {
        self.id_organization = Some(id.into());
        self
    }

    pub fn with_source_board(mut self, id: impl Into<String>, keep: impl Into<String>) -> Self {
        self.id_board_source = Some(id.into());
        self.keep_from_source = Some(keep.into());
        self
    }

    pub fn with_power_ups(mut self, value: impl Into<String>) -> Self {
        self.power_ups = Some(value.into());
        self
    }

    pub fn with_prefs(mut self, prefs: BoardPreferences) -> Self {
        self.prefs = Some(prefs);
        self
    }

    /// The request body for `POST /boards`: explicitly set fields only, preferences flattened.
    pub fn to_request_body(&self) -> Map<String, Value> {
        let mut body = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Only strings, bools and unit enums in here.
            _ => unreachable!("CreateBoardPayload always serializes to an object"),
        };
        flatten_nested(&mut body, PREFS_KEY, PREFS_PREFIX);
        body
    }
}

impl TryFrom<Value> for CreateBoardPayload {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Lift the object stored under `key` into `map`, prefixing each inner key.
///
/// `{"prefs": {"voting": "members"}}` becomes `{"prefs_voting": "members"}`.
/// A non-object value under `key` is left in place.
pub fn flatten_nested(map: &mut Map<String, Value>, key: &str, prefix: &str) {
    if !matches!(map.get(key), Some(Value::Object(_))) {
        return;
    }
    if let Some(Value::Object(inner)) = map.remove(key) {
        for (k, v) in inner {
            map.insert(format!("{prefix}{k}"), v);
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len == 0 {
        return Err(ValidationError::new("name", "must not be empty"));
    }
    if len > NAME_MAX_CHARS {
        return Err(ValidationError::new(
            "name",
            format!("must be at most {NAME_MAX_CHARS} characters, got {len}"),
        ));
    }
    Ok(())
}

fn string_field(
    map: &Map<String, Value>,
    key: &str,
    scope: &str,
) -> Result<Option<String>, ValidationError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ValidationError::new(
            format!("{scope}{key}"),
            format!("expected a string, got {}", json_kind(other)),
        )),
    }
}

fn bool_field(
    map: &Map<String, Value>,
    key: &str,
    scope: &str,
) -> Result<Option<bool>, ValidationError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(ValidationError::new(
            format!("{scope}{key}"),
            format!("expected a boolean, got {}", json_kind(other)),
        )),
    }
}

fn enum_field<T>(
    map: &Map<String, Value>,
    key: &str,
    scope: &str,
) -> Result<Option<T>, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    match string_field(map, key, scope)? {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|e| ValidationError {
            field: format!("{scope}{key}"),
            reason: e.reason,
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
