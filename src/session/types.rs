//! Core session data types

use std::collections::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use crate::error::{NetworkError, SessionError, SessionResult};

/// Collaborator-assigned session identifier, `>= 1`
pub type SessionId = u64;

/// Collaborator-assigned player slot, `>= 1`
pub type PlayerId = u32;

/// Lowercase the opaque identity string; all address comparisons go through here
pub fn normalize_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// A party registered to a session, immutable after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub address: String,
    pub is_bot: bool,
}

impl Participant {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            is_bot: false,
        }
    }

    pub fn bot(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            is_bot: true,
        }
    }
}

/// Mapping from case-normalized address to assigned player ids
///
/// Populated by the collaborator at session creation. The coordinator never
/// reorders or renumbers; it only verifies the assignment invariant (id lists
/// non-empty, disjoint across addresses).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerAssignment {
    players: HashMap<String, Vec<PlayerId>>,
}

impl PlayerAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record ids for an address, normalizing the key
    pub fn insert(&mut self, address: &str, ids: Vec<PlayerId>) {
        self.players.insert(normalize_address(address), ids);
    }

    /// Ids assigned to an address, if any
    pub fn ids_for(&self, address: &str) -> Option<&[PlayerId]> {
        self.players
            .get(&normalize_address(address))
            .map(Vec::as_slice)
    }

    /// Whether any address holds this player id
    pub fn contains_player(&self, player_id: PlayerId) -> bool {
        self.players.values().any(|ids| ids.contains(&player_id))
    }

    pub fn contains_address(&self, address: &str) -> bool {
        self.players.contains_key(&normalize_address(address))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<PlayerId>)> {
        self.players.iter()
    }

    /// Check the assignment invariant: every id list non-empty, ids disjoint
    /// across addresses. A violation is an invalid collaborator response.
    pub fn validate(&self) -> SessionResult<()> {
        let mut seen = HashSet::new();
        for (address, ids) in &self.players {
            if ids.is_empty() {
                return Err(NetworkError::InvalidResponse {
                    message: format!("empty player id list for address {}", address),
                }
                .into());
            }
            for id in ids {
                if !seen.insert(*id) {
                    return Err(NetworkError::InvalidResponse {
                        message: format!("player id {} assigned to multiple addresses", id),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

/// Enumerated action tag for a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    ClickTile,
    SelectCard,
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveKind::ClickTile => write!(f, "click_tile"),
            MoveKind::SelectCard => write!(f, "select_card"),
        }
    }
}

/// One move submission. Ephemeral: submitted, never retained locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    #[serde(rename = "move_type")]
    pub kind: MoveKind,
    pub player_id: PlayerId,
    pub args: Vec<u32>,
}

impl Move {
    /// Place/select at a board coordinate
    pub fn click_tile(player_id: PlayerId, x: u32, y: u32) -> Self {
        Self {
            kind: MoveKind::ClickTile,
            player_id,
            args: vec![x, y],
        }
    }
}

/// Wire payload for `submit_action`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    MakeMove(Move),
    Ready { address: String },
}

/// Context carried alongside the opaque state blob
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateContext {
    /// Absent or falsy while in progress; a terminal-outcome value once over
    #[serde(
        rename = "gameover",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub game_over: Option<serde_json::Value>,
}

/// Point-in-time read of the session's authoritative state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub ctx: StateContext,
    /// Opaque game-state blob; the coordinator never interprets it
    #[serde(default)]
    pub data: serde_json::Value,
}

impl StateSnapshot {
    /// The terminal outcome, if the game is over.
    ///
    /// `null` and `false` count as "still in progress", matching the
    /// collaborator's truthiness convention for the gameover field.
    pub fn game_over(&self) -> Option<&serde_json::Value> {
        match &self.ctx.game_over {
            Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) | None => None,
            Some(value) => Some(value),
        }
    }

    /// Canonical digest of the snapshot, for logging and equality checks
    pub fn digest(&self) -> String {
        // serde_json object keys are sorted, so equal snapshots digest equally
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hex::encode(hasher.finalize())
    }
}

/// Validate a creation-time participant set: non-empty, addresses distinct
/// after case normalization.
pub fn validate_participants(participants: &[Participant]) -> SessionResult<()> {
    if participants.is_empty() {
        return Err(SessionError::Creation {
            message: "participant list must not be empty".to_string(),
            field: Some("participants".to_string()),
        });
    }

    let mut seen = HashSet::new();
    for participant in participants {
        let normalized = normalize_address(&participant.address);
        if normalized.is_empty() {
            return Err(SessionError::Creation {
                message: "participant address must not be empty".to_string(),
                field: Some("address".to_string()),
            });
        }
        if !seen.insert(normalized) {
            return Err(SessionError::Creation {
                message: format!("duplicate participant address: {}", participant.address),
                field: Some("address".to_string()),
            });
        }
    }

    Ok(())
}
