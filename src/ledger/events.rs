//! Session events delivered over the subscription channel
//!
//! Delivery order matches the collaborator's commit order for a session. A
//! subscriber arriving after a phase transition is replayed the current phase
//! status, so late subscription never wedges a handle; consumers must
//! therefore tolerate duplicate phase events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::session::{PlayerId, SessionId};

/// Kinds of session events a subscriber can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    ProvisionComplete,
    AllReady,
    MoveApplied,
    GameOver,
}

/// One committed session event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub session_id: SessionId,
    pub kind: SessionEventKind,
    /// Player that caused the event, for `MoveApplied`
    pub player_id: Option<PlayerId>,
    /// Terminal-outcome value, for `GameOver`
    pub outcome: Option<serde_json::Value>,
    /// Commit timestamp at the collaborator
    pub at: DateTime<Utc>,
}

impl SessionEvent {
    pub fn provision_complete(session_id: SessionId) -> Self {
        Self {
            session_id,
            kind: SessionEventKind::ProvisionComplete,
            player_id: None,
            outcome: None,
            at: Utc::now(),
        }
    }

    pub fn all_ready(session_id: SessionId) -> Self {
        Self {
            session_id,
            kind: SessionEventKind::AllReady,
            player_id: None,
            outcome: None,
            at: Utc::now(),
        }
    }

    pub fn move_applied(session_id: SessionId, player_id: PlayerId) -> Self {
        Self {
            session_id,
            kind: SessionEventKind::MoveApplied,
            player_id: Some(player_id),
            outcome: None,
            at: Utc::now(),
        }
    }

    pub fn game_over(session_id: SessionId, outcome: serde_json::Value) -> Self {
        Self {
            session_id,
            kind: SessionEventKind::GameOver,
            player_id: None,
            outcome: Some(outcome),
            at: Utc::now(),
        }
    }
}
