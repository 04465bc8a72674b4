//! Session construction and handle attachment

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::ParlorConfig;
use crate::error::SessionResult;
use crate::ledger::{transport, GameLedger, Transport, TransportMode};
use crate::session::game::Game;
use crate::session::types::{validate_participants, Participant, SessionId};

/// Construction parameters for a [`GameServer`]
///
/// Opaque to the coordinator beyond the fields named here; endpoints and key
/// management belong to whoever built the ledger handle.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Identity this client acts as
    pub account: String,
    /// Route requests through the confidential channel
    pub confidential: bool,
    /// Deadline for readiness propagation across handles
    pub settle_timeout: Duration,
}

impl ServerOptions {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            confidential: true,
            settle_timeout: Duration::from_millis(1000),
        }
    }

    pub fn plain(mut self) -> Self {
        self.confidential = false;
        self
    }

    /// Derive options from a loaded configuration
    pub fn from_config(account: impl Into<String>, config: &ParlorConfig) -> Self {
        Self {
            account: account.into(),
            confidential: config.session.confidential,
            settle_timeout: Duration::from_millis(config.session.settle_timeout_ms),
        }
    }
}

/// Client-side entry point for creating sessions and attaching handles
pub struct GameServer<L: GameLedger> {
    ledger: Arc<L>,
    transport: Arc<dyn Transport>,
    account: String,
    settle_timeout: Duration,
}

impl<L: GameLedger> GameServer<L> {
    /// Build a server over a ledger handle, selecting the transport strategy
    /// from the confidentiality capability flag.
    pub fn new(ledger: Arc<L>, options: ServerOptions) -> Self {
        let mode = if options.confidential {
            TransportMode::Confidential
        } else {
            TransportMode::Plain
        };

        Self {
            ledger,
            transport: transport::for_mode(mode),
            account: options.account,
            settle_timeout: options.settle_timeout,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport.mode()
    }

    /// Register a participant set and obtain a handle onto the new session.
    ///
    /// The participant list must be non-empty with distinct addresses after
    /// case normalization; the collaborator allocates the session id and the
    /// player assignment. Committed external state is never rolled back on
    /// later failures.
    pub async fn create_game(&self, participants: Vec<Participant>) -> SessionResult<Game<L>> {
        validate_participants(&participants)?;

        info!(
            account = %self.account,
            participant_count = participants.len(),
            mode = %self.transport.mode(),
            "creating session"
        );

        let (session_id, assignment) = self.ledger.create_session(&participants).await?;
        assignment.validate()?;

        info!(session_id, "session created");

        self.attach(session_id).await
    }

    /// Attach an independent handle onto an existing session by id.
    ///
    /// This is the second player's entry point: the handle subscribes to the
    /// session's event stream and observes phase transitions on its own.
    pub async fn attach(&self, session_id: SessionId) -> SessionResult<Game<L>> {
        Game::bind(
            Arc::clone(&self.ledger),
            Arc::clone(&self.transport),
            self.account.clone(),
            self.settle_timeout,
            session_id,
        )
        .await
    }
}
