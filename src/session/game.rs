//! A handle onto one session
//!
//! Each handle distills the session's event stream into a monotone phase
//! watch through a background watcher task. Multiple independently-
//! constructed handles onto the same session id each run their own watcher,
//! so one handle's readiness write becomes visible to the others through the
//! collaborator's `AllReady` event, never through shared memory or polling.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::error::{SessionError, SessionResult};
use crate::ledger::{GameLedger, SessionEvent, SessionEventKind, Transport};
use crate::session::types::{
    normalize_address, Action, Move, PlayerAssignment, SessionId, StateSnapshot,
};

/// Lifecycle phase of a session, as observed by one handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionPhase {
    /// Created; provisioning (player-id assignment) may still be in flight
    Created,
    /// Fully provisioned and queryable
    Provisioned,
    /// Every participant has signaled readiness
    Started,
    /// Terminal outcome observed; absorbing
    Terminated,
}

/// One client handle onto one session
pub struct Game<L: GameLedger> {
    id: SessionId,
    account: String,
    ledger: Arc<L>,
    transport: Arc<dyn Transport>,
    settle_timeout: Duration,
    phase: watch::Receiver<SessionPhase>,
    outcome: Arc<Mutex<Option<serde_json::Value>>>,
    watcher: JoinHandle<()>,
}

impl<L: GameLedger> std::fmt::Debug for Game<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("account", &self.account)
            .field("settle_timeout", &self.settle_timeout)
            .field("phase", &*self.phase.borrow())
            .finish_non_exhaustive()
    }
}

impl<L: GameLedger> Game<L> {
    /// Subscribe to the session's event stream and start the phase watcher.
    pub(crate) async fn bind(
        ledger: Arc<L>,
        transport: Arc<dyn Transport>,
        account: String,
        settle_timeout: Duration,
        id: SessionId,
    ) -> SessionResult<Self> {
        let events = ledger.subscribe(id).await?;
        let (phase_tx, phase_rx) = watch::channel(SessionPhase::Created);
        let outcome = Arc::new(Mutex::new(None));

        let watcher = tokio::spawn(watch_events(id, events, phase_tx, Arc::clone(&outcome)));

        Ok(Self {
            id,
            account: normalize_address(&account),
            ledger,
            transport,
            settle_timeout,
            phase: phase_rx,
            outcome,
            watcher,
        })
    }

    /// Session id assigned by the collaborator
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Identity this handle signs readiness with
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Current phase as observed by this handle
    pub fn phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }

    /// Whether every participant's readiness has been observed
    pub fn is_started(&self) -> bool {
        self.phase() >= SessionPhase::Started
    }

    /// Terminal outcome, once observed by this handle
    pub fn outcome(&self) -> Option<serde_json::Value> {
        self.outcome.lock().expect("outcome lock poisoned").clone()
    }

    /// Suspend until the collaborator confirms the session is provisioned.
    ///
    /// Idempotent: returns immediately once the phase has been reached. No
    /// default deadline; use [`Game::ready_within`] for a bounded wait.
    pub async fn ready(&self) -> SessionResult<()> {
        self.await_phase(SessionPhase::Provisioned).await
    }

    /// [`Game::ready`] under a caller-imposed deadline
    pub async fn ready_within(&self, deadline: Duration) -> SessionResult<()> {
        self.await_phase_within(SessionPhase::Provisioned, deadline, "ready")
            .await
    }

    /// Suspend until readiness has propagated from all participants.
    ///
    /// The deadline is the configured settle timeout; the started flag is
    /// driven by the collaborator's `AllReady` event, not by re-fetching.
    pub async fn wait_started(&self) -> SessionResult<()> {
        self.await_phase_within(SessionPhase::Started, self.settle_timeout, "wait_started")
            .await
    }

    /// [`Game::wait_started`] under an explicit deadline
    pub async fn wait_started_within(&self, deadline: Duration) -> SessionResult<()> {
        self.await_phase_within(SessionPhase::Started, deadline, "wait_started")
            .await
    }

    /// Player assignment for this session, keyed by lowercase address.
    ///
    /// Pure read; reflects the collaborator's own assignment order. The
    /// assignment invariant is verified on the way in.
    pub async fn registered_players(&self) -> SessionResult<PlayerAssignment> {
        let assignment = self.ledger.registered_players(self.id).await?;
        assignment.validate()?;
        Ok(assignment)
    }

    /// Signal that this handle's actor is ready to begin.
    ///
    /// Safe to call once per participant; duplicate signaling is resolved by
    /// the collaborator, not de-duplicated here.
    pub async fn send_ready(&self) -> SessionResult<()> {
        if self.phase() < SessionPhase::Provisioned {
            return Err(SessionError::NotReady(
                "session is not provisioned yet".to_string(),
            ));
        }

        debug!(session_id = self.id, account = %self.account, "signaling readiness");
        let payload = serde_json::to_value(Action::Ready {
            address: self.account.clone(),
        })?;
        let envelope = self.transport.seal(&payload)?;
        self.ledger.submit_action(self.id, envelope).await
    }

    /// Submit a move for commit.
    ///
    /// Requires the session to have started; legality under the game's rules
    /// is the collaborator's call. Once a terminal outcome has been observed
    /// the caller must stop submitting; the collaborator rejects late moves.
    pub async fn send_move(&self, mv: Move) -> SessionResult<()> {
        if !self.is_started() {
            return Err(SessionError::NotReady(
                "moves require a started session".to_string(),
            ));
        }

        debug!(
            session_id = self.id,
            player_id = mv.player_id,
            kind = %mv.kind,
            args = ?mv.args,
            "submitting move"
        );
        let payload = serde_json::to_value(Action::MakeMove(mv))?;
        let envelope = self.transport.seal(&payload)?;
        self.ledger.submit_action(self.id, envelope).await
    }

    /// Fetch the latest state snapshot from the collaborator.
    ///
    /// Point-in-time read, no older than the last confirmed write this
    /// handle is aware of.
    pub async fn get_state(&self) -> SessionResult<StateSnapshot> {
        let envelope = self.ledger.query_state(self.id).await?;
        let value = envelope.open()?;
        let snapshot: StateSnapshot = serde_json::from_value(value)?;

        trace!(session_id = self.id, digest = %snapshot.digest(), "fetched state");

        if let Some(outcome) = snapshot.game_over() {
            let mut cached = self.outcome.lock().expect("outcome lock poisoned");
            if cached.is_none() {
                *cached = Some(outcome.clone());
            }
        }

        Ok(snapshot)
    }

    async fn await_phase(&self, target: SessionPhase) -> SessionResult<()> {
        if self.phase() >= target {
            return Ok(());
        }

        let mut rx = self.phase.clone();
        rx.wait_for(|phase| *phase >= target)
            .await
            .map_err(|_| SessionError::Subscription("session event stream closed".to_string()))?;
        Ok(())
    }

    async fn await_phase_within(
        &self,
        target: SessionPhase,
        deadline: Duration,
        operation: &str,
    ) -> SessionResult<()> {
        tokio::time::timeout(deadline, self.await_phase(target))
            .await
            .map_err(|_| SessionError::Timeout {
                operation: operation.to_string(),
                duration_ms: deadline.as_millis() as u64,
            })?
    }
}

impl<L: GameLedger> Drop for Game<L> {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

/// Fold the session's event stream into the phase watch.
///
/// Phase only moves forward: duplicate or replayed events never downgrade it,
/// which is what makes the collaborator's replay-on-subscribe safe.
async fn watch_events(
    session_id: SessionId,
    mut events: broadcast::Receiver<SessionEvent>,
    phase: watch::Sender<SessionPhase>,
    outcome: Arc<Mutex<Option<serde_json::Value>>>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                trace!(session_id, kind = ?event.kind, "session event");
                let next = match event.kind {
                    SessionEventKind::ProvisionComplete => SessionPhase::Provisioned,
                    SessionEventKind::AllReady => SessionPhase::Started,
                    SessionEventKind::GameOver => {
                        if let Some(value) = event.outcome {
                            let mut cached = outcome.lock().expect("outcome lock poisoned");
                            if cached.is_none() {
                                *cached = Some(value);
                            }
                        }
                        SessionPhase::Terminated
                    }
                    SessionEventKind::MoveApplied => continue,
                };

                phase.send_if_modified(|current| {
                    if next > *current {
                        *current = next;
                        true
                    } else {
                        false
                    }
                });
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(session_id, missed, "event stream lagged");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
