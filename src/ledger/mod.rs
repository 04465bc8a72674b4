//! The collaborator interface: an authoritative ledger reached over a narrow trait
//!
//! The ledger owns and serializes all session state. The coordinator holds no
//! authoritative state of its own; everything it knows arrives through the
//! request/response methods here or through the subscription channel.

pub mod events;
pub mod transport;

pub use events::{SessionEvent, SessionEventKind};
pub use transport::{
    ConfidentialTransport, Envelope, PlainTransport, Transport, TransportMode,
};

use tokio::sync::broadcast;
use crate::error::SessionResult;
use crate::session::{Participant, PlayerAssignment, SessionId};

/// The external collaborator: ledger/contract plus its client transport.
///
/// Writes from one handle become visible to other handles only after the
/// collaborator commits and delivers the corresponding event; the
/// subscription channel is therefore separate from the request channel.
#[allow(async_fn_in_trait)]
pub trait GameLedger: Send + Sync + 'static {
    /// Register a participant set and allocate a new session id.
    ///
    /// Ids are collaborator-assigned, monotonically increasing, and stable
    /// for the session's lifetime. Player ids are assigned in participant
    /// order (first participant gets the lowest id).
    async fn create_session(
        &self,
        participants: &[Participant],
    ) -> SessionResult<(SessionId, PlayerAssignment)>;

    /// Subscribe to the event stream of one session.
    ///
    /// Events arrive in the collaborator's commit order. If the session has
    /// already passed a phase transition, the current phase status is
    /// replayed to the new subscriber.
    async fn subscribe(
        &self,
        session_id: SessionId,
    ) -> SessionResult<broadcast::Receiver<SessionEvent>>;

    /// Submit an action envelope (readiness signal or move) for commit.
    async fn submit_action(&self, session_id: SessionId, envelope: Envelope) -> SessionResult<()>;

    /// Fetch a sealed point-in-time state snapshot.
    async fn query_state(&self, session_id: SessionId) -> SessionResult<Envelope>;

    /// Pure read of the session's player assignment.
    async fn registered_players(&self, session_id: SessionId) -> SessionResult<PlayerAssignment>;
}
