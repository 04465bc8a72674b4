//! Parlor - a client-side session protocol for turn-based games coordinated
//! through a confidential ledger
//!
//! Parlor drives one multiplayer game session against an external
//! authoritative collaborator (ledger/contract plus its client transport):
//! - Session creation with collaborator-assigned, monotonically increasing ids
//! - Readiness rendezvous between independently-constructed handles,
//!   propagated through a subscription channel rather than polling
//! - Alternating-turn move submission with termination detection
//! - A confidentiality capability flag that swaps the transport strategy
//!   without touching coordinator logic

pub mod config;
pub mod error;
pub mod ledger;
pub mod session;

// Re-export commonly used types for convenience
pub use error::{NetworkError, SessionError, SessionResult};

// Re-export the collaborator interface
pub use ledger::{
    Envelope, GameLedger, SessionEvent, SessionEventKind, Transport, TransportMode,
};

// Re-export the session surface
pub use session::{
    alternate_moves, Game, GameServer, Move, MoveKind, Participant, PlayerAssignment, PlayerId,
    Seat, ServerOptions, SessionId, SessionPhase, StateSnapshot,
};

// Re-export configuration interfaces
pub use config::{NetworkConfig, ParlorConfig, SessionConfig};
