//! Session coordination: creation, readiness rendezvous, moves, termination

pub mod driver;
pub mod game;
pub mod server;
pub mod types;

// Re-export the session surface
pub use driver::{alternate_moves, move_schedule, Seat};
pub use game::{Game, SessionPhase};
pub use server::{GameServer, ServerOptions};
pub use types::{
    normalize_address, validate_participants, Action, Move, MoveKind, Participant,
    PlayerAssignment, PlayerId, SessionId, StateContext, StateSnapshot,
};
