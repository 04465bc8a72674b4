//! Turn-alternation driving policy
//!
//! A caller-level protocol, not a property of the session itself: given a
//! fixed seat order and a bounded board, submit moves in a deterministic
//! round-robin and stop at the first terminal observation.

use tracing::debug;

use crate::error::SessionResult;
use crate::ledger::GameLedger;
use crate::session::game::Game;
use crate::session::types::{Move, PlayerId};

/// One participant's handle paired with the player slot it drives
pub struct Seat<'a, L: GameLedger> {
    pub game: &'a Game<L>,
    pub player: PlayerId,
}

impl<'a, L: GameLedger> Seat<'a, L> {
    pub fn new(game: &'a Game<L>, player: PlayerId) -> Self {
        Self { game, player }
    }
}

/// Row-major coordinate schedule for an N×N board.
///
/// Pure and reproducible: the same board size yields the same sequence on
/// every run.
pub fn move_schedule(board_size: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..board_size).flat_map(move |x| (0..board_size).map(move |y| (x, y)))
}

/// Drive seats through the board until a terminal outcome appears.
///
/// For each coordinate, every seat submits one click in seat order; after
/// each submission the submitting handle's state is fetched and checked. The
/// first truthy gameover stops the run immediately; no further moves are
/// issued. Returns `None` if the schedule is exhausted without termination.
pub async fn alternate_moves<L: GameLedger>(
    seats: &[Seat<'_, L>],
    board_size: u32,
) -> SessionResult<Option<serde_json::Value>> {
    for (x, y) in move_schedule(board_size) {
        for seat in seats {
            debug!(x, y, player = seat.player, "clicking tile");
            seat.game
                .send_move(Move::click_tile(seat.player, x, y))
                .await?;

            let state = seat.game.get_state().await?;
            if let Some(outcome) = state.game_over() {
                debug!(player = seat.player, "terminal outcome observed");
                return Ok(Some(outcome.clone()));
            }
        }
    }

    Ok(None)
}
