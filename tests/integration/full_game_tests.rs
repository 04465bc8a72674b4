//! End-to-end games driven to termination

use std::sync::Arc;
use std::time::Duration;
use parlor::{
    alternate_moves, Game, GameServer, Move, Participant, Seat, ServerOptions, SessionError,
    TransportMode,
};
use crate::mocks::{InMemoryLedger, BOARD_SIZE, WIN_THRESHOLD};

const READY_DEADLINE: Duration = Duration::from_millis(1000);

async fn setup_started_game(
    mode: TransportMode,
) -> (
    Arc<InMemoryLedger>,
    Game<InMemoryLedger>,
    Game<InMemoryLedger>,
) {
    let ledger = Arc::new(InMemoryLedger::new(mode));

    let mut options1 = ServerOptions::new("0xA");
    options1.confidential = mode == TransportMode::Confidential;
    let mut options2 = ServerOptions::new("0xB");
    options2.confidential = mode == TransportMode::Confidential;

    let server1 = GameServer::new(Arc::clone(&ledger), options1);
    let server2 = GameServer::new(Arc::clone(&ledger), options2);

    let game1 = server1
        .create_game(vec![Participant::new("0xA"), Participant::new("0xB")])
        .await
        .unwrap();
    game1.ready_within(READY_DEADLINE).await.unwrap();

    let game2 = server2.attach(game1.id()).await.unwrap();
    game2.ready_within(READY_DEADLINE).await.unwrap();

    game1.send_ready().await.unwrap();
    game2.send_ready().await.unwrap();
    game1.wait_started().await.unwrap();
    game2.wait_started().await.unwrap();

    (ledger, game1, game2)
}

#[tokio::test]
async fn test_complete_game_by_alternating_moves() {
    let (ledger, game1, game2) = setup_started_game(TransportMode::Confidential).await;

    let seats = [Seat::new(&game1, 1), Seat::new(&game2, 2)];
    let outcome = alternate_moves(&seats, BOARD_SIZE).await.unwrap();

    // Seat order makes player 1 the first claimer of every tile, so it
    // reaches the threshold first.
    let outcome = outcome.expect("game must terminate");
    assert_eq!(outcome["winner"], 1);

    // The driver stopped at the first terminal observation: exactly the
    // winning number of tiles was claimed, none after.
    assert_eq!(ledger.claimed_tiles(game1.id()), WIN_THRESHOLD);

    // The winning handle cached the outcome from its state fetch.
    assert_eq!(game1.outcome().unwrap()["winner"], 1);
}

#[tokio::test]
async fn test_complete_game_over_plain_channel() {
    let (_ledger, game1, game2) = setup_started_game(TransportMode::Plain).await;

    let seats = [Seat::new(&game1, 1), Seat::new(&game2, 2)];
    let outcome = alternate_moves(&seats, BOARD_SIZE).await.unwrap();

    assert_eq!(outcome.expect("game must terminate")["winner"], 1);
}

#[tokio::test]
async fn test_unregistered_player_move_rejected_without_mutation() {
    let (_ledger, game1, _game2) = setup_started_game(TransportMode::Confidential).await;

    let before = game1.get_state().await.unwrap();

    let err = game1
        .send_move(Move::click_tile(99, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::IllegalMove { .. }));

    let after = game1.get_state().await.unwrap();
    assert_eq!(before, after);
    assert_eq!(before.digest(), after.digest());
}

#[tokio::test]
async fn test_move_before_start_is_not_ready() {
    let ledger = Arc::new(InMemoryLedger::new(TransportMode::Confidential));
    let server = GameServer::new(Arc::clone(&ledger), ServerOptions::new("0xA"));

    let game = server
        .create_game(vec![Participant::new("0xA"), Participant::new("0xB")])
        .await
        .unwrap();
    game.ready_within(READY_DEADLINE).await.unwrap();

    // Checked locally; the move never reaches the collaborator.
    let err = game.send_move(Move::click_tile(1, 0, 0)).await.unwrap_err();
    assert!(matches!(err, SessionError::NotReady(_)));
}

#[tokio::test]
async fn test_get_state_is_read_idempotent() {
    let (_ledger, game1, _game2) = setup_started_game(TransportMode::Confidential).await;

    let first = game1.get_state().await.unwrap();
    let second = game1.get_state().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.digest(), second.digest());
}

#[tokio::test]
async fn test_out_of_bounds_move_rejected() {
    let (_ledger, game1, _game2) = setup_started_game(TransportMode::Confidential).await;

    let err = game1
        .send_move(Move::click_tile(1, BOARD_SIZE, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::IllegalMove { .. }));
}

#[tokio::test]
async fn test_moves_after_termination_rejected() {
    let (_ledger, game1, game2) = setup_started_game(TransportMode::Confidential).await;

    let seats = [Seat::new(&game1, 1), Seat::new(&game2, 2)];
    alternate_moves(&seats, BOARD_SIZE)
        .await
        .unwrap()
        .expect("game must terminate");

    // Terminal state is absorbing at the collaborator.
    let err = game1
        .send_move(Move::click_tile(1, BOARD_SIZE - 1, BOARD_SIZE - 1))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::IllegalMove { .. }));
}
