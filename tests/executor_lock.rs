use premove::executor::Executor;
use premove::queue::PremoveQueue;
use premove::submit::{GameSnapshot, GameStatus};
use premove::types::{Premove, Side};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const E4_FEN: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
const NO_KNIGHT_FEN: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKB1R w KQkq - 0 1";

fn pm(s: &str) -> Premove {
    Premove::parse(s).expect("premove literal")
}

fn snapshot(fen: &str, turn: Side) -> GameSnapshot {
    GameSnapshot {
        game_id: "game-1".to_string(),
        current_position: fen.to_string(),
        status: GameStatus::Active,
        turn,
        result: None,
    }
}

#[test]
fn holds_the_lock_until_finished() {
    let mut ex = Executor::new();
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(START_FEN, pm("e2e4")));

    let snap = snapshot(START_FEN, Side::White);
    let pending = ex.try_begin(&snap, &mut q).expect("head submission");
    assert_eq!(pending.notation, "e2e4");
    assert!(ex.in_flight());
    assert!(ex.try_begin(&snap, &mut q).is_none(), "no second submission while one is in flight");

    ex.finish_success(&mut q);
    assert!(!ex.in_flight());
    assert!(q.is_empty(), "success removes exactly the head");
}

#[test]
fn declines_when_it_is_not_the_users_turn() {
    let mut ex = Executor::new();
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(E4_FEN, pm("g1f3")));
    assert!(ex.try_begin(&snapshot(E4_FEN, Side::Black), &mut q).is_none());
    assert!(!ex.in_flight());
    assert_eq!(q.len(), 1, "declining must not disturb the queue");
}

#[test]
fn declines_when_the_game_is_over() {
    let mut ex = Executor::new();
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(START_FEN, pm("e2e4")));
    let mut snap = snapshot(START_FEN, Side::White);
    snap.status = GameStatus::Finished;
    assert!(ex.try_begin(&snap, &mut q).is_none());
    assert_eq!(q.len(), 1);
}

#[test]
fn stale_head_clears_the_queue_without_submitting() {
    let mut ex = Executor::new();
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(E4_FEN, pm("g1f3")));
    // Authoritative position lost the knight between reconciliation and the
    // trigger firing.
    assert!(ex.try_begin(&snapshot(NO_KNIGHT_FEN, Side::White), &mut q).is_none());
    assert!(q.is_empty());
    assert_eq!(q.preview_fen(), None);
    assert!(!ex.in_flight(), "staleness must not leave the lock held");
}

#[test]
fn unreadable_position_clears_the_queue_defensively() {
    let mut ex = Executor::new();
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(START_FEN, pm("e2e4")));
    assert!(ex.try_begin(&snapshot("garbage", Side::White), &mut q).is_none());
    assert!(q.is_empty());
    assert!(!ex.in_flight());
}

#[test]
fn cancellation_midflight_makes_head_removal_a_noop() {
    let mut ex = Executor::new();
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(START_FEN, pm("e2e4")));
    assert!(q.add(START_FEN, pm("d2d4")));

    let snap = snapshot(START_FEN, Side::White);
    assert!(ex.try_begin(&snap, &mut q).is_some());
    // The user cancels while the submission is on the wire. The submission
    // itself cannot be aborted; its completion just finds nothing to remove.
    q.cancel();
    ex.finish_success(&mut q);
    assert!(q.is_empty());
    assert!(!ex.in_flight());
    assert!(ex.try_begin(&snap, &mut q).is_none(), "nothing left to execute");
}

#[test]
fn failure_is_terminal_for_the_whole_queue() {
    let mut ex = Executor::new();
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(START_FEN, pm("e2e4")));
    assert!(q.add(START_FEN, pm("d2d4")));

    let snap = snapshot(START_FEN, Side::White);
    assert!(ex.try_begin(&snap, &mut q).is_some());
    ex.finish_failure(&mut q);
    assert!(q.is_empty(), "one failed submission invalidates everything queued");
    assert_eq!(q.preview_fen(), None);
    assert!(!ex.in_flight());
}
