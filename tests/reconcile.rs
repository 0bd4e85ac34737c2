use premove::preview::{self, BrokenChain};
use premove::queue::PremoveQueue;
use premove::types::{Premove, Side};

const E4_FEN: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
// Same position but the g1 knight is gone, as if the opponent captured it.
const NO_KNIGHT_FEN: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKB1R w KQkq - 0 1";
// After 1.e4 d5: a harmless opponent reply that leaves the queued chain intact.
const D5_FEN: &str = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";

fn pm(s: &str) -> Premove {
    Premove::parse(s).expect("premove literal")
}

#[test]
fn keeps_queue_and_refreshes_preview_when_chain_survives() {
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(E4_FEN, pm("g1f3")));
    q.reconcile(D5_FEN);
    assert_eq!(q.moves(), &[pm("g1f3")]);
    let fen = q.preview_fen().expect("refreshed preview");
    assert!(
        fen.starts_with("rnbqkbnr/ppp1pppp/8/3p4/4P3/5N2/PPPP1PPP/RNBQKB1R b"),
        "preview should replay on top of the new position: {fen}"
    );
}

#[test]
fn clears_queue_when_head_piece_is_captured() {
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(E4_FEN, pm("g1f3")));
    q.reconcile(NO_KNIGHT_FEN);
    assert!(q.is_empty(), "queue should not survive losing its piece");
    assert_eq!(q.preview_fen(), None);
}

#[test]
fn never_keeps_a_valid_prefix() {
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(E4_FEN, pm("d2d4")));
    assert!(q.add(E4_FEN, pm("g1f3")));
    // The knight is gone: move 0 still replays, move 1 does not. The whole
    // queue goes, not just the tail.
    q.reconcile(NO_KNIGHT_FEN);
    assert!(q.is_empty());
}

#[test]
fn clears_defensively_on_unreadable_position() {
    let mut q = PremoveQueue::new(Side::White);
    assert!(q.add(E4_FEN, pm("g1f3")));
    q.reconcile("definitely not a fen");
    assert!(q.is_empty());
    assert_eq!(q.preview_fen(), None);
}

#[test]
fn reconcile_on_an_empty_queue_is_a_quiet_noop() {
    let mut q = PremoveQueue::new(Side::White);
    q.reconcile(E4_FEN);
    assert!(q.is_empty());
    assert_eq!(q.preview_fen(), None);
}

#[test]
fn replay_reports_the_first_broken_index() {
    let moves = [pm("g1f3"), pm("f3e5")];
    assert!(preview::replay(E4_FEN, Side::White, &moves).is_ok());
    assert_eq!(
        preview::replay(NO_KNIGHT_FEN, Side::White, &moves),
        Err(BrokenChain { index: 0 })
    );
    // Nf3 then Nxe4 runs into white's own pawn: broken at the second move.
    let blocked = [pm("g1f3"), pm("f3e4")];
    assert_eq!(
        preview::replay(E4_FEN, Side::White, &blocked),
        Err(BrokenChain { index: 1 })
    );
}
