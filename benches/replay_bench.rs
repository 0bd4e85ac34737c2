use criterion::{black_box, criterion_group, criterion_main, Criterion};

use premove::preview;
use premove::types::{Premove, Side};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn bench_replay(c: &mut Criterion) {
    // A realistic queued plan: develop, castle, keep developing.
    let moves: Vec<Premove> = ["e2e4", "g1f3", "f1c4", "e1g1", "d2d3", "c1g5"]
        .iter()
        .map(|s| Premove::parse(s).expect("move literal"))
        .collect();

    c.bench_function("replay_six_premoves_startpos", |b| {
        b.iter(|| {
            preview::replay(black_box(START_FEN), Side::White, black_box(&moves))
                .expect("chain replays")
        })
    });

    c.bench_function("replay_single_premove_startpos", |b| {
        let head = &moves[..1];
        b.iter(|| {
            preview::replay(black_box(START_FEN), Side::White, black_box(head))
                .expect("chain replays")
        })
    });
}

criterion_group!(benches, bench_replay);
criterion_main!(benches);
