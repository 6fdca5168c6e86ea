use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_sim::config::SimulationConfig;
use holdem_sim::evaluator::HandEvaluator;
use holdem_sim::game::Game;
use holdem_sim::agents::PlayerModelKind;
use holdem_sim::hand::{Board, HoleCards};
use holdem_sim::stats::Statistics;

fn bench_evaluate(c: &mut Criterion) {
    let cases = [
        ("high_card", "5h 7d Kd As 3c", "4h Qd"),
        ("wheel", "4d 5s Ac Kh Qd", "2h 3c"),
        ("straight_flush", "9s Ts Js 2d 3c", "Qs Ks"),
        ("full_house", "9h 9d 7h 7c 2s", "9c Ad"),
    ];
    let mut g = c.benchmark_group("evaluate");
    for (name, board, hole) in cases {
        let board: Board = board.parse().expect("board");
        let hole: HoleCards = hole.parse().expect("hole");
        let mut eval = HandEvaluator::new();
        eval.reset(board.as_slice());
        g.bench_with_input(BenchmarkId::new("river", name), &hole, |b, hole| {
            b.iter(|| eval.evaluate(black_box(hole)))
        });
    }
    g.finish();
}

fn bench_reset_and_ten_players(c: &mut Criterion) {
    let board: Board = "Kh 4d 2d Ts Qc".parse().expect("board");
    let holes: Vec<HoleCards> = [
        "Jh Ad", "As Ks", "7c 7d", "2h 3h", "9s 8s", "Qh Qd", "5c 6c", "Th Js", "4c 4h", "Kc 3d",
    ]
    .iter()
    .map(|h| h.parse().expect("hole"))
    .collect();
    let mut eval = HandEvaluator::new();
    c.bench_function("reset_and_ten_players", |b| {
        b.iter(|| {
            eval.reset(black_box(board.as_slice()));
            holes.iter().map(|h| eval.evaluate(h)).max()
        })
    });
}

fn bench_deal(c: &mut Criterion) {
    let config = SimulationConfig {
        players: 10,
        iterations: u64::MAX,
        stats_winning_hand: true,
        stats_hole_cards: true,
        ..Default::default()
    };
    let mut stats = Statistics::new(&config);
    let mut game = Game::seeded(config.players, PlayerModelKind::Showdown, 42);
    c.bench_function("deal_ten_players", |b| b.iter(|| game.play(&mut stats).expect("deal")));
}

criterion_group!(benches, bench_evaluate, bench_reset_and_ten_players, bench_deal);
criterion_main!(benches);
