//! Search and learning benchmarks.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure:
//! - Full MCTS search with varying playout budgets
//! - Search from opening and midgame positions
//! - Q-learning runs and table updates

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_gridsearch::core::PlayerId;
use rust_gridsearch::games::connect::{Board, ConnectGame};
use rust_gridsearch::mcts::{MCTSConfig, MCTSSearch};
use rust_gridsearch::qlearn::{QLearningAgent, QLearningConfig};

// =============================================================================
// MCTS
// =============================================================================

fn bench_mcts_budgets(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_budget");
    let game = ConnectGame::standard();
    let state = game.initial_state();

    for budget in [40u32, 200, 800] {
        group.throughput(Throughput::Elements(u64::from(budget)));
        group.bench_with_input(BenchmarkId::new("connect_6x7", budget), &budget, |b, &budget| {
            let config = MCTSConfig::default().with_budget(budget).with_seed(42);
            let mut search = MCTSSearch::new(game, PlayerId::FIRST, config).unwrap();
            b.iter(|| black_box(search.best_move(black_box(&state), PlayerId::FIRST)));
        });
    }

    group.finish();
}

fn bench_mcts_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_position");
    let game = ConnectGame::standard();
    let midgame = Board::parse(&[
        ".......",
        ".......",
        "...O...",
        "..XX...",
        "..OXO..",
        ".XOXO..",
    ])
    .unwrap();

    for (name, state) in [("opening", game.initial_state()), ("midgame", midgame)] {
        group.bench_function(name, |b| {
            let config = MCTSConfig::default().with_budget(200).with_seed(7);
            let mut search = MCTSSearch::new(game, PlayerId::FIRST, config).unwrap();
            b.iter(|| black_box(search.best_move(&state, PlayerId::FIRST)));
        });
    }

    group.finish();
}

// =============================================================================
// Q-learning
// =============================================================================

fn bench_q_learning(c: &mut Criterion) {
    let game = ConnectGame::standard();
    let state = game.initial_state();

    c.bench_function("q_learning_run", |b| {
        let config = QLearningConfig::default().with_seed(3);
        let mut agent = QLearningAgent::new(game, PlayerId::FIRST, config).unwrap();
        b.iter(|| black_box(agent.learning_run(black_box(&state))));
    });

    c.bench_function("q_update", |b| {
        let config = QLearningConfig::default().with_seed(3);
        let mut agent = QLearningAgent::new(game, PlayerId::FIRST, config).unwrap();
        b.iter(|| black_box(agent.update_q(&state, &3, black_box(10.0))));
    });
}

criterion_group!(benches, bench_mcts_budgets, bench_mcts_positions, bench_q_learning);
criterion_main!(benches);
