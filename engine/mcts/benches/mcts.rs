//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full search with varying iteration budgets
//! - Tree operations (expansion, backpropagation)
//! - Search from different board shapes (open, hazardous)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::Budget;
use games_gridrun::{AdvancedHeuristic, CustomHeuristic, GridRun};
use mcts::{MctsConfig, MctsSearch, MctsTree};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn open_board() -> GridRun {
    GridRun::from_ascii(
        "##########
         #A.......#
         #........#
         #.......G#
         ##########",
    )
    .unwrap()
}

fn hazardous_board() -> GridRun {
    GridRun::from_ascii(
        "##########
         #A..~....#
         #.~...~..#
         #...~...G#
         ##########",
    )
    .unwrap()
}

fn bench_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");

    for iters in [50u32, 100, 200, 400, 800] {
        group.throughput(Throughput::Elements(iters as u64));
        group.bench_with_input(BenchmarkId::new("open_board", iters), &iters, |b, &iters| {
            let game = open_board();
            let heuristic = CustomHeuristic::new();
            let config = MctsConfig::default().with_budget(Budget::Iterations(iters));

            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&game, &heuristic, config.clone());
                black_box(search.run(&mut rng).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_board_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_board_shapes");
    let iters = 200u32;

    group.bench_function("open", |b| {
        let game = open_board();
        let heuristic = CustomHeuristic::new();
        let config = MctsConfig::default().with_budget(Budget::Iterations(iters));

        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let mut search = MctsSearch::new(&game, &heuristic, config.clone());
            black_box(search.run(&mut rng).unwrap())
        });
    });

    group.bench_function("hazardous", |b| {
        let game = hazardous_board();
        let heuristic = AdvancedHeuristic::new();
        let config = MctsConfig::default().with_budget(Budget::Iterations(iters));

        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let mut search = MctsSearch::new(&game, &heuristic, config.clone());
            black_box(search.run(&mut rng).unwrap())
        });
    });

    group.finish();
}

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    group.bench_function("expand_chain_100", |b| {
        b.iter(|| {
            let mut tree = MctsTree::new(5);
            let mut parent = tree.root();
            for i in 0..100u8 {
                parent = tree.add_child(parent, i % 5);
            }
            black_box(tree.len())
        });
    });

    group.bench_function("backpropagate_depth_10", |b| {
        b.iter_batched(
            || {
                let mut tree = MctsTree::new(5);
                let mut parent = tree.root();
                for i in 0..10u8 {
                    parent = tree.add_child(parent, i % 5);
                }
                (tree, parent)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(leaf, 0.5);
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_iterations,
    bench_board_shapes,
    bench_tree_operations,
);

criterion_main!(benches);
