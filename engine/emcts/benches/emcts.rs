//! EMCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p emcts`
//!
//! These benchmarks measure:
//! - Full search with varying iteration budgets
//! - The evolutionary operators (root init, mutation + repair)
//! - Search from different board shapes (open, hazardous)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use emcts::{init_root_genome, mutate, repair, EmctsConfig, EmctsSearch, Genome};
use engine_core::Budget;
use games_gridrun::{AdvancedHeuristic, CustomHeuristic, GridRun};
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
    let mut group = c.benchmark_group("emcts_search_iterations");

    for iters in [50u32, 100, 200, 400, 800] {
        group.throughput(Throughput::Elements(iters as u64));
        group.bench_with_input(BenchmarkId::new("open_board", iters), &iters, |b, &iters| {
            let game = open_board();
            let heuristic = CustomHeuristic::new();
            let config = EmctsConfig::default().with_budget(Budget::Iterations(iters));

            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = EmctsSearch::new(&game, &heuristic, config.clone());
                black_box(search.run(&mut rng).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_board_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("emcts_board_shapes");
    let iters = 200u32;

    group.bench_function("open", |b| {
        let game = open_board();
        let heuristic = CustomHeuristic::new();
        let config = EmctsConfig::default().with_budget(Budget::Iterations(iters));

        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let mut search = EmctsSearch::new(&game, &heuristic, config.clone());
            black_box(search.run(&mut rng).unwrap())
        });
    });

    group.bench_function("hazardous", |b| {
        let game = hazardous_board();
        let heuristic = AdvancedHeuristic::new();
        let config = EmctsConfig::default().with_budget(Budget::Iterations(iters));

        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let mut search = EmctsSearch::new(&game, &heuristic, config.clone());
            black_box(search.run(&mut rng).unwrap())
        });
    });

    group.finish();
}

fn bench_genome_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("emcts_genome_ops");

    group.bench_function("init_root_genome", |b| {
        let game = open_board();
        let heuristic = CustomHeuristic::new();

        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            black_box(init_root_genome(&game, &heuristic, 5, 1e-6, &mut rng))
        });
    });

    group.bench_function("mutate_and_repair", |b| {
        let game = hazardous_board();
        let heuristic = AdvancedHeuristic::new();
        let mut seed_rng = ChaCha20Rng::seed_from_u64(42);
        let genome = Genome::random(5, &mut seed_rng);

        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let mut child = mutate(&genome, &mut rng);
            repair(&game, &mut child, &heuristic, 1e-6, &mut rng);
            black_box(child)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_iterations,
    bench_board_shapes,
    bench_genome_operators,
);

criterion_main!(benches);
