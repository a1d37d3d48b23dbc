use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use schelling_sim::simulation::{mean_similarity, GridState};
use schelling_sim::{SimulationConfig, SimulationRunner};

fn bench_config(size: usize) -> SimulationConfig {
    SimulationConfig {
        width: size,
        height: size,
        empty_ratio: 0.2,
        similarity_threshold: 0.5,
        races: 2,
        update_limit: 20_000,
        seed: 0xBEEF,
    }
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_run");
    for size in [20usize, 50, 100] {
        let runner = SimulationRunner::new(bench_config(size)).expect("valid config");
        group.bench_function(format!("grid{}x{}", size, size), |b| {
            b.iter(|| runner.run().expect("run"))
        });
    }
    group.finish();
}

fn bench_mean_similarity(c: &mut Criterion) {
    let config = bench_config(100);
    c.bench_function("mean_similarity_100x100", |b| {
        b.iter_batched(
            || {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
                GridState::initialize(&config, &mut rng).expect("grid")
            },
            |grid| mean_similarity(&grid),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_full_run, bench_mean_similarity);
criterion_main!(benches);
