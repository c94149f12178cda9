//! Tick throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use saurian::core::config::SimulationConfig;
use saurian::ecosystem::Ecosystem;
use saurian::simulation::collision::resolve_overlaps;
use saurian::simulation::{run_simulation_tick, run_ticks, PlayerInput};

fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");

    for cap in [16usize, 32, 64].iter() {
        let mut config = SimulationConfig::default();
        config.max_animals = *cap;
        let mut world = Ecosystem::with_initial_population(config, 42);

        // Warm up
        run_ticks(&mut world, 100);

        group.bench_with_input(BenchmarkId::new("max_animals", cap), cap, |b, _| {
            b.iter(|| run_simulation_tick(&mut world, PlayerInput::idle()));
        });
    }

    group.finish();
}

fn benchmark_collisions(c: &mut Criterion) {
    let mut world = Ecosystem::with_initial_population(SimulationConfig::default(), 7);
    run_ticks(&mut world, 500);

    c.bench_function("resolve_overlaps", |b| {
        b.iter(|| black_box(resolve_overlaps(&mut world)));
    });
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut world = Ecosystem::with_initial_population(SimulationConfig::default(), 9);
    run_ticks(&mut world, 200);

    c.bench_function("snapshot_to_json", |b| {
        b.iter(|| black_box(world.snapshot().to_json()))
    });
}

criterion_group!(benches, benchmark_tick, benchmark_collisions, benchmark_snapshot);
criterion_main!(benches);
