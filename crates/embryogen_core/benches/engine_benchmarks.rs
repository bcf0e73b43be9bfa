use criterion::{black_box, criterion_group, criterion_main, Criterion};
use embryogen_core::config::{AppConfig, EngineMode};
use embryogen_core::engine::SimulationEngine;

fn engine_at_week(mode: EngineMode, week: u32) -> SimulationEngine {
    let config = AppConfig::for_mode(mode).with_seed(42);
    let mut engine = match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => panic!("benchmark config rejected: {e}"),
    };
    engine.run_until_week(week);
    engine
}

fn bench_lattice_tick(c: &mut Criterion) {
    let mut engine = engine_at_week(EngineMode::Lattice, 6);
    c.bench_function("lattice_tick_150", |b| b.iter(|| black_box(engine.tick())));
}

fn bench_agent_tick(c: &mut Criterion) {
    let mut engine = engine_at_week(EngineMode::OffLattice, 6);
    c.bench_function("agent_tick_week6", |b| b.iter(|| black_box(engine.tick())));
}

fn bench_morphogen_update(c: &mut Criterion) {
    let mut field = embryogen_core::morphogen::MorphogenField::new(150);
    c.bench_function("morphogen_update_150", |b| {
        b.iter(|| {
            field.update(black_box(5), 0.94, 0.6);
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_lattice_tick, bench_agent_tick, bench_morphogen_update
}
criterion_main!(benches);
