//! Criterion benchmarks for the evolutionary path search.
//!
//! Uses a synthetic catalog so timings measure engine overhead, not
//! catalog construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pathwise::{Catalog, EngineConfig, LearnerProfile, Unit};

/// Catalog of `n` units spread over five difficulty bands, with a chain of
/// prerequisite links inside each band.
fn synthetic_catalog(n: u32) -> Catalog {
    let mut builder = Catalog::builder();
    for id in 1..=n {
        let difficulty = ((id - 1) % 5 + 1) as u8;
        let time = 20 + (id % 4) * 10;
        builder = builder.unit(Unit::new(
            id,
            format!("unit-{id}"),
            difficulty,
            time,
            [format!("concept-{id}")],
        ));
        if id > 5 {
            builder = builder.requires(id, id - 5);
        }
    }
    builder.build().expect("synthetic catalog is well-formed")
}

fn synthetic_profile(n: u32) -> LearnerProfile {
    let mut profile = LearnerProfile::new(160, 360);
    // Every third concept assessed, alternating weak and strong.
    for id in (1..=n).step_by(3) {
        let proficiency = if id % 2 == 0 { 85.0 } else { 25.0 };
        profile = profile.with_concept(format!("concept-{id}"), proficiency);
    }
    profile
}

fn bench_evolve_population_sizes(c: &mut Criterion) {
    let catalog = synthetic_catalog(60);
    let profile = synthetic_profile(60);

    let mut group = c.benchmark_group("evolve/population");
    for &population in &[25usize, 50, 100] {
        let config = EngineConfig::default()
            .with_population_size(population)
            .with_generations(50)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(population), &config, |b, cfg| {
            b.iter(|| pathwise::evolve(black_box(&catalog), black_box(&profile), cfg).unwrap());
        });
    }
    group.finish();
}

fn bench_evolve_catalog_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve/catalog");
    for &units in &[20u32, 60, 200] {
        let catalog = synthetic_catalog(units);
        let profile = synthetic_profile(units);
        let config = EngineConfig::default()
            .with_population_size(50)
            .with_generations(50)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(units), &units, |b, _| {
            b.iter(|| pathwise::evolve(black_box(&catalog), black_box(&profile), &config).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evolve_population_sizes, bench_evolve_catalog_sizes);
criterion_main!(benches);
