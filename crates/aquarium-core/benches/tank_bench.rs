use aquarium_core::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

/// A busy tank: the default garden plus `fish` extra fish and a scattering of pellets
fn busy_tank(fish: usize) -> AquariumEngine {
    let mut engine = AquariumEngine::new(TankConfig::default()).unwrap();
    for i in 0..fish {
        let kind = FishKind::ALL[i % FishKind::ALL.len()];
        engine.spawn_fish(kind, None).unwrap();
    }
    for i in 0..20 {
        engine.feed_at(40.0 + i as f32 * 44.0).unwrap();
    }
    engine
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    group.measurement_time(Duration::from_secs(5));

    // Ticks per bench iteration (can override via AQ_BENCH_TICKS)
    let ticks: usize = std::env::var("AQ_BENCH_TICKS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(60);

    for fish in [10_usize, 100, 500] {
        group.bench_function(format!("ticks{}_fish{}", ticks, fish), |b| {
            b.iter_batched(
                || busy_tank(fish),
                |mut engine| {
                    for _ in 0..ticks {
                        engine.advance(1.0 / 60.0);
                    }
                    engine
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let engine = busy_tank(200);
    c.bench_function("snapshot_fish200", |b| b.iter(|| engine.snapshot()));
}

criterion_group!(benches, bench_advance, bench_snapshot);
criterion_main!(benches);
