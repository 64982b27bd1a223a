//! Performance benchmarks for the elevation alignment optimizer.
//!
//! Run with: `cargo bench --features synthetic`
//!
//! Uses the synthetic track generator for deterministic, realistic
//! elevation profiles with known ground-truth shifts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trackalign::synthetic::SyntheticScenario;
use trackalign::{find_offsets, AlignConfig};

fn bench_batch_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_offsets/batch_size");
    for activity_count in [2, 4, 8, 16] {
        let batch = SyntheticScenario {
            activity_count,
            length_m: 8_000.0,
            spacing_m: 10.0,
            max_shift_m: 80.0,
            elevation_noise_m: 1.5,
            seed: 42,
        }
        .generate();

        group.bench_with_input(
            BenchmarkId::from_parameter(activity_count),
            &batch.series,
            |b, series| {
                b.iter(|| find_offsets(black_box(series), &AlignConfig::default()).unwrap())
            },
        );
    }
    group.finish();
}

fn bench_profile_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_offsets/sample_spacing");
    for spacing_m in [50.0, 10.0, 2.0] {
        let batch = SyntheticScenario {
            activity_count: 2,
            length_m: 8_000.0,
            spacing_m,
            max_shift_m: 80.0,
            elevation_noise_m: 1.5,
            seed: 42,
        }
        .generate();

        group.bench_with_input(
            BenchmarkId::from_parameter(spacing_m as u32),
            &batch.series,
            |b, series| {
                b.iter(|| find_offsets(black_box(series), &AlignConfig::default()).unwrap())
            },
        );
    }
    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_parallel(c: &mut Criterion) {
    use trackalign::find_offsets_parallel;

    let batch = SyntheticScenario {
        activity_count: 16,
        length_m: 8_000.0,
        spacing_m: 10.0,
        max_shift_m: 80.0,
        elevation_noise_m: 1.5,
        seed: 42,
    }
    .generate();

    c.bench_function("find_offsets/parallel_16", |b| {
        b.iter(|| find_offsets_parallel(black_box(&batch.series), &AlignConfig::default()).unwrap())
    });
}

#[cfg(not(feature = "parallel"))]
criterion_group!(benches, bench_batch_size, bench_profile_resolution);
#[cfg(feature = "parallel")]
criterion_group!(
    benches,
    bench_batch_size,
    bench_profile_resolution,
    bench_parallel
);
criterion_main!(benches);
