//! Criterion benchmarks for subset construction and traversal, sequential
//! and parallel.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tessera_bench::{reference_profile, stress_profile};
use tessera_test_utils::attr;

fn bench_subset_build(c: &mut Criterion) {
    let reg = reference_profile();
    let pos = attr::<[f64; 3]>(&reg, "position");
    let mass = attr::<f32>(&reg, "mass");
    let species = attr::<u16>(&reg, "species");

    c.bench_function("subset_build_3way_10k_blocks", |b| {
        b.iter(|| black_box(reg.subset((pos, mass, species)).unwrap().len()));
    });
}

fn bench_subset_traversal(c: &mut Criterion) {
    let reg = reference_profile();
    let subset = reg
        .subset((attr::<[f64; 3]>(&reg, "position"), attr::<f32>(&reg, "mass")))
        .unwrap();

    c.bench_function("subset_for_each_element_2way", |b| {
        b.iter(|| {
            let mut acc = 0.0f64;
            subset.for_each_element(|(p, m)| acc += p[0] * f64::from(*m));
            black_box(acc)
        });
    });

    c.bench_function("subset_iter_2way", |b| {
        b.iter(|| black_box(subset.iter().map(|(p, m)| p[0] * f64::from(*m)).sum::<f64>()));
    });

    c.bench_function("subset_iter_rev_2way", |b| {
        b.iter(|| {
            black_box(
                subset
                    .iter()
                    .rev()
                    .map(|(p, m)| p[0] * f64::from(*m))
                    .sum::<f64>(),
            )
        });
    });
}

fn bench_parallel(c: &mut Criterion) {
    let reg = stress_profile();
    let subset = reg
        .subset((attr::<[f64; 3]>(&reg, "position"), attr::<f32>(&reg, "mass")))
        .unwrap();

    let mut group = c.benchmark_group("stress_2way");
    group.sample_size(20);
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(subset.iter().map(|(p, m)| p[1] * f64::from(*m)).sum::<f64>()));
    });
    group.bench_function("rayon", |b| {
        b.iter(|| {
            black_box(
                subset
                    .clone()
                    .into_par_iter()
                    .map(|(p, m)| p[1] * f64::from(*m))
                    .sum::<f64>(),
            )
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_subset_build,
    bench_subset_traversal,
    bench_parallel
);
criterion_main!(benches);
