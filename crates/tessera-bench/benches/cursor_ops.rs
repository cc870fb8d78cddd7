//! Criterion micro-benchmarks for range cursors and array lookups.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tessera_bench::{reference_profile, scattered_entries};
use tessera_core::RangeCursor;
use tessera_test_utils::attr;

fn bench_cursor_walk(c: &mut Criterion) {
    let reg = reference_profile();
    let mass = reg.get(attr::<f32>(&reg, "mass")).unwrap();

    c.bench_function("range_cursor_step_60k", |b| {
        b.iter(|| {
            let mut cursor = RangeCursor::start(mass.domain());
            let mut acc = 0i64;
            while !cursor.is_end() {
                acc = acc.wrapping_add(cursor.entry());
                cursor.advance(1);
            }
            black_box(acc)
        });
    });

    c.bench_function("array_iter_sum_60k", |b| {
        b.iter(|| black_box(mass.iter().map(|(_, m)| *m).sum::<f32>()));
    });
}

fn bench_random_access(c: &mut Criterion) {
    let reg = reference_profile();
    let mass = reg.get(attr::<f32>(&reg, "mass")).unwrap();
    let targets = scattered_entries(mass.domain(), 1000, 42);

    c.bench_function("array_get_scattered_1k", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for &e in &targets {
                acc += mass.get(black_box(e)).copied().unwrap_or_default();
            }
            black_box(acc)
        });
    });

    c.bench_function("cursor_move_to_scattered_1k", |b| {
        b.iter(|| {
            let mut cursor = mass.cursor_at_start();
            let mut acc = 0.0f32;
            for &e in &targets {
                cursor.move_to(black_box(e));
                acc += *cursor.value();
            }
            black_box(acc)
        });
    });
}

criterion_group!(benches, bench_cursor_walk, bench_random_access);
criterion_main!(benches);
