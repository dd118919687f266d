//! Criterion micro-benchmarks for pool allocation, reuse and field access.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use strand_arena::{EntityPool, Layout, PoolConfig};
use strand_core::VertexIndex;

/// Record with one index field and two payload fields, close to a vertex.
fn record_layout() -> Layout {
    Layout::builder()
        .index("link")
        .f64("x")
        .f64("y")
        .build()
        .unwrap()
}

/// Benchmark: Allocate 10K records into a pool that starts small.
fn bench_pool_alloc_10k(c: &mut Criterion) {
    let layout = record_layout();
    c.bench_function("pool_alloc_10k", |b| {
        b.iter(|| {
            let mut pool = EntityPool::<VertexIndex>::new(layout.clone(), &PoolConfig::new(16));
            for _ in 0..10_000 {
                black_box(pool.alloc());
            }
            black_box(pool.len());
        });
    });
}

/// Benchmark: Delete and reallocate every other slot of a 10K pool.
fn bench_pool_reuse_10k(c: &mut Criterion) {
    let mut pool = EntityPool::<VertexIndex>::new(record_layout(), &PoolConfig::new(10_000));
    for _ in 0..10_000 {
        pool.alloc();
    }
    c.bench_function("pool_reuse_10k", |b| {
        b.iter(|| {
            for i in (0..10_000).step_by(2) {
                pool.delete(VertexIndex(i));
            }
            for _ in 0..5_000 {
                black_box(pool.alloc());
            }
        });
    });
}

/// Benchmark: Write then read an f64 field across 10K live slots.
fn bench_pool_field_access_10k(c: &mut Criterion) {
    let layout = record_layout();
    let x = layout.field_named("x").unwrap().offset();
    let mut pool = EntityPool::<VertexIndex>::new(layout, &PoolConfig::new(10_000));
    for _ in 0..10_000 {
        pool.alloc();
    }
    c.bench_function("pool_field_access_10k", |b| {
        b.iter(|| {
            for i in 0..10_000u32 {
                pool.view_mut(VertexIndex(i)).put_f64(x, f64::from(i));
            }
            let mut sum = 0.0;
            for v in pool.iter() {
                sum += pool.view(v).get_f64(x);
            }
            black_box(sum);
        });
    });
}

criterion_group!(
    benches,
    bench_pool_alloc_10k,
    bench_pool_reuse_10k,
    bench_pool_field_access_10k
);
criterion_main!(benches);
