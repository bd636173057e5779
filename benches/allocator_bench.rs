//! Benchmarks for allocator operations.
//!
//! Validates allocation, free/coalesce, and statistics cost as the block
//! list grows.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use memsim::{Allocator, BlockId, Strategy};
use std::hint::black_box;

/// Allocator with `n` allocated 1 KB blocks separated by 1 KB holes.
fn fragmented(n: usize) -> Allocator {
    let mut allocator = Allocator::new(n * 2 + 64).unwrap();
    let ids: Vec<BlockId> = (0..n * 2)
        .map(|_| allocator.allocate(1, Strategy::FirstFit).unwrap())
        .collect();
    for id in ids.into_iter().step_by(2) {
        allocator.free(id).unwrap();
    }
    allocator
}

/// Benchmark filling an empty region with small blocks.
fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocator/fill");

    for count in [64usize, 256, 1024] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("blocks", count), &count, |b, &n| {
            b.iter(|| {
                let mut allocator = Allocator::new(n * 4).unwrap();
                for _ in 0..n {
                    black_box(allocator.allocate(4, Strategy::FirstFit).unwrap());
                }
                allocator
            });
        });
    }

    group.finish();
}

/// Benchmark allocation/free cycles that exercise coalescing.
fn bench_alloc_free_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocator/alloc_free_cycle");
    group.throughput(Throughput::Elements(100));

    group.bench_function("100_cycles", |b| {
        b.iter(|| {
            let mut allocator = Allocator::new(1024).unwrap();
            for i in 0..100usize {
                let large = allocator.allocate(8 + i % 8, Strategy::BestFit).unwrap();
                let small = allocator.allocate(4, Strategy::FirstFit).unwrap();
                allocator.free(large).unwrap();
                allocator.free(small).unwrap();
            }
            black_box(allocator.free_block_count())
        });
    });

    group.finish();
}

/// Benchmark freeing into a fragmented list.
fn bench_free_coalesce(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocator/free_coalesce");

    for holes in [64usize, 256, 1024] {
        let base = fragmented(holes);
        let victim = base.allocated_blocks()[holes / 2].raw_id();

        group.bench_with_input(BenchmarkId::new("holes", holes), &holes, |b, _| {
            b.iter_batched(
                || base.clone(),
                |mut allocator| {
                    allocator.free(victim).unwrap();
                    allocator
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark statistics queries on a fragmented list.
fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocator/stats");

    let allocator = fragmented(1024);

    group.bench_function("stats_1024_holes", |b| {
        b.iter(|| black_box(allocator.stats()));
    });
    group.bench_function("fragmentation_1024_holes", |b| {
        b.iter(|| black_box(allocator.fragmentation_percent()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fill,
    bench_alloc_free_cycle,
    bench_free_coalesce,
    bench_stats
);
criterion_main!(benches);
