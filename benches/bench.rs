use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flatline::compose::flow_right;
use flatline::group::group_by;
use flatline::prelude::*;
use futures_lite::future::{block_on, yield_now};

use std::future;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("concurrent_map 10", |b| b.iter(|| map_test(black_box(10))));
    c.bench_function("concurrent_map 100", |b| b.iter(|| map_test(black_box(100))));
    c.bench_function("concurrent_map 1000", |b| b.iter(|| map_test(black_box(1000))));
    c.bench_function("group_by 1000", |b| b.iter(|| group_test(black_box(1000))));
    c.bench_function("flow_right 3", |b| {
        let composed = flow_right((|n: u64| n + 1, |n: u64| n * 2, |a: u64, b: u64| a ^ b));
        b.iter(|| composed.call((black_box(3), black_box(5))))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

/// Every iterator future yields once before completing, so each slot is
/// woken and polled a second time.
pub(crate) fn map_test(max: usize) {
    block_on(async {
        let elements = (0..max).map(|n| future::ready(Ok::<_, ()>(n)));
        let out = elements
            .concurrent_map(|n| async move {
                yield_now().await;
                Ok(n * 2)
            })
            .await
            .unwrap();
        assert_eq!(out.len(), max);
    })
}

pub(crate) fn group_test(max: usize) {
    let buckets = group_by(0..max, |n| n % 7);
    assert_eq!(buckets.total(), max);
}
