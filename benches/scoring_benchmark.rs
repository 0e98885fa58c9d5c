//! Scoring micro-benchmarks.
//!
//! Both policies are O(1); the benchmark exists to catch accidental
//! regressions if the lookup or banding ever grows allocation or branching.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use riskledger::scoring::{classify, matrix_score};

fn bench_matrix_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_score");
    for (l, i) in [(1, 1), (3, 4), (5, 5)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("L{}xI{}", l, i)),
            &(l, i),
            |b, &(l, i)| b.iter(|| matrix_score(black_box(l), black_box(i))),
        );
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_full_grid", |b| {
        b.iter(|| {
            for l in 1..=5u8 {
                for i in 1..=5u8 {
                    black_box(classify(black_box(l), black_box(i)));
                }
            }
        })
    });
}

criterion_group!(benches, bench_matrix_lookup, bench_classify);
criterion_main!(benches);
