//! Benchmark: LCS table construction and full diff at growing input sizes.
//!
//! Both are O(m·n); this tracks where the quadratic cost starts to hurt
//! interactive recomputation (100, 500, 2000 lines).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use doohickey_diff::{diff, LcsTable, LineSequence};

// ── Helpers ──

/// `n` lines where every seventh line differs between the two versions.
fn generate_pair(n: usize) -> (String, String) {
    let original: Vec<String> = (0..n).map(|i| format!("line {}", i)).collect();
    let modified: Vec<String> = (0..n)
        .map(|i| {
            if i % 7 == 0 {
                format!("changed {}", i)
            } else {
                format!("line {}", i)
            }
        })
        .collect();
    (original.join("\n"), modified.join("\n"))
}

// ── Benchmarks ──

fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcs_table_build");
    for &n in &[100, 500, 2000] {
        let (original, modified) = generate_pair(n);
        let a = LineSequence::split(&original);
        let b = LineSequence::split(&modified);

        group.bench_with_input(BenchmarkId::new("build", n), &n, |bench, _| {
            bench.iter(|| black_box(LcsTable::build(&a, &b)));
        });
    }
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_diff");
    for &n in &[100, 500, 2000] {
        let (original, modified) = generate_pair(n);

        group.bench_with_input(BenchmarkId::new("diff", n), &n, |bench, _| {
            bench.iter(|| black_box(diff(&original, &modified)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_table, bench_diff);
criterion_main!(benches);
