//! Benchmarks for ingestion and amount splits.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recon_grid::ingest::{ingest, ColumnHints};
use recon_grid::present::format_amount;
use recon_grid::reconcile::{ReconcileOptions, Reconciler};
use serde_json::{json, Value};

/// Synthetic dataset shaped like a reconciliation export
fn dataset(rows: usize) -> String {
    let records: Vec<Value> = (0..rows)
        .map(|i| {
            json!({
                "FactRecID": format!("{i:08x}"),
                "ServiceDate": "2024-03-01",
                "Amount": format!("{}.{:02}", (i * 37) % 5000, i % 100),
                "Difference": -((i % 50) as i64),
                "Comments": "",
            })
        })
        .collect();
    serde_json::to_string(&records).expect("Failed to serialize dataset")
}

/// Benchmark ingestion across dataset sizes
fn bench_ingest(c: &mut Criterion) {
    let hints = ColumnHints::from_lists(Some("Amount;Difference"), None, None);
    let mut group = c.benchmark_group("ingest");

    for rows in [100, 1_000, 10_000] {
        let data = dataset(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| ingest(black_box(Some(data.as_str())), &hints))
        });
    }

    group.finish();
}

/// Benchmark repeated splits near the end of a large collection
fn bench_split(c: &mut Criterion) {
    let records = ingest(Some(dataset(5_000).as_str()), &ColumnHints::default()).records;
    let source = format!("{:08x}", 4_998);

    c.bench_function("split_5000", |b| {
        b.iter_batched(
            || Reconciler::with_records(ReconcileOptions::default(), records.clone()),
            |mut r| {
                r.split_amount(Some(black_box(source.as_str())), Some(1.0))
                    .expect("Failed to split")
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

/// Benchmark display formatting of amount cells
fn bench_format(c: &mut Criterion) {
    let cells = [json!(-1234567.5), json!("(50)"), json!("1,234.5"), json!(0)];
    c.bench_function("format_amount", |b| {
        b.iter(|| {
            for cell in &cells {
                black_box(format_amount(black_box(cell)));
            }
        })
    });
}

criterion_group!(benches, bench_ingest, bench_split, bench_format);
criterion_main!(benches);
