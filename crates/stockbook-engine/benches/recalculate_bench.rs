//! Recalculation performance benchmarks.
//!
//! Run with: cargo bench -p stockbook-engine

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stockbook_core::{Ledger, Purchase, Sale, Transaction};
use stockbook_engine::{rebuild, recalculate, Operation};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    base_date() + Days::new(offset)
}

/// Build a consistent ledger with `n` transactions on consecutive days.
/// Two purchases of 10 units for every sale of 5, so stock never runs dry.
fn generate_ledger(n: u64) -> Ledger {
    let transactions: Vec<Transaction> = (0..n)
        .map(|i| {
            if i % 3 == 2 {
                Sale::new(day(i), 5, dec!(100.00) + Decimal::from(i)).into()
            } else {
                Purchase::new(day(i), 10, dec!(50.00) + Decimal::from(i)).into()
            }
        })
        .collect();

    rebuild(transactions).unwrap()
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("recalculate_append");

    for size in [10u64, 100, 1000] {
        let ledger = generate_ledger(size);
        group.throughput(Throughput::Elements(size));

        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| {
                let purchase = Purchase::new(day(size + 1), 10, dec!(80.00));
                black_box(recalculate(ledger, purchase.into(), Operation::Add).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_front_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("recalculate_front_insert");

    for size in [10u64, 100, 1000] {
        let ledger = generate_ledger(size);
        group.throughput(Throughput::Elements(size));

        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| {
                // One day before the whole history: everything is replayed
                let purchase = Purchase::new(base_date() - Days::new(1), 10, dec!(80.00));
                black_box(recalculate(ledger, purchase.into(), Operation::Add).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");

    for size in [10u64, 100, 1000] {
        let ledger = generate_ledger(size);
        group.throughput(Throughput::Elements(size));

        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter_batched(
                || ledger.transactions(),
                |transactions| black_box(rebuild(transactions).unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_front_insert, bench_rebuild);
criterion_main!(benches);
