use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use finance_core::core::services::{BudgetService, ForecastService, SummaryService};
use finance_core::ledger::{BudgetCategory, CategoryBudget, Transaction, TransactionCategory};
use finance_core::storage::{JsonFileStore, KeyValueStore, TRANSACTIONS_KEY};
use finance_core::SeededRandom;
use tempfile::tempdir;

fn build_sample_history(txn_count: usize) -> Vec<Transaction> {
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..txn_count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 365) as i64);
            let category = TransactionCategory::from(
                BudgetCategory::ALL[idx % BudgetCategory::ALL.len()],
            );
            Transaction::new(
                "Bench Merchant",
                "Benchmark entry",
                -(5.0 + (idx % 100) as f64),
                category,
                date.format("%Y-%m-%d").to_string(),
            )
        })
        .collect()
}

fn build_budgets() -> Vec<CategoryBudget> {
    BudgetCategory::ALL
        .into_iter()
        .map(|category| CategoryBudget::new(category, 500.0))
        .collect()
}

fn bench_document_io(c: &mut Criterion) {
    let history = build_sample_history(black_box(10_000));
    let document = serde_json::to_value(&history).expect("encode history");
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(Some(dir.path().to_path_buf())).expect("store");

    c.bench_function("transactions_save_10k", |b| {
        b.iter(|| {
            store.set(TRANSACTIONS_KEY, &document).expect("save transactions");
        })
    });

    store.set(TRANSACTIONS_KEY, &document).expect("seed");

    c.bench_function("transactions_load_10k", |b| {
        b.iter(|| {
            let loaded = store.get(TRANSACTIONS_KEY).expect("load transactions");
            black_box(loaded);
        })
    });
}

fn bench_derivations(c: &mut Criterion) {
    let history = build_sample_history(black_box(10_000));
    let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("recompute_spent_10k", |b| {
        b.iter_batched(
            build_budgets,
            |mut budgets| {
                BudgetService::recompute_spent(&mut budgets, &history);
                black_box(budgets);
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("monthly_summary_current", |b| {
        b.iter(|| {
            let summary = SummaryService::calculate(&history, reference);
            black_box(summary);
        })
    });

    c.bench_function("next_month_forecast", |b| {
        let mut rng = SeededRandom::new(7);
        b.iter(|| {
            let forecast = ForecastService::predict_next_month_expense(&history, &mut rng);
            black_box(forecast);
        })
    });
}

criterion_group!(benches, bench_document_io, bench_derivations);
criterion_main!(benches);
