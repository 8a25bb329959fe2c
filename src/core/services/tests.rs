use chrono::NaiveDate;

use crate::core::random::FixedSequence;
use crate::core::services::{BudgetService, ForecastService, SummaryService, TransactionService};
use crate::ledger::{BudgetCategory, CategoryBudget, Transaction, TransactionCategory};

fn january_groceries() -> Vec<Transaction> {
    let mut txns = Vec::new();
    TransactionService::add(
        &mut txns,
        Transaction::new(
            "Safeway",
            "Safeway payment",
            -50.0,
            TransactionCategory::Groceries,
            "2024-01-05",
        ),
    );
    TransactionService::add(
        &mut txns,
        Transaction::new(
            "Aldi",
            "Aldi payment",
            -30.0,
            TransactionCategory::Groceries,
            "2024-01-20",
        ),
    );
    txns
}

#[test]
fn budget_and_summary_agree_on_january_spend() {
    let txns = january_groceries();
    let mut budgets = vec![CategoryBudget::new(BudgetCategory::Groceries, 100.0)];
    BudgetService::recompute_spent(&mut budgets, &txns);
    assert_eq!(budgets[0].spent, 80.0);

    let reference = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let summary = SummaryService::calculate(&txns, reference);
    assert_eq!(summary.expenses, "80.00");
}

#[test]
fn recompute_is_idempotent() {
    let txns = january_groceries();
    let mut budgets = vec![
        CategoryBudget::new(BudgetCategory::Groceries, 100.0),
        CategoryBudget::new(BudgetCategory::Travel, 500.0),
    ];
    BudgetService::recompute_spent(&mut budgets, &txns);
    let first = budgets.clone();
    BudgetService::recompute_spent(&mut budgets, &txns);
    assert_eq!(first, budgets);
}

#[test]
fn removing_an_expense_reduces_spent_by_its_amount() {
    let mut txns = january_groceries();
    let mut budgets = vec![CategoryBudget::new(BudgetCategory::Groceries, 100.0)];
    BudgetService::recompute_spent(&mut budgets, &txns);
    let before = budgets[0].spent;

    let id = txns[0].id.clone();
    let removed = TransactionService::remove(&mut txns, &id).unwrap();
    BudgetService::recompute_spent(&mut budgets, &txns);
    assert_eq!(before - budgets[0].spent, removed.amount.abs());
}

#[test]
fn forecast_uses_budgeted_history() {
    let txns = january_groceries();
    let mut rng = FixedSequence::midpoint();
    assert_eq!(
        ForecastService::predict_next_month_expense(&txns, &mut rng),
        80.0
    );
}
