//! Budget upserts and reconciliation of spent amounts against transactions.

use std::collections::HashMap;

use crate::core::services::{ServiceError, ServiceResult};
use crate::ledger::{BudgetCategory, BudgetStatus, CategoryBudget, Transaction};

/// Stateless budgeting utilities that operate over budget and transaction lists.
pub struct BudgetService;

impl BudgetService {
    /// Overwrites `budgeted` for an existing category or appends a new budget
    /// with nothing spent. Returns the index of the affected entry.
    pub fn upsert(budgets: &mut Vec<CategoryBudget>, category: BudgetCategory, budgeted: f64) -> usize {
        if let Some(index) = budgets.iter().position(|budget| budget.category == category) {
            budgets[index].budgeted = budgeted;
            index
        } else {
            budgets.push(CategoryBudget::new(category, budgeted));
            budgets.len() - 1
        }
    }

    pub fn remove(
        budgets: &mut Vec<CategoryBudget>,
        category: BudgetCategory,
    ) -> ServiceResult<CategoryBudget> {
        let index = budgets
            .iter()
            .position(|budget| budget.category == category)
            .ok_or(ServiceError::BudgetNotFound(category))?;
        Ok(budgets.remove(index))
    }

    pub fn find(budgets: &[CategoryBudget], category: BudgetCategory) -> Option<&CategoryBudget> {
        budgets.iter().find(|budget| budget.category == category)
    }

    /// Resets every `spent` to zero and re-accumulates it from expense entries.
    ///
    /// Income entries and expenses without a matching budget are ignored.
    pub fn recompute_spent(budgets: &mut [CategoryBudget], transactions: &[Transaction]) {
        let totals = Self::spent_by_category(transactions);
        for budget in budgets.iter_mut() {
            budget.spent = totals.get(&budget.category).copied().unwrap_or(0.0);
        }
    }

    /// Absolute expense totals keyed by budget category, across all history.
    pub fn spent_by_category(transactions: &[Transaction]) -> HashMap<BudgetCategory, f64> {
        let mut totals = HashMap::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            if let Some(category) = txn.category.budget_category() {
                *totals.entry(category).or_insert(0.0) += txn.amount.abs();
            }
        }
        totals
    }

    pub fn status(budget: &CategoryBudget) -> BudgetStatus {
        let percentage = if budget.budgeted > 0.0 {
            ((budget.spent / budget.budgeted) * 100.0).round() as i64
        } else {
            0
        };
        BudgetStatus {
            category: budget.category,
            budgeted: budget.budgeted,
            spent: budget.spent,
            percentage,
            over_budget: budget.is_over_budget(),
            remaining: budget.remaining(),
        }
    }

    pub fn statuses(budgets: &[CategoryBudget]) -> Vec<BudgetStatus> {
        budgets.iter().map(Self::status).collect()
    }

    /// Categories that do not have a budget yet, in declaration order.
    pub fn unbudgeted(budgets: &[CategoryBudget]) -> Vec<BudgetCategory> {
        BudgetCategory::ALL
            .into_iter()
            .filter(|category| Self::find(budgets, *category).is_none())
            .collect()
    }
}
