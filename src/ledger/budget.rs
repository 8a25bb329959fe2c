use serde::{Deserialize, Serialize};

use super::category::BudgetCategory;

/// A spending target for one budget category. `spent` is always derived from
/// the transaction history and never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudget {
    pub category: BudgetCategory,
    pub budgeted: f64,
    #[serde(default)]
    pub spent: f64,
}

impl CategoryBudget {
    pub fn new(category: BudgetCategory, budgeted: f64) -> Self {
        Self {
            category,
            budgeted,
            spent: 0.0,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.budgeted - self.spent
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budgeted
    }
}

/// Presentation-ready view of how far a budget has been consumed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub category: BudgetCategory,
    pub budgeted: f64,
    pub spent: f64,
    /// Rounded share of the budget consumed; may exceed 100.
    pub percentage: i64,
    pub over_budget: bool,
    pub remaining: f64,
}
