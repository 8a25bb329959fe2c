use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification attached to every ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionCategory {
    Groceries,
    Restaurants,
    Transportation,
    Utilities,
    Entertainment,
    Shopping,
    Travel,
    Health,
    Income,
}

impl TransactionCategory {
    pub const ALL: [TransactionCategory; 9] = [
        TransactionCategory::Groceries,
        TransactionCategory::Restaurants,
        TransactionCategory::Transportation,
        TransactionCategory::Utilities,
        TransactionCategory::Entertainment,
        TransactionCategory::Shopping,
        TransactionCategory::Travel,
        TransactionCategory::Health,
        TransactionCategory::Income,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Groceries => "groceries",
            TransactionCategory::Restaurants => "restaurants",
            TransactionCategory::Transportation => "transportation",
            TransactionCategory::Utilities => "utilities",
            TransactionCategory::Entertainment => "entertainment",
            TransactionCategory::Shopping => "shopping",
            TransactionCategory::Travel => "travel",
            TransactionCategory::Health => "health",
            TransactionCategory::Income => "income",
        }
    }

    /// Returns the budget category this entry counts against, if any.
    pub fn budget_category(&self) -> Option<BudgetCategory> {
        match self {
            TransactionCategory::Groceries => Some(BudgetCategory::Groceries),
            TransactionCategory::Restaurants => Some(BudgetCategory::Restaurants),
            TransactionCategory::Transportation => Some(BudgetCategory::Transportation),
            TransactionCategory::Utilities => Some(BudgetCategory::Utilities),
            TransactionCategory::Entertainment => Some(BudgetCategory::Entertainment),
            TransactionCategory::Shopping => Some(BudgetCategory::Shopping),
            TransactionCategory::Travel => Some(BudgetCategory::Travel),
            TransactionCategory::Health => Some(BudgetCategory::Health),
            TransactionCategory::Income => None,
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, TransactionCategory::Income)
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spending classification eligible for a budget cap. Never includes income.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Groceries,
    Restaurants,
    Transportation,
    Utilities,
    Entertainment,
    Shopping,
    Travel,
    Health,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 8] = [
        BudgetCategory::Groceries,
        BudgetCategory::Restaurants,
        BudgetCategory::Transportation,
        BudgetCategory::Utilities,
        BudgetCategory::Entertainment,
        BudgetCategory::Shopping,
        BudgetCategory::Travel,
        BudgetCategory::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        TransactionCategory::from(*self).as_str()
    }
}

impl From<BudgetCategory> for TransactionCategory {
    fn from(category: BudgetCategory) -> Self {
        match category {
            BudgetCategory::Groceries => TransactionCategory::Groceries,
            BudgetCategory::Restaurants => TransactionCategory::Restaurants,
            BudgetCategory::Transportation => TransactionCategory::Transportation,
            BudgetCategory::Utilities => TransactionCategory::Utilities,
            BudgetCategory::Entertainment => TransactionCategory::Entertainment,
            BudgetCategory::Shopping => TransactionCategory::Shopping,
            BudgetCategory::Travel => TransactionCategory::Travel,
            BudgetCategory::Health => TransactionCategory::Health,
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
