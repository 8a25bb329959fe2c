//! Domain model for ledger entries and partial updates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::TransactionCategory;

/// Length of the `YYYY-MM` prefix used to bucket entries by month.
pub const MONTH_KEY_LEN: usize = 7;

/// A single income or expense entry. Positive amounts are income, negative are expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    /// ISO `YYYY-MM-DD`, kept as text so month matching stays a plain prefix test.
    pub date: String,
    pub amount: f64,
    pub merchant: String,
    pub category: TransactionCategory,
    pub description: String,
}

impl Transaction {
    pub fn new(
        merchant: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: TransactionCategory,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            date: date.into(),
            amount,
            merchant: merchant.into(),
            category,
            description: description.into(),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// The `YYYY-MM` bucket of this entry. Dates shorter than a month key are
    /// their own bucket.
    pub fn month_key(&self) -> &str {
        self.date.get(..MONTH_KEY_LEN).unwrap_or(&self.date)
    }

    /// Lenient check mirroring `date.startsWith(month_key)`.
    pub fn in_month(&self, month_key: &str) -> bool {
        self.date.starts_with(month_key)
    }

    /// Overlays the populated fields of `patch`. The id never changes.
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(merchant) = patch.merchant {
            self.merchant = merchant;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Partial field set for [`Transaction`] updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TransactionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn category(mut self, category: TransactionCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Produces a fresh opaque identifier for a new entry.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}
