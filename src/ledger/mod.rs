//! Ledger domain models and persistence-friendly types.

pub mod budget;
pub mod category;
pub mod spending;
pub mod transaction;

pub use budget::{BudgetStatus, CategoryBudget};
pub use category::{BudgetCategory, TransactionCategory};
pub use spending::{MonthlySpending, MonthlySummary, MONTH_NAMES, PREDICTED_SUFFIX};
pub use transaction::{generate_id, Transaction, TransactionPatch};
