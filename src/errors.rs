use thiserror::Error;

use crate::ledger::BudgetCategory;

/// Error type raised by key-value persistence backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Typed outcomes for ledger operations that callers may want to match on.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Budget not found: {0}")]
    BudgetNotFound(BudgetCategory),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Invalid(String),
}
