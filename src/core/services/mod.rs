pub mod budget_service;
pub mod forecast_service;
pub mod summary_service;
pub mod transaction_service;

pub use budget_service::BudgetService;
pub use forecast_service::ForecastService;
pub use summary_service::SummaryService;
pub use transaction_service::{TransactionFilter, TransactionService};

pub use crate::errors::{ServiceError, ServiceResult};

#[cfg(test)]
mod tests;
