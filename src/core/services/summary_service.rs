use chrono::{Datelike, NaiveDate, Utc};

use crate::core::services::TransactionService;
use crate::ledger::{MonthlySummary, Transaction};

pub struct SummaryService;

impl SummaryService {
    /// Summarizes the current UTC month.
    pub fn current(transactions: &[Transaction]) -> MonthlySummary {
        Self::calculate(transactions, Utc::now().date_naive())
    }

    /// Month-to-date income, expenses, balance, and average daily spend for the
    /// month containing `reference`.
    ///
    /// Entries are selected by `YYYY-MM` prefix of their stored date, so
    /// malformed dates silently fall out of every month.
    pub fn calculate(transactions: &[Transaction], reference: NaiveDate) -> MonthlySummary {
        let key = month_key(reference);
        let in_month = TransactionService::in_month(transactions, &key);
        if in_month.is_empty() {
            return MonthlySummary::zero();
        }

        let income: f64 = in_month
            .iter()
            .filter(|txn| txn.is_income())
            .fold(0.0, |acc, txn| acc + txn.amount);
        let expenses: f64 = in_month
            .iter()
            .filter(|txn| txn.is_expense())
            .fold(0.0, |acc, txn| acc + txn.amount.abs());
        let remaining = income - expenses;
        let days = days_in_month(reference);
        let average_daily_spend = if days == 0 {
            0.0
        } else {
            expenses / f64::from(days)
        };

        MonthlySummary::from_values(income, expenses, remaining, average_daily_spend)
    }
}

/// The `YYYY-MM` key of the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Number of calendar days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}
