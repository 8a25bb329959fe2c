use serde::{Deserialize, Serialize};

/// Calendar month abbreviations used for series labels.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Suffix appended to labels of forecast points.
pub const PREDICTED_SUFFIX: &str = " (Pred)";

/// One point of a monthly spending series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySpending {
    pub month: String,
    pub amount: f64,
}

impl MonthlySpending {
    pub fn new(month: impl Into<String>, amount: f64) -> Self {
        Self {
            month: month.into(),
            amount,
        }
    }

    pub fn is_predicted(&self) -> bool {
        self.month.ends_with(PREDICTED_SUFFIX)
    }

    /// Index into [`MONTH_NAMES`] of the label, ignoring the predicted suffix.
    pub fn month_index(&self) -> Option<usize> {
        let name = self
            .month
            .strip_suffix(PREDICTED_SUFFIX)
            .unwrap_or(&self.month);
        MONTH_NAMES.iter().position(|candidate| *candidate == name)
    }
}

/// Month-to-date totals, each fixed to two decimal places.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub income: String,
    pub expenses: String,
    pub remaining: String,
    pub average_daily_spend: String,
}

impl MonthlySummary {
    pub fn zero() -> Self {
        Self::from_values(0.0, 0.0, 0.0, 0.0)
    }

    pub fn from_values(income: f64, expenses: f64, remaining: f64, average_daily_spend: f64) -> Self {
        Self {
            income: format_amount(income),
            expenses: format_amount(expenses),
            remaining: format_amount(remaining),
            average_daily_spend: format_amount(average_daily_spend),
        }
    }

    /// Rounded percentage of income already spent, 0 when there is no income.
    pub fn spent_ratio_percent(&self) -> i64 {
        let income = parse_amount(&self.income);
        let expenses = parse_amount(&self.expenses);
        if income <= 0.0 {
            return 0;
        }
        ((expenses / income) * 100.0).round() as i64
    }
}

/// Formats an amount with exactly two decimal places. Values that round to
/// zero print as `0.00`, never `-0.00`.
pub fn format_amount(value: f64) -> String {
    let value = if value.abs() < 0.005 { 0.0 } else { value };
    format!("{value:.2}")
}

fn parse_amount(value: &str) -> f64 {
    value.parse().unwrap_or(0.0)
}
