//! Spending forecasts from historical monthly totals.
//!
//! Point forecasts fit an ordinary least-squares line through the monthly
//! expense totals and add a bounded random offset. Series forecasts compound
//! the recent average growth rate. All randomness is drawn from the supplied
//! [`RandomSource`], so a fixed sequence makes every output reproducible.

use std::collections::BTreeMap;

use crate::core::random::RandomSource;
use crate::ledger::{
    MonthlySpending, Transaction, TransactionCategory, MONTH_NAMES, PREDICTED_SUFFIX,
};

/// Forecast returned when there is no expense history at all.
pub const FALLBACK_FORECAST: f64 = 2500.0;
/// Maximum relative offset applied to point forecasts.
pub const POINT_NOISE: f64 = 0.08;
/// Maximum absolute jitter added to the series growth rate.
pub const GROWTH_JITTER: f64 = 0.05;
/// Number of trailing points considered by series forecasts.
pub const HISTORY_WINDOW: usize = 6;
/// Number of points produced by series forecasts.
pub const FORECAST_HORIZON: usize = 3;

pub struct ForecastService;

impl ForecastService {
    /// Forecasts next month's total expenses.
    ///
    /// No history yields [`FALLBACK_FORECAST`], a single month is returned as
    /// is, and longer histories are extrapolated one step along their linear
    /// trend with up to ±8% noise. The result is never negative.
    pub fn predict_next_month_expense(
        transactions: &[Transaction],
        rng: &mut dyn RandomSource,
    ) -> f64 {
        let totals = Self::monthly_expense_totals(transactions);
        match totals.len() {
            0 => FALLBACK_FORECAST,
            1 => totals[0].1,
            _ => {
                let values: Vec<f64> = totals.iter().map(|(_, total)| *total).collect();
                let prediction = trend_prediction(&values);
                let variance = prediction * POINT_NOISE;
                let offset = (rng.next() * 2.0 - 1.0) * variance;
                (prediction + offset).max(0.0)
            }
        }
    }

    /// The noiseless estimate behind [`Self::predict_next_month_expense`].
    pub fn baseline_next_month_expense(transactions: &[Transaction]) -> f64 {
        let totals = Self::monthly_expense_totals(transactions);
        match totals.len() {
            0 => FALLBACK_FORECAST,
            1 => totals[0].1,
            _ => {
                let values: Vec<f64> = totals.iter().map(|(_, total)| *total).collect();
                trend_prediction(&values).max(0.0)
            }
        }
    }

    /// Runs the point forecast independently for each category that has at
    /// least one expense. Categories without expenses are absent.
    pub fn predict_category_expenses(
        transactions: &[Transaction],
        rng: &mut dyn RandomSource,
    ) -> BTreeMap<TransactionCategory, f64> {
        let mut by_category: BTreeMap<TransactionCategory, Vec<Transaction>> = BTreeMap::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            by_category
                .entry(txn.category)
                .or_default()
                .push(txn.clone());
        }
        by_category
            .into_iter()
            .map(|(category, txns)| {
                let forecast = Self::predict_next_month_expense(&txns, rng);
                (category, forecast)
            })
            .collect()
    }

    /// Projects the next three points of a monthly series.
    ///
    /// Uses the average period-over-period growth of the trailing six points,
    /// shifted by up to ±5 percentage points, compounded from the last amount.
    /// Labels continue the calendar from the last label and carry the
    /// predicted suffix. An empty series yields no points.
    pub fn generate_predicted_spending(
        series: &[MonthlySpending],
        rng: &mut dyn RandomSource,
    ) -> Vec<MonthlySpending> {
        let recent = trailing(series, HISTORY_WINDOW);
        let Some(last) = recent.last() else {
            return Vec::new();
        };

        let growth_rate = average_growth_rate(recent) + (rng.next() * 0.1 - GROWTH_JITTER);
        let start = last.month_index().map(|index| index + 1).unwrap_or(0);

        (1..=FORECAST_HORIZON)
            .map(|step| {
                let label = MONTH_NAMES[(start + step - 1) % MONTH_NAMES.len()];
                let amount = last.amount * (1.0 + growth_rate).powi(step as i32);
                MonthlySpending::new(format!("{label}{PREDICTED_SUFFIX}"), round_cents(amount))
            })
            .collect()
    }

    /// Trailing history followed by its forecast, ready for charting.
    pub fn chart_series(
        series: &[MonthlySpending],
        rng: &mut dyn RandomSource,
    ) -> Vec<MonthlySpending> {
        let mut points = trailing(series, HISTORY_WINDOW).to_vec();
        points.extend(Self::generate_predicted_spending(series, rng));
        points
    }

    /// Absolute expense totals per month key, ascending by key.
    pub fn monthly_expense_totals(transactions: &[Transaction]) -> Vec<(String, f64)> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            *totals.entry(txn.month_key().to_string()).or_insert(0.0) += txn.amount.abs();
        }
        totals.into_iter().collect()
    }

    /// Monthly expense history labelled with month names, oldest first.
    /// Months whose key is not `YYYY-MM` are skipped.
    pub fn monthly_spending(transactions: &[Transaction]) -> Vec<MonthlySpending> {
        Self::monthly_expense_totals(transactions)
            .into_iter()
            .filter_map(|(key, total)| {
                let month = month_number(&key)?;
                Some(MonthlySpending::new(
                    MONTH_NAMES[month - 1],
                    round_cents(total),
                ))
            })
            .collect()
    }
}

/// Least-squares fit over `(1..=n, values)`, evaluated at `n + 1`.
fn trend_prediction(values: &[f64]) -> f64 {
    let (slope, intercept) = linear_regression(values);
    slope * (values.len() as f64 + 1.0) + intercept
}

/// Slope and intercept of `y = m·x + b` with `x` the 1-based index.
/// Callers must pass at least two values.
pub fn linear_regression(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (index, y) in values.iter().enumerate() {
        let x = (index + 1) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return (0.0, if n > 0.0 { sum_y / n } else { 0.0 });
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    (slope, intercept)
}

/// Mean of `(curr - prev) / prev` over consecutive points. Pairs with a zero
/// previous amount are skipped; fewer than two points give zero growth.
fn average_growth_rate(points: &[MonthlySpending]) -> f64 {
    let rates: Vec<f64> = points
        .windows(2)
        .filter(|pair| pair[0].amount != 0.0)
        .map(|pair| (pair[1].amount - pair[0].amount) / pair[0].amount)
        .collect();
    if rates.is_empty() {
        0.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    }
}

fn trailing<T>(items: &[T], count: usize) -> &[T] {
    &items[items.len().saturating_sub(count)..]
}

fn month_number(key: &str) -> Option<usize> {
    let (year, month) = key.split_once('-')?;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let month: usize = month.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
