//! Generated first-run data served until the user records their own.

use chrono::{Duration, NaiveDate};

use crate::core::random::RandomSource;
use crate::core::services::BudgetService;
use crate::ledger::{BudgetCategory, CategoryBudget, Transaction, TransactionCategory};
use crate::storage::DefaultDataset;

const HISTORY_DAYS: f64 = 90.0;
const SALARY_DEPOSITS: i64 = 3;

fn merchants(category: TransactionCategory) -> &'static [&'static str] {
    match category {
        TransactionCategory::Groceries => &["Whole Foods", "Trader Joe's", "Safeway", "Kroger", "Aldi"],
        TransactionCategory::Restaurants => &["Chipotle", "Starbucks", "McDonald's", "Local Bistro", "Pizza Palace"],
        TransactionCategory::Transportation => &["Uber", "Lyft", "Gas Station", "Transit Authority", "Car Repair"],
        TransactionCategory::Utilities => &["Electric Company", "Water Services", "Internet Provider", "Gas Company", "Phone Bill"],
        TransactionCategory::Entertainment => &["Netflix", "Movie Theater", "Concert Tickets", "Spotify", "Gaming Service"],
        TransactionCategory::Shopping => &["Amazon", "Target", "Walmart", "Best Buy", "Macy's"],
        TransactionCategory::Travel => &["Airlines", "Hotel Booking", "Airbnb", "Car Rental", "Travel Agency"],
        TransactionCategory::Health => &["Pharmacy", "Doctor's Office", "Gym Membership", "Health Insurance", "Dental Care"],
        TransactionCategory::Income => &["Employer", "Freelance", "Dividend", "Interest", "Side Business"],
    }
}

/// `count` random expenses from the last 90 days plus three monthly salary
/// deposits, newest first.
pub fn generate_transactions(
    rng: &mut dyn RandomSource,
    count: usize,
    today: NaiveDate,
) -> Vec<Transaction> {
    let mut transactions = Vec::with_capacity(count + SALARY_DEPOSITS as usize);

    for _ in 0..count {
        let category = BudgetCategory::ALL[rng.index(BudgetCategory::ALL.len())];
        let category = TransactionCategory::from(category);
        let pool = merchants(category);
        let merchant = pool[rng.index(pool.len())];
        let days_ago = (rng.next() * HISTORY_DAYS).floor() as i64;
        let date = today - Duration::days(days_ago);
        let amount = -random_amount(rng, 5.0, 200.0);
        transactions.push(Transaction::new(
            merchant,
            format!("{merchant} payment"),
            amount,
            category,
            date.format("%Y-%m-%d").to_string(),
        ));
    }

    let employer = merchants(TransactionCategory::Income)[0];
    for month in 0..SALARY_DEPOSITS {
        let date = today - Duration::days(month * 30);
        transactions.push(Transaction::new(
            employer,
            "Salary deposit",
            random_amount(rng, 2000.0, 4000.0),
            TransactionCategory::Income,
            date.format("%Y-%m-%d").to_string(),
        ));
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}

/// One budget per budget category with a target between 300 and 800.
pub fn generate_budgets(rng: &mut dyn RandomSource) -> Vec<CategoryBudget> {
    BudgetCategory::ALL
        .into_iter()
        .map(|category| CategoryBudget::new(category, random_amount(rng, 300.0, 800.0)))
        .collect()
}

/// Demo transactions and budgets with `spent` already reconciled.
pub fn default_dataset(
    rng: &mut dyn RandomSource,
    transaction_count: usize,
    today: NaiveDate,
) -> DefaultDataset {
    let transactions = generate_transactions(rng, transaction_count, today);
    let mut budgets = generate_budgets(rng);
    BudgetService::recompute_spent(&mut budgets, &transactions);
    DefaultDataset::new(transactions, budgets)
}

fn random_amount(rng: &mut dyn RandomSource, min: f64, max: f64) -> f64 {
    (rng.between(min, max) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SeededRandom;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn generated_history_is_newest_first_and_bounded() {
        let mut rng = SeededRandom::new(42);
        let txns = generate_transactions(&mut rng, 40, today());
        assert_eq!(txns.len(), 43);
        assert!(txns.windows(2).all(|pair| pair[0].date >= pair[1].date));

        let earliest = (today() - Duration::days(90)).format("%Y-%m-%d").to_string();
        for txn in &txns {
            assert!(txn.date.as_str() > earliest.as_str() && txn.date.as_str() <= "2024-06-15");
            if txn.category.is_income() {
                assert!((2000.0..=4000.0).contains(&txn.amount));
            } else {
                assert!((-200.0..=-5.0).contains(&txn.amount));
                assert!(merchants(txn.category).contains(&txn.merchant.as_str()));
            }
        }
        let salaries = txns.iter().filter(|txn| txn.category.is_income()).count();
        assert_eq!(salaries, 3);
    }

    #[test]
    fn dataset_budgets_cover_every_category_with_reconciled_spend() {
        let mut rng = SeededRandom::new(9);
        let dataset = default_dataset(&mut rng, 25, today());
        assert_eq!(dataset.budgets.len(), BudgetCategory::ALL.len());
        let totals = BudgetService::spent_by_category(&dataset.transactions);
        for budget in &dataset.budgets {
            assert!((300.0..=800.0).contains(&budget.budgeted));
            let expected = totals.get(&budget.category).copied().unwrap_or(0.0);
            assert_eq!(budget.spent, expected);
        }
    }
}
