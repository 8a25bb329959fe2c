//! Business logic helpers for managing transactions.

use crate::core::services::{ServiceError, ServiceResult};
use crate::ledger::{Transaction, TransactionCategory, TransactionPatch};

/// Narrowing criteria for transaction lists.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category: Option<TransactionCategory>,
    /// Case-insensitive term matched against merchant and description.
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn category(category: TransactionCategory) -> Self {
        Self {
            category: Some(category),
            search: None,
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            category: None,
            search: Some(term.into()),
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(category) = self.category {
            if txn.category != category {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                txn.merchant.to_lowercase().contains(&needle)
                    || txn.description.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Collection helpers over newest-first transaction lists.
pub struct TransactionService;

impl TransactionService {
    /// Inserts at the head so the list stays newest-first.
    pub fn add(transactions: &mut Vec<Transaction>, transaction: Transaction) -> &Transaction {
        transactions.insert(0, transaction);
        &transactions[0]
    }

    /// Merges `patch` into the transaction identified by `id`.
    pub fn update(
        transactions: &mut [Transaction],
        id: &str,
        patch: TransactionPatch,
    ) -> ServiceResult<Transaction> {
        let txn = transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or_else(|| ServiceError::TransactionNotFound(id.to_string()))?;
        txn.apply(patch);
        Ok(txn.clone())
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(transactions: &mut Vec<Transaction>, id: &str) -> ServiceResult<Transaction> {
        let index = transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or_else(|| ServiceError::TransactionNotFound(id.to_string()))?;
        Ok(transactions.remove(index))
    }

    pub fn find<'a>(transactions: &'a [Transaction], id: &str) -> Option<&'a Transaction> {
        transactions.iter().find(|txn| txn.id == id)
    }

    /// Returns the entries matching `filter`, preserving order.
    pub fn filter<'a>(
        transactions: &'a [Transaction],
        filter: &TransactionFilter,
    ) -> Vec<&'a Transaction> {
        transactions.iter().filter(|txn| filter.matches(txn)).collect()
    }

    /// Entries whose date starts with the `YYYY-MM` key.
    pub fn in_month<'a>(transactions: &'a [Transaction], month_key: &str) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|txn| txn.in_month(month_key))
            .collect()
    }
}
