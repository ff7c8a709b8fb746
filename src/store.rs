// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::Snapshot;
use crate::models::{Category, Transaction, TxKind, default_categories};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("Category name must not be empty")]
    EmptyCategoryName,
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("Category '{0}' not found")]
    UnknownCategory(String),
    #[error("No transaction at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// In-memory ledger owned by the session. Nothing here outlives the process.
#[derive(Debug, Clone)]
pub struct Store {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

impl Default for Store {
    fn default() -> Self {
        Store {
            transactions: Vec::new(),
            categories: default_categories(),
        }
    }
}

impl Store {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.transactions, &self.categories)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn add_transaction(&mut self, tx: Transaction) -> Result<usize, StoreError> {
        validate(&tx)?;
        tracing::info!(
            title = %tx.title,
            amount = %tx.amount,
            kind = %tx.kind,
            category = %tx.category,
            "transaction added"
        );
        self.transactions.push(tx);
        Ok(self.transactions.len() - 1)
    }

    /// Replaces the transaction at `index` wholesale.
    pub fn update_transaction(&mut self, index: usize, tx: Transaction) -> Result<(), StoreError> {
        validate(&tx)?;
        let len = self.transactions.len();
        let slot = self
            .transactions
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        *slot = tx;
        tracing::info!(index, "transaction updated");
        Ok(())
    }

    pub fn remove_transaction(&mut self, index: usize) -> Result<Transaction, StoreError> {
        let len = self.transactions.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        let removed = self.transactions.remove(index);
        tracing::info!(index, title = %removed.title, "transaction removed");
        Ok(removed)
    }

    pub fn transaction(&self, index: usize) -> Result<&Transaction, StoreError> {
        self.transactions
            .get(index)
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: self.transactions.len(),
            })
    }

    pub fn add_category(
        &mut self,
        name: &str,
        color: &str,
        kind: Option<TxKind>,
    ) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyCategoryName);
        }
        if self.categories.iter().any(|c| c.name == name) {
            return Err(StoreError::DuplicateCategory(name.to_string()));
        }
        self.categories.push(Category {
            name: name.to_string(),
            color: color.trim().to_string(),
            kind,
        });
        tracing::info!(name, "category added");
        Ok(())
    }

    /// Drops the category only; transactions keep referencing the old name.
    pub fn remove_category(&mut self, name: &str) -> Result<Category, StoreError> {
        let pos = self
            .categories
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| StoreError::UnknownCategory(name.to_string()))?;
        let removed = self.categories.remove(pos);
        tracing::info!(name, "category removed");
        Ok(removed)
    }
}

fn validate(tx: &Transaction) -> Result<(), StoreError> {
    if tx.title.trim().is_empty() {
        return Err(StoreError::EmptyTitle);
    }
    if tx.amount.is_sign_negative() && !tx.amount.is_zero() {
        return Err(StoreError::NegativeAmount(tx.amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{dec, tx};
    use crate::engine::{PeriodFilter, compute_summary, totals_by_category};

    #[test]
    fn rejects_invalid_transactions() {
        let mut store = Store::default();
        let blank = tx("  ", "5", TxKind::Expense, "Food", "2025-03-01T10:00:00");
        assert_eq!(store.add_transaction(blank), Err(StoreError::EmptyTitle));
        let negative = tx("Oops", "-5", TxKind::Expense, "Food", "2025-03-01T10:00:00");
        assert_eq!(
            store.add_transaction(negative),
            Err(StoreError::NegativeAmount(dec("-5")))
        );
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn edit_and_remove_by_index() {
        let mut store = Store::default();
        store
            .add_transaction(tx("Lunch", "12", TxKind::Expense, "Food", "2025-03-01T12:00:00"))
            .unwrap();
        store
            .update_transaction(
                0,
                tx("Brunch", "18", TxKind::Expense, "Food", "2025-03-01T11:00:00"),
            )
            .unwrap();
        assert_eq!(store.transaction(0).unwrap().title, "Brunch");
        assert_eq!(
            store.update_transaction(3, tx("X", "1", TxKind::Income, "Other", "2025-03-01T11:00:00")),
            Err(StoreError::IndexOutOfRange { index: 3, len: 1 })
        );
        let removed = store.remove_transaction(0).unwrap();
        assert_eq!(removed.amount, dec("18"));
        assert!(store.remove_transaction(0).is_err());
    }

    #[test]
    fn category_names_are_unique() {
        let mut store = Store::default();
        store.add_category("Rent", "#9248a5", Some(TxKind::Expense)).unwrap();
        assert_eq!(
            store.add_category(" Rent ", "#000000", None),
            Err(StoreError::DuplicateCategory("Rent".into()))
        );
        assert_eq!(
            store.add_category("   ", "#000000", None),
            Err(StoreError::EmptyCategoryName)
        );
        assert_eq!(store.categories().len(), 5);
    }

    #[test]
    fn removing_category_does_not_touch_transactions() {
        let mut store = Store::default();
        store
            .add_transaction(tx("Bus", "3", TxKind::Expense, "Transport", "2025-03-01T08:00:00"))
            .unwrap();
        store.remove_category("Transport").unwrap();
        assert_eq!(store.transactions()[0].category, "Transport");

        let filter = PeriodFilter::Year { year: 2025 };
        let snapshot = store.snapshot();
        let buckets = totals_by_category(&snapshot, TxKind::Expense, &filter);
        assert!(buckets.iter().all(|b| b.label != "Transport"));
        assert_eq!(
            compute_summary(snapshot.period_transactions(&filter)).total_expense,
            dec("3")
        );
        assert_eq!(
            store.remove_category("Transport"),
            Err(StoreError::UnknownCategory("Transport".into()))
        );
    }
}
