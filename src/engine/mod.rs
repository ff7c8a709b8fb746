// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a read-only view of the ledger.
//!
//! Nothing in here mutates or performs I/O; callers hand in a [`Snapshot`]
//! and get plain values back.

pub mod alerts;
pub mod buckets;
pub mod period;
pub mod summary;

pub use alerts::{AlertOutcome, AlertRule, AlertRuleKind, AlertSettings};
pub use buckets::{
    CategorySeries, CategoryTotal, DailyTotals, SeriesDirection, category_daily_series,
    daily_totals, totals_by_category,
};
pub use period::{PeriodFilter, in_period};
pub use summary::{Summary, compute_balance, compute_summary};

use crate::models::{Category, Transaction};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("not enough data to build a chart")]
    InsufficientData,
}

/// Sum that pins at `Decimal::MAX` instead of overflowing.
pub(crate) fn saturating_total<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Borrowed, immutable view of the store handed to the engine.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub transactions: &'a [Transaction],
    pub categories: &'a [Category],
}

impl<'a> Snapshot<'a> {
    pub fn new(transactions: &'a [Transaction], categories: &'a [Category]) -> Self {
        Snapshot {
            transactions,
            categories,
        }
    }

    pub fn period_transactions(&self, filter: &PeriodFilter) -> Vec<&'a Transaction> {
        self.transactions
            .iter()
            .filter(|t| in_period(&t.date, filter))
            .collect()
    }
}
