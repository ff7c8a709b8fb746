// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxKind};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

impl Summary {
    pub fn net(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expense)
    }
}

/// Income minus expense across every transaction passed in.
pub fn compute_balance<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.signed_amount()))
}

/// Income and expense totals for the given subset. Callers pre-filter by period.
pub fn compute_summary<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut summary = Summary::default();
    for t in transactions {
        match t.kind {
            TxKind::Income => {
                summary.total_income = summary.total_income.saturating_add(t.amount)
            }
            TxKind::Expense => {
                summary.total_expense = summary.total_expense.saturating_add(t.amount)
            }
        }
    }
    summary
}
