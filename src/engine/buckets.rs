// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Grouping of transaction amounts into chart-ready series.

use super::{EngineError, PeriodFilter, Snapshot, in_period, saturating_total};
use crate::models::{Transaction, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotals {
    pub day: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Direction of a single-category series, derived from every transaction in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesDirection {
    Income,
    Expense,
    /// The category holds both incomes and expenses; amounts are still summed as magnitudes.
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySeries {
    pub name: String,
    /// `None` when no transaction references the category.
    pub direction: Option<SeriesDirection>,
    pub points: Vec<(NaiveDate, Decimal)>,
}

/// One total per category, in category-list order, for one direction and period.
pub fn totals_by_category(
    snapshot: &Snapshot<'_>,
    direction: TxKind,
    filter: &PeriodFilter,
) -> Vec<CategoryTotal> {
    let scoped: Vec<&Transaction> = snapshot
        .transactions
        .iter()
        .filter(|t| t.kind == direction && in_period(&t.date, filter))
        .collect();

    snapshot
        .categories
        .iter()
        .map(|cat| CategoryTotal {
            label: cat.name.clone(),
            total: saturating_total(
                scoped
                    .iter()
                    .filter(|t| t.category == cat.name)
                    .map(|t| t.amount),
            ),
            color: cat.color.clone(),
        })
        .collect()
}

/// Whole-history income/expense per calendar day, ascending, without gap filling.
pub fn daily_totals(transactions: &[Transaction]) -> Result<Vec<DailyTotals>, EngineError> {
    if transactions.is_empty() {
        return Err(EngineError::InsufficientData);
    }

    let mut by_day: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = by_day
            .entry(t.date.date())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            TxKind::Income => entry.0 = entry.0.saturating_add(t.amount),
            TxKind::Expense => entry.1 = entry.1.saturating_add(t.amount),
        }
    }

    Ok(by_day
        .into_iter()
        .map(|(day, (income, expense))| DailyTotals {
            day,
            income,
            expense,
        })
        .collect())
}

pub fn category_daily_series(transactions: &[Transaction], name: &str) -> CategorySeries {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    let mut saw_income = false;
    let mut saw_expense = false;

    for t in transactions.iter().filter(|t| t.category == name) {
        match t.kind {
            TxKind::Income => saw_income = true,
            TxKind::Expense => saw_expense = true,
        }
        let point = by_day.entry(t.date.date()).or_insert(Decimal::ZERO);
        *point = point.saturating_add(t.amount);
    }

    let direction = match (saw_income, saw_expense) {
        (true, true) => Some(SeriesDirection::Mixed),
        (true, false) => Some(SeriesDirection::Income),
        (false, true) => Some(SeriesDirection::Expense),
        (false, false) => None,
    };

    CategorySeries {
        name: name.to_string(),
        direction,
        points: by_day.into_iter().collect(),
    }
}
