// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Threshold alerts over a period-scoped snapshot.
//!
//! Every rule reduces to "compute a percentage, compare it to the threshold".
//! A non-positive denominator yields no percentage and never fires. A ratio
//! too large for `Decimal` is reported as `Decimal::MAX`. Rules do
//! not remember whether they already fired; the caller decides when to ask.

use super::{PeriodFilter, Snapshot, compute_summary, saturating_total};
use crate::models::{Transaction, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertRuleKind {
    /// Period expense as a share of period income.
    A,
    /// One day's expense as a share of period income.
    B,
    /// Largest single category as a share of period expense.
    C,
}

impl fmt::Display for AlertRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertRuleKind::A => "A",
            AlertRuleKind::B => "B",
            AlertRuleKind::C => "C",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for AlertRuleKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(AlertRuleKind::A),
            "b" => Ok(AlertRuleKind::B),
            "c" => Ok(AlertRuleKind::C),
            other => Err(anyhow::anyhow!("Unknown alert rule '{}', expected a|b|c", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRule {
    pub enabled: bool,
    pub percentage: Decimal,
}

impl Default for AlertRule {
    fn default() -> Self {
        AlertRule {
            enabled: false,
            percentage: Decimal::from(50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertOutcome {
    pub rule: AlertRuleKind,
    /// `None` when the denominator was zero or negative.
    pub percentage: Option<Decimal>,
    pub fired: bool,
    /// Category name for rule C.
    pub subject: Option<String>,
}

impl AlertOutcome {
    fn from_ratio(
        rule: AlertRuleKind,
        numerator: Decimal,
        denominator: Decimal,
        threshold: Decimal,
    ) -> Self {
        let percentage = percent_of(numerator, denominator);
        AlertOutcome {
            rule,
            percentage,
            fired: percentage.is_some_and(|p| p >= threshold),
            subject: None,
        }
    }
}

fn percent_of(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator <= Decimal::ZERO {
        return None;
    }
    let percentage = numerator
        .checked_div(denominator)
        .unwrap_or(Decimal::MAX)
        .saturating_mul(HUNDRED);
    Some(percentage)
}

/// Rule A: period expense over period income.
pub fn spent_share_of_income<'a, I>(transactions: I, threshold: Decimal) -> AlertOutcome
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let summary = compute_summary(transactions);
    AlertOutcome::from_ratio(
        AlertRuleKind::A,
        summary.total_expense,
        summary.total_income,
        threshold,
    )
}

/// Rule B: expense recorded on `day` over the whole period's income.
pub fn daily_spent_share_of_income(
    transactions: &[&Transaction],
    day: NaiveDate,
    threshold: Decimal,
) -> AlertOutcome {
    let income = compute_summary(transactions.iter().copied()).total_income;
    let spent_on_day = saturating_total(
        transactions
            .iter()
            .filter(|t| t.kind == TxKind::Expense && t.date.date() == day)
            .map(|t| t.amount),
    );
    AlertOutcome::from_ratio(AlertRuleKind::B, spent_on_day, income, threshold)
}

/// Rule C: the heaviest expense category over total period expense.
pub fn top_category_share_of_expense(
    transactions: &[&Transaction],
    threshold: Decimal,
) -> AlertOutcome {
    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.kind == TxKind::Expense) {
        let entry = by_category.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(t.amount);
    }
    let total = saturating_total(by_category.values().copied());

    // BTreeMap iterates by name, so the first maximum wins ties alphabetically.
    let mut top: Option<(&str, Decimal)> = None;
    for (name, amount) in &by_category {
        if top.is_none_or(|(_, best)| *amount > best) {
            top = Some((*name, *amount));
        }
    }

    let (name, amount) = match top {
        Some((name, amount)) => (Some(name.to_string()), amount),
        None => (None, Decimal::ZERO),
    };
    let mut outcome = AlertOutcome::from_ratio(AlertRuleKind::C, amount, total, threshold);
    outcome.subject = name;
    outcome
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub a: AlertRule,
    pub b: AlertRule,
    pub c: AlertRule,
}

impl AlertSettings {
    pub fn rule(&self, kind: AlertRuleKind) -> &AlertRule {
        match kind {
            AlertRuleKind::A => &self.a,
            AlertRuleKind::B => &self.b,
            AlertRuleKind::C => &self.c,
        }
    }

    pub fn rule_mut(&mut self, kind: AlertRuleKind) -> &mut AlertRule {
        match kind {
            AlertRuleKind::A => &mut self.a,
            AlertRuleKind::B => &mut self.b,
            AlertRuleKind::C => &mut self.c,
        }
    }

    /// Evaluates every enabled rule against the transactions inside `filter`.
    pub fn evaluate_all(
        &self,
        snapshot: &Snapshot<'_>,
        filter: &PeriodFilter,
        day: NaiveDate,
    ) -> Vec<AlertOutcome> {
        let scoped = snapshot.period_transactions(filter);
        let mut out = Vec::new();
        if self.a.enabled {
            out.push(spent_share_of_income(
                scoped.iter().copied(),
                self.a.percentage,
            ));
        }
        if self.b.enabled {
            out.push(daily_spent_share_of_income(&scoped, day, self.b.percentage));
        }
        if self.c.enabled {
            out.push(top_category_share_of_expense(&scoped, self.c.percentage));
        }
        tracing::debug!(
            period = %filter,
            evaluated = out.len(),
            fired = out.iter().filter(|o| o.fired).count(),
            "evaluated alert rules"
        );
        out
    }
}
