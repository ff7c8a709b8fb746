// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid type '{}', expected income|expense",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub title: String,
    pub amount: Decimal, // magnitude, direction lives in `kind`
    pub kind: TxKind,
    pub category: String,
    pub date: NaiveDateTime,
}

impl Transaction {
    /// Amount with the sign implied by `kind`.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TxKind::Income => self.amount,
            TxKind::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
    pub kind: Option<TxKind>, // advisory only
}

impl Category {
    pub fn new(name: &str, color: &str) -> Self {
        Category {
            name: name.to_string(),
            color: color.to_string(),
            kind: None,
        }
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Food", "#EF4444"),
        Category::new("Transport", "#60A5FA"),
        Category::new("Salary", "#34D399"),
        Category::new("Other", "#A78BFA"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Dating,
}

impl FromStr for MaritalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(MaritalStatus::Single),
            "married" => Ok(MaritalStatus::Married),
            "dating" => Ok(MaritalStatus::Dating),
            other => Err(anyhow::anyhow!(
                "Invalid status '{}', expected single|married|dating",
                other
            )),
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Dating => "dating",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub name: String,
    pub age: u32,
    pub status: MaritalStatus,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            user_id: "user_000".to_string(),
            name: "Demo User".to_string(),
            age: 30,
            status: MaritalStatus::Single,
        }
    }
}
