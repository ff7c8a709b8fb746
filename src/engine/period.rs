// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Scoping window applied to transaction dates. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "lowercase")]
pub enum PeriodFilter {
    Month { year: i32, month: u32 },
    Year { year: i32 },
    All,
}

impl PeriodFilter {
    pub fn current_month(now: NaiveDateTime) -> Self {
        PeriodFilter::Month {
            year: now.year(),
            month: now.month(),
        }
    }

    pub fn current_year(now: NaiveDateTime) -> Self {
        PeriodFilter::Year { year: now.year() }
    }

    /// Month window, rejecting month numbers outside 1..=12.
    pub fn month(year: i32, month: u32) -> anyhow::Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow::anyhow!("Invalid month {}-{:02}", year, month))?;
        Ok(PeriodFilter::Month { year, month })
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodFilter::Month { year, month } => {
                let name = MONTH_NAMES
                    .get((*month as usize).wrapping_sub(1))
                    .copied()
                    .unwrap_or("?");
                write!(f, "{} {}", name, year)
            }
            PeriodFilter::Year { year } => write!(f, "{}", year),
            PeriodFilter::All => f.write_str("All time"),
        }
    }
}

/// Calendar-field comparison; no timezone conversion happens here.
pub fn in_period(date: &NaiveDateTime, filter: &PeriodFilter) -> bool {
    match filter {
        PeriodFilter::Month { year, month } => date.year() == *year && date.month() == *month,
        PeriodFilter::Year { year } => date.year() == *year,
        PeriodFilter::All => true,
    }
}
