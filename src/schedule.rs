// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Automatic export configuration and the "is an export due" decision.
//!
//! There is no timer: the check runs when a session starts, so an export
//! happens on the first session of a due day.

use crate::models::DATE_TIME_FORMAT;
use crate::utils::{get_setting, set_setting};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime, Weekday};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const CONFIG_KEY: &str = "automatic_export_config";
pub const LAST_EXPORT_KEY: &str = "last_export_timestamp";

pub const FIRST_AND_THIRD: &str = "first-and-third";
pub const SECOND_AND_FOURTH: &str = "second-and-fourth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(anyhow::anyhow!(
                "Invalid frequency '{}', expected daily|weekly|biweekly|monthly",
                other
            )),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub enabled: bool,
    pub frequency: Frequency,
    #[serde(rename = "subFrequency")]
    pub sub_frequency: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            enabled: false,
            frequency: Frequency::Daily,
            sub_frequency: None,
        }
    }
}

impl ExportConfig {
    /// Checks that `sub_frequency` makes sense for the chosen frequency.
    pub fn validate(&self) -> Result<()> {
        let sub = self.sub_frequency.as_deref().map(str::trim);
        match self.frequency {
            Frequency::Daily => Ok(()),
            Frequency::Weekly => {
                let day = sub.context("Weekly export needs a weekday (--on Monday)")?;
                day.parse::<Weekday>()
                    .map_err(|_| anyhow::anyhow!("Invalid weekday '{}'", day))?;
                Ok(())
            }
            Frequency::Biweekly => match sub {
                Some(FIRST_AND_THIRD) | Some(SECOND_AND_FOURTH) => Ok(()),
                other => Err(anyhow::anyhow!(
                    "Invalid biweekly option {:?}, expected {}|{}",
                    other.unwrap_or(""),
                    FIRST_AND_THIRD,
                    SECOND_AND_FOURTH
                )),
            },
            Frequency::Monthly => {
                let day = sub.context("Monthly export needs a day of month (--on 15)")?;
                let n: u32 = day
                    .parse()
                    .with_context(|| format!("Invalid day of month '{}'", day))?;
                if !(1..=31).contains(&n) {
                    anyhow::bail!("Invalid day of month {}, expected 1-31", n);
                }
                Ok(())
            }
        }
    }
}

pub fn is_export_due(
    config: &ExportConfig,
    now: NaiveDateTime,
    last_export: Option<NaiveDateTime>,
) -> bool {
    if !config.enabled {
        return false;
    }
    if last_export.is_some_and(|last| last.date() == now.date()) {
        return false;
    }
    let sub = config.sub_frequency.as_deref().map(str::trim);
    match config.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => sub
            .and_then(|s| s.parse::<Weekday>().ok())
            .is_some_and(|day| day == now.weekday()),
        Frequency::Biweekly => {
            if now.weekday() != Weekday::Sat {
                return false;
            }
            let week_of_month = now.day().div_ceil(7);
            match sub {
                Some(FIRST_AND_THIRD) => week_of_month == 1 || week_of_month == 3,
                Some(SECOND_AND_FOURTH) => week_of_month == 2 || week_of_month == 4,
                _ => false,
            }
        }
        Frequency::Monthly => sub
            .and_then(|s| s.parse::<u32>().ok())
            .is_some_and(|d| d == now.day()),
    }
}

pub fn load_config(conn: &Connection) -> Result<ExportConfig> {
    match get_setting(conn, CONFIG_KEY)? {
        Some(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("Invalid {} setting '{}'", CONFIG_KEY, raw)),
        None => Ok(ExportConfig::default()),
    }
}

pub fn save_config(conn: &Connection, config: &ExportConfig) -> Result<()> {
    set_setting(conn, CONFIG_KEY, &serde_json::to_string(config)?)
}

pub fn last_export(conn: &Connection) -> Result<Option<NaiveDateTime>> {
    get_setting(conn, LAST_EXPORT_KEY)?
        .map(|raw| {
            NaiveDateTime::parse_from_str(&raw, DATE_TIME_FORMAT)
                .with_context(|| format!("Invalid {} setting '{}'", LAST_EXPORT_KEY, raw))
        })
        .transpose()
}

pub fn record_export(conn: &Connection, at: NaiveDateTime) -> Result<()> {
    set_setting(conn, LAST_EXPORT_KEY, &at.format(DATE_TIME_FORMAT).to_string())
}
