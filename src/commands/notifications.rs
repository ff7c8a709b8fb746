// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{AlertOutcome, AlertRuleKind};
use crate::session::{Session, alert_banner};
use crate::utils::{fmt_percent, parse_decimal, parse_time, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(session),
        Some(("set", sub)) => set(session, sub)?,
        Some(("check", _)) => {
            let outcomes = check(session);
            let rows = outcomes
                .iter()
                .map(|o| {
                    vec![
                        o.rule.to_string(),
                        fmt_percent(o.percentage),
                        format!("{}%", session.alerts.rule(o.rule).percentage),
                        if o.fired { "yes" } else { "no" }.to_string(),
                        o.subject.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Rule", "Current", "Limit", "Fired", "Category"], rows)
            );
            for o in outcomes.iter().filter(|o| o.fired) {
                println!("{}", alert_banner(o, session.alerts.rule(o.rule).percentage));
            }
        }
        Some(("time", sub)) => {
            if sub.get_flag("clear") {
                session.reminder_at = None;
                println!("Daily reminder cleared.");
            } else if let Some(at) = sub.get_one::<String>("at") {
                let t = parse_time(at)?;
                session.reminder_at = Some(t);
                println!("Daily reminder set for {}.", t.format("%H:%M"));
            } else {
                match session.reminder_at {
                    Some(t) => println!("Daily reminder at {}.", t.format("%H:%M")),
                    None => println!("No daily reminder set."),
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// Evaluates enabled rules for the active period, using today as rule B's day.
pub fn check(session: &Session) -> Vec<AlertOutcome> {
    let today = session.now().date();
    session
        .alerts
        .evaluate_all(&session.store.snapshot(), &session.period, today)
}

fn show(session: &Session) {
    let describe = |kind: AlertRuleKind| match kind {
        AlertRuleKind::A => "Spend this share of income",
        AlertRuleKind::B => "Spend this share of income in one day",
        AlertRuleKind::C => "One category reaches this share of expenses",
    };
    let rows = [AlertRuleKind::A, AlertRuleKind::B, AlertRuleKind::C]
        .into_iter()
        .map(|k| {
            let rule = session.alerts.rule(k);
            vec![
                k.to_string(),
                describe(k).to_string(),
                if rule.enabled { "on" } else { "off" }.to_string(),
                format!("{}%", rule.percentage),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Rule", "Condition", "State", "Limit"], rows)
    );
}

fn set(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let kind: AlertRuleKind = sub.get_one::<String>("rule").unwrap().parse()?;
    let percentage = sub
        .get_one::<String>("percentage")
        .map(|p| parse_decimal(p))
        .transpose()?;
    if let Some(p) = percentage {
        if p < Decimal::ZERO || p > Decimal::ONE_HUNDRED {
            anyhow::bail!("Invalid percentage {}, expected 0-100", p);
        }
    }

    let rule = session.alerts.rule_mut(kind);
    if sub.get_flag("on") {
        rule.enabled = true;
    }
    if sub.get_flag("off") {
        rule.enabled = false;
    }
    if let Some(p) = percentage {
        rule.percentage = p;
    }
    tracing::info!(rule = %kind, enabled = rule.enabled, percentage = %rule.percentage, "alert rule updated");
    println!(
        "Alert {} {} at {}%",
        kind,
        if rule.enabled { "enabled" } else { "disabled" },
        rule.percentage
    );
    Ok(())
}
