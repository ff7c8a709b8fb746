// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            let kind = sub
                .get_one::<String>("type")
                .map(|s| s.parse::<TxKind>())
                .transpose()?;
            session.store.add_category(name, color, kind)?;
            println!("Added category '{}'", name.trim());
        }
        Some(("list", _)) => {
            let data = session
                .store
                .categories()
                .iter()
                .map(|c| {
                    vec![
                        c.name.clone(),
                        c.color.clone(),
                        c.kind.map(|k| k.to_string()).unwrap_or_default(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Category", "Color", "Type"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            session.store.remove_category(name)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
