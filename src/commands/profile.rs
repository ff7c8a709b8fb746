// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {}
        Some(("set", sub)) => {
            if let Some(name) = sub.get_one::<String>("name") {
                let name = name.trim();
                if name.is_empty() {
                    anyhow::bail!("Name must not be empty");
                }
                session.profile.name = name.to_string();
            }
            if let Some(age) = sub.get_one::<u32>("age") {
                session.profile.age = *age;
            }
            if let Some(status) = sub.get_one::<String>("status") {
                session.profile.status = status.parse()?;
            }
            println!("Profile updated.");
        }
        _ => return Ok(()),
    }
    let p = &session.profile;
    println!(
        "{}",
        pretty_table(
            &["User ID", "Name", "Age", "Status"],
            vec![vec![
                p.user_id.clone(),
                p.name.clone(),
                p.age.to_string(),
                p.status.to_string(),
            ]],
        )
    );
    Ok(())
}
