// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use pocketbook::session::{Clock, Session};
use pocketbook::{cli, commands, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_flag("verbose"));

    let dir = db::data_dir(matches.get_one::<PathBuf>("data_dir").map(PathBuf::as_path))?;
    let conn = db::open_or_init(&dir)?;
    let mut session = Session::new(conn, dir, Clock::System);

    if let Some(path) = matches.get_one::<PathBuf>("load") {
        let count = commands::importer::load_csv(&mut session.store, path)?;
        println!("Loaded {} transactions from {}", count, path.display());
    }

    match commands::exporter::run_scheduled_export(&session) {
        Ok(Some(path)) => println!("Automatic export written to {}", path.display()),
        Ok(None) => {}
        Err(err) => {
            let reason = format!("{:#}", err);
            tracing::warn!(error = %reason, "automatic export failed");
        }
    }

    match matches.subcommand() {
        None | Some(("shell", _)) => {
            let stdin = std::io::stdin();
            session.run_shell(stdin.lock(), std::io::stdout())?;
        }
        Some(_) => session.dispatch(&matches)?,
    }
    Ok(())
}
