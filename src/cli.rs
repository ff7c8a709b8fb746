// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn html_arg() -> Arg {
    Arg::new("html")
        .long("html")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Also write the chart as an HTML page")
}

fn kind_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(["income", "expense"])
        .ignore_case(true)
}

/// Full command line: global options plus every session command.
pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .about("Personal finance tracker: balances, category charts, spending alerts")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data_dir")
                .long("data-dir")
                .global(true)
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Where settings and exports are kept"),
        )
        .arg(
            Arg::new("load")
                .long("load")
                .global(true)
                .value_name("CSV")
                .value_parser(value_parser!(PathBuf))
                .help("Seed the session with transactions from an exported CSV"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("shell").about("Interactive session (default)"))
        .subcommands(session_commands())
}

/// Parser for lines typed inside the interactive shell.
pub fn build_shell() -> Command {
    Command::new("pocketbook")
        .no_binary_name(true)
        .disable_version_flag(true)
        .subcommand_required(true)
        .subcommand(Command::new("quit").alias("exit").about("Leave the shell"))
        .subcommands(session_commands())
}

pub fn session_commands() -> Vec<Command> {
    vec![
        json_flags(
            Command::new("dashboard")
                .about("Balance, period totals and the category breakdown")
                .arg(kind_arg("direction").help("Which side the breakdown shows"))
                .arg(html_arg()),
        ),
        Command::new("period")
            .about("Select the period every summary is scoped to")
            .subcommand_required(true)
            .subcommand(
                Command::new("month")
                    .arg(
                        Arg::new("month")
                            .long("month")
                            .required(true)
                            .value_parser(value_parser!(u32).range(1..=12)),
                    )
                    .arg(Arg::new("year").long("year").value_parser(value_parser!(i32))),
            )
            .subcommand(
                Command::new("year")
                    .arg(Arg::new("year").long("year").value_parser(value_parser!(i32))),
            )
            .subcommand(Command::new("all"))
            .subcommand(Command::new("show")),
        Command::new("tx")
            .about("Add, list, edit and delete transactions")
            .subcommand_required(true)
            .subcommand(
                Command::new("add")
                    .arg(Arg::new("title").long("title").required(true))
                    .arg(Arg::new("amount").long("amount").required(true))
                    .arg(Arg::new("category").long("category").required(true))
                    .arg(kind_arg("type").default_value("expense"))
                    .arg(
                        Arg::new("date")
                            .long("date")
                            .help("YYYY-MM-DD[THH:MM[:SS]], defaults to now"),
                    ),
            )
            .subcommand(json_flags(
                Command::new("list").arg(
                    Arg::new("period")
                        .long("period")
                        .action(ArgAction::SetTrue)
                        .help("Only the selected period"),
                ),
            ))
            .subcommand(
                Command::new("edit")
                    .arg(
                        Arg::new("index")
                            .long("index")
                            .required(true)
                            .value_parser(value_parser!(usize)),
                    )
                    .arg(Arg::new("title").long("title"))
                    .arg(Arg::new("amount").long("amount"))
                    .arg(Arg::new("category").long("category"))
                    .arg(kind_arg("type"))
                    .arg(Arg::new("date").long("date")),
            )
            .subcommand(
                Command::new("rm").arg(
                    Arg::new("index")
                        .long("index")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                ),
            ),
        Command::new("category")
            .about("Manage categories")
            .subcommand_required(true)
            .subcommand(
                Command::new("add")
                    .arg(Arg::new("name").long("name").required(true))
                    .arg(Arg::new("color").long("color").default_value("#EF4444"))
                    .arg(kind_arg("type")),
            )
            .subcommand(Command::new("list"))
            .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        Command::new("alerts")
            .about("Spending alert rules and the daily reminder")
            .subcommand_required(true)
            .subcommand(Command::new("show"))
            .subcommand(
                Command::new("set")
                    .arg(
                        Arg::new("rule")
                            .long("rule")
                            .required(true)
                            .value_parser(["a", "b", "c"])
                            .ignore_case(true),
                    )
                    .arg(Arg::new("on").long("on").action(ArgAction::SetTrue))
                    .arg(
                        Arg::new("off")
                            .long("off")
                            .action(ArgAction::SetTrue)
                            .conflicts_with("on"),
                    )
                    .arg(Arg::new("percentage").long("percentage")),
            )
            .subcommand(Command::new("check"))
            .subcommand(
                Command::new("time")
                    .arg(Arg::new("at").long("at").value_name("HH:MM"))
                    .arg(
                        Arg::new("clear")
                            .long("clear")
                            .action(ArgAction::SetTrue)
                            .conflicts_with("at"),
                    ),
            ),
        Command::new("profile")
            .about("Show or update the local profile")
            .subcommand_required(true)
            .subcommand(Command::new("show"))
            .subcommand(
                Command::new("set")
                    .arg(Arg::new("name").long("name"))
                    .arg(Arg::new("age").long("age").value_parser(value_parser!(u32)))
                    .arg(
                        Arg::new("status")
                            .long("status")
                            .value_parser(["single", "married", "dating"])
                            .ignore_case(true),
                    ),
            ),
        Command::new("chart")
            .about("Evolution of income and expenses over time")
            .subcommand_required(true)
            .subcommand(json_flags(Command::new("total").arg(html_arg())))
            .subcommand(json_flags(
                Command::new("category")
                    .arg(Arg::new("name").long("name").required(true))
                    .arg(html_arg()),
            )),
        Command::new("export")
            .about("Export transactions and manage automatic exports")
            .subcommand_required(true)
            .subcommand(
                Command::new("transactions")
                    .arg(Arg::new("format").long("format").default_value("csv"))
                    .arg(Arg::new("out").long("out").required(true)),
            )
            .subcommand(
                Command::new("schedule")
                    .subcommand_required(true)
                    .subcommand(Command::new("show"))
                    .subcommand(
                        Command::new("set")
                            .arg(
                                Arg::new("frequency")
                                    .long("frequency")
                                    .required(true)
                                    .value_parser(["daily", "weekly", "biweekly", "monthly"]),
                            )
                            .arg(Arg::new("on").long("on").help(
                                "Weekday, day of month, first-and-third or second-and-fourth",
                            )),
                    )
                    .subcommand(Command::new("off")),
            ),
        Command::new("import")
            .about("Load transactions from a CSV export")
            .subcommand_required(true)
            .subcommand(Command::new("transactions").arg(Arg::new("path").long("path").required(true))),
    ]
}
