// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and manage transactions")
        .subcommand(
            Command::new("add")
                .about("Record a purchase, sale, or investment")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .help("purchase|sale|investment"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Positive amount"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("Calendar date YYYY-MM-DD (default: today)"),
                )
                .arg(Arg::new("remark").long("remark").help("Optional note")),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit amount, date, or remark of a transaction")
                .arg(Arg::new("id").long("id").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Positive amount"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("New calendar date YYYY-MM-DD (default: keep)"),
                )
                .arg(Arg::new("remark").long("remark").help("Replacement note")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete transactions after confirmation")
                .arg(Arg::new("id").num_args(0..).help("Transaction ids"))
                .arg(
                    Arg::new("selected")
                        .long("selected")
                        .action(ArgAction::SetTrue)
                        .help("Delete the current selection"),
                )
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(
            Command::new("select")
                .about("Toggle transactions in the bulk-operation selection")
                .arg(Arg::new("id").num_args(0..).help("Transaction ids"))
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Select all, or clear when all are selected"),
                ),
        )
        .subcommand(with_json_flags(
            Command::new("list")
                .about("List transactions")
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .help("date|amount|kind (default: date)"),
                )
                .arg(Arg::new("order").long("order").help("asc|desc (default: desc)"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .help("Show at most N rows"),
                ),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Derived views over the transaction log")
        .subcommand(with_json_flags(
            Command::new("summary").about("Capital, total profit, and today's sales"),
        ))
        .subcommand(with_json_flags(
            Command::new("chart").about("Last-7-days sales bar chart"),
        ))
        .subcommand(with_json_flags(
            Command::new("sales")
                .about("Sales history grouped by day, week, or month")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .required(true)
                        .help("day|week|month"),
                ),
        ))
}

fn export_cmd() -> Command {
    Command::new("export").about("Export recorded data").subcommand(
        Command::new("transactions")
            .about("Export the transaction log")
            .arg(
                Arg::new("format")
                    .long("format")
                    .required(true)
                    .help("csv|json"),
            )
            .arg(Arg::new("out").long("out").required(true).help("Output file")),
    )
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Store settings")
        .subcommand(
            Command::new("set-currency")
                .about("Set the display currency code")
                .arg(Arg::new("currency").required(true)),
        )
        .subcommand(Command::new("show").about("Show settings and the store path"))
}

pub fn build_cli() -> Command {
    Command::new("captrack")
        .version(crate_version!())
        .about("Captrack: single-user capital, sales, and investment tracking")
        .subcommand(Command::new("init").about("Initialize the local store and print its path"))
        .subcommand(tx_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(config_cmd())
}
