// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of tables")
}

fn date_format_arg() -> Arg {
    Arg::new("date_format")
        .long("date-format")
        .value_parser(["dmy", "mdy"])
        .default_value("dmy")
        .help("Order of the date column: dmy (31/01/2023) or mdy (01/31/2023)")
}

pub fn build_cli() -> Command {
    Command::new("fluxo")
        .about("Categorize a bank statement, summarize cash flow and forecast expenses")
        .version(clap::crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("analyze")
                .about("Run the full dashboard over a ';'-separated statement")
                .arg(Arg::new("path").long("path").help("Statement CSV file"))
                .arg(
                    Arg::new("horizon")
                        .long("horizon")
                        .value_parser(value_parser!(u32).range(1..=12))
                        .default_value("3")
                        .help("Months of expenses to forecast (1-12)"),
                )
                .arg(date_format_arg())
                .arg(
                    Arg::new("tail")
                        .long("tail")
                        .value_parser(value_parser!(usize))
                        .default_value("5")
                        .help("Recent rows to show"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("categorize")
                .about("Show the category of one description")
                .arg(Arg::new("desc").long("desc").required(true)),
        )
        .subcommand(
            Command::new("rules")
                .about("List the keyword table in match order")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check a statement's columns, amounts and date format")
                .arg(Arg::new("path").long("path").required(true))
                .arg(date_format_arg()),
        )
}
