// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Receipt rows exported from the store (.csv, .json or .jsonl)")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON Lines"),
    ]
}

fn filter_args() -> [Arg; 5] {
    [
        Arg::new("category")
            .long("category")
            .short('c')
            .action(ArgAction::Append)
            .help("Attention type to include (repeatable)"),
        Arg::new("sub")
            .long("sub")
            .short('s')
            .action(ArgAction::Append)
            .help("CATEGORY|SUBCATEGORY to include (repeatable)"),
        Arg::new("all")
            .long("all")
            .action(ArgAction::SetTrue)
            .help("Select every category and subcategory of the catalog"),
        Arg::new("from")
            .long("from")
            .requires("to")
            .help("First day of the range (YYYY-MM-DD)"),
        Arg::new("to")
            .long("to")
            .requires("from")
            .help("Last day of the range (YYYY-MM-DD)"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("receiptdesk")
        .about("Clinic receipt balances, attention-type filters, and printable summaries")
        .version(clap::crate_version!())
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Settings file (defaults to the platform config dir)"),
        )
        .subcommand(
            Command::new("balance")
                .about("Filtered receipts with their total")
                .arg(input_arg())
                .args(filter_args())
                .args(json_args())
                .arg(
                    Arg::new("no_header")
                        .long("no-header")
                        .action(ArgAction::SetTrue)
                        .help("Do not print the applied-filters header"),
                ),
        )
        .subcommand(
            Command::new("today")
                .about("Receipts issued today (or on --date)")
                .arg(input_arg())
                .arg(Arg::new("date").long("date").help("Day to show (YYYY-MM-DD)"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("patients")
                .about("Patients seen by the health unit, or one patient's receipts")
                .arg(input_arg())
                .arg(
                    Arg::new("search")
                        .long("search")
                        .conflicts_with("name")
                        .help("Keep names containing this text (case-insensitive)"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Show the receipts of this patient, newest first"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("catalog")
                .about("Attention types, services, and prices")
                .args(json_args()),
        )
        .subcommand(
            Command::new("receipt")
                .about("Receipt helpers")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("compose")
                        .about("Build the detail text and total for a new receipt")
                        .arg(
                            Arg::new("item")
                                .long("item")
                                .required(true)
                                .action(ArgAction::Append)
                                .help("CATEGORY|SUBCATEGORY of a service (repeatable)"),
                        )
                        .arg(
                            Arg::new("exemption")
                                .long("exemption")
                                .help("Exemption reason; makes the total zero"),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Break stored detail text into priced lines")
                        .arg(Arg::new("text").long("text").required(true))
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("next-number")
                        .about("Next receipt number for the loaded rows")
                        .arg(input_arg()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write filtered receipts to CSV or JSON")
                .arg(input_arg())
                .args(filter_args())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .value_parser(["csv", "json"]),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Report rows the balance cannot fully account for")
                .arg(input_arg()),
        )
}
