// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use receiptdesk::{cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RECEIPTDESK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let desk = commands::Desk::open(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    tracing::debug!(categories = desk.catalog.entries().len(), "desk ready");

    match matches.subcommand() {
        Some(("balance", sub)) => commands::balance::handle(&desk, sub)?,
        Some(("today", sub)) => commands::today::handle(&desk, sub)?,
        Some(("patients", sub)) => commands::patients::handle(&desk, sub)?,
        Some(("catalog", sub)) => commands::catalog::handle(&desk, sub)?,
        Some(("receipt", sub)) => commands::receipt::handle(&desk, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&desk, sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(&desk, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
