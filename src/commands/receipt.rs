// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Desk;
use crate::cli;
use crate::receipts::{next_receipt_number, receipt_lines, Exemption, ReceiptDraft};
use crate::utils::{maybe_print_json, parse_pair, pretty_table};
use anyhow::{Context, Result};
use serde_json::json;

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("compose", sub)) => compose(desk, sub)?,
        Some(("show", sub)) => show(desk, sub)?,
        Some(("next-number", sub)) => {
            let records = desk.load_records(sub)?;
            let next = next_receipt_number(records.iter().filter_map(|r| r.receipt_number.as_deref()));
            println!("{}", next);
        }
        _ => {
            if let Some(cmd) = cli::build_cli().find_subcommand_mut("receipt") {
                cmd.print_help()?;
                println!();
            }
        }
    }
    Ok(())
}

/// Prices the `--item` services and applies `--exemption`.
pub fn draft_from_matches(desk: &Desk, m: &clap::ArgMatches) -> Result<ReceiptDraft> {
    let mut draft = ReceiptDraft::new();
    if let Some(items) = m.get_many::<String>("item") {
        for raw in items {
            let (main, sub) = parse_pair(raw)?;
            draft
                .add(&desk.catalog, &main, &sub)
                .with_context(|| format!("Cannot add '{}'", raw))?;
        }
    }
    draft.set_exemption(m.get_one::<String>("exemption").and_then(|s| Exemption::parse(s)));
    Ok(draft)
}

fn compose(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_matches(desk, m)?;
    let text = draft.attention_text();
    let total = draft.total();
    let exemption = draft.exemption().map(|e| e.to_string());
    let out = json!({ "attention_text": text, "exemption": exemption, "total": total });
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &out)? {
        return Ok(());
    }
    let rows = draft
        .items()
        .iter()
        .map(|i| vec![format!("{} - {}", i.category, i.subcategory), desk.money(&i.price)])
        .collect();
    println!("{}", pretty_table(&["Description", "Total"], rows));
    if let Some(e) = exemption {
        println!("Exemption: {}", e);
    }
    println!("TOTAL {}", desk.money(&total));
    println!("Detail: {}", text);
    Ok(())
}

fn show(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let text = m.get_one::<String>("text").context("--text is required")?;
    let lines = receipt_lines(text);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &lines)? {
        return Ok(());
    }
    let rows = lines
        .iter()
        .map(|l| vec![l.description.clone(), desk.money(&l.price)])
        .collect();
    println!("{}", pretty_table(&["Description", "Total"], rows));
    Ok(())
}
