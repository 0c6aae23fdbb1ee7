// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::balance::{render_rows, BalanceRow};
use super::Desk;
use crate::filter::sum_totals;
use crate::models::AttentionRecord;
use crate::patients::{list_patients, patient_receipts};
use crate::utils::{fmt_date, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let records = desk.load_records(m)?;

    if let Some(name) = m.get_one::<String>("name") {
        let (rows, total) = rows_for_patient(&records, name);
        if maybe_print_json(json_flag, jsonl_flag, &rows)? {
            return Ok(());
        }
        println!("Receipts of {}", name.trim());
        if rows.is_empty() {
            println!("No receipts found for this patient.");
            return Ok(());
        }
        println!("{}", render_rows(desk, &rows, &total));
        return Ok(());
    }

    let patients = list_patients(&records, m.get_one::<String>("search").map(String::as_str));
    if maybe_print_json(json_flag, jsonl_flag, &patients)? {
        return Ok(());
    }
    if patients.is_empty() {
        println!("No patients found.");
        return Ok(());
    }
    let data = patients
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.receipts.to_string(),
                p.last_visit.map(|d| fmt_date(d.date())).unwrap_or_default(),
                desk.money(&p.total),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Patient", "Receipts", "Last visit", "Total"], data)
    );
    Ok(())
}

/// Balance rows of one patient, newest first, with their total.
pub fn rows_for_patient(records: &[AttentionRecord], name: &str) -> (Vec<BalanceRow>, Decimal) {
    let kept = patient_receipts(records, name);
    let total = sum_totals(kept.iter().copied());
    (kept.into_iter().map(BalanceRow::from).collect(), total)
}
