// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::balance::{render_rows, BalanceRow};
use super::Desk;
use crate::filter::sum_totals;
use crate::receipts::receipts_on;
use crate::utils::{fmt_date, maybe_print_json, parse_date};
use anyhow::Result;
use chrono::NaiveDate;

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let day = match m.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let records = desk.load_records(m)?;
    let (rows, total) = rows_for_day(&records, day);

    if maybe_print_json(json_flag, jsonl_flag, &rows)? {
        return Ok(());
    }
    println!("Receipts of {}", fmt_date(day));
    if rows.is_empty() {
        println!("No receipts issued on this day.");
        return Ok(());
    }
    println!("{}", render_rows(desk, &rows, &total));
    Ok(())
}

pub fn rows_for_day(
    records: &[crate::models::AttentionRecord],
    day: NaiveDate,
) -> (Vec<BalanceRow>, rust_decimal::Decimal) {
    let kept = receipts_on(records, day);
    let total = sum_totals(kept.iter().copied());
    (kept.into_iter().map(BalanceRow::from).collect(), total)
}
