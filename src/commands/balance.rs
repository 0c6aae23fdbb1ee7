// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Desk;
use crate::catalog::CategoryCatalog;
use crate::filter::{filter_records, sum_totals, DateRange, FilterSelection};
use crate::models::AttentionRecord;
use crate::utils::{fmt_date, maybe_print_json, parse_date, parse_pair, pretty_table};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let records = desk.load_records(m)?;
    let selection = selection_from_matches(&desk.catalog, m)?;
    let report = build_report(&desk.catalog, &records, &selection);

    if maybe_print_json(json_flag, false, &report)? {
        return Ok(());
    }
    if jsonl_flag {
        maybe_print_json(false, true, &jsonl_lines(&report)?)?;
        return Ok(());
    }
    if !m.get_flag("no_header") {
        println!("Filters applied: {}", report.filters);
    }
    if records.is_empty() {
        println!("No receipts available for this health unit.");
        return Ok(());
    }
    if report.rows.is_empty() {
        println!("No receipts match the selected filters.");
        return Ok(());
    }
    println!("{}", render_table(desk, &report));
    Ok(())
}

/// Builds the selection described by `--category`, `--sub`, `--all`, `--from` and `--to`.
pub fn selection_from_matches(
    catalog: &CategoryCatalog,
    m: &clap::ArgMatches,
) -> Result<FilterSelection> {
    let mut selection = FilterSelection::new();
    if m.get_flag("all") {
        selection = selection.select_all(catalog);
    }
    if let Some(cats) = m.get_many::<String>("category") {
        for c in cats {
            let c = c.trim();
            if !c.is_empty() {
                selection = selection.with_category(c);
            }
        }
    }
    if let Some(pairs) = m.get_many::<String>("sub") {
        for p in pairs {
            let (main, sub) = parse_pair(p)?;
            selection = selection.with_subcategory(main, sub);
        }
    }
    let from = m.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = m.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(anyhow!("--from {} is after --to {}", from, to));
        }
        selection = selection.with_date_range(DateRange::new(from, to));
    }
    Ok(selection)
}

#[derive(Debug, Serialize)]
pub struct BalanceRow {
    pub receipt_number: String,
    pub date: String,
    pub patient: String,
    pub attention_type: String,
    pub amount: Decimal,
}

impl From<&AttentionRecord> for BalanceRow {
    fn from(r: &AttentionRecord) -> Self {
        Self {
            receipt_number: r.receipt_number.clone().unwrap_or_default(),
            date: r.date.map(|d| fmt_date(d.date())).unwrap_or_default(),
            patient: r.patient_name.clone().unwrap_or_default(),
            attention_type: r.attention_text.clone(),
            amount: r.amount_or_zero(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BalanceReport {
    pub filters: String,
    pub rows: Vec<BalanceRow>,
    pub total: Decimal,
}

pub fn build_report(
    catalog: &CategoryCatalog,
    records: &[AttentionRecord],
    selection: &FilterSelection,
) -> BalanceReport {
    let kept = filter_records(records, selection);
    BalanceReport {
        filters: selection.describe(catalog),
        total: sum_totals(kept.iter().copied()),
        rows: kept.into_iter().map(BalanceRow::from).collect(),
    }
}

/// JSON Lines form of a report: one line per row, then a closing
/// `{"filters": .., "total": ..}` line.
pub fn jsonl_lines(report: &BalanceReport) -> Result<Vec<serde_json::Value>> {
    let mut lines = report
        .rows
        .iter()
        .map(serde_json::to_value)
        .collect::<serde_json::Result<Vec<_>>>()?;
    lines.push(serde_json::json!({
        "filters": report.filters,
        "total": report.total,
    }));
    Ok(lines)
}

pub(crate) fn render_rows(desk: &Desk, rows: &[BalanceRow], total: &Decimal) -> comfy_table::Table {
    let mut data: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.receipt_number.clone(),
                r.date.clone(),
                r.patient.clone(),
                r.attention_type.clone(),
                desk.money(&r.amount),
            ]
        })
        .collect();
    data.push(vec![
        String::new(),
        String::new(),
        String::new(),
        "Total:".into(),
        desk.money(total),
    ]);
    pretty_table(
        &["Receipt #", "Date", "Patient", "Attention type", "Amount"],
        data,
    )
}

fn render_table(desk: &Desk, report: &BalanceReport) -> comfy_table::Table {
    render_rows(desk, &report.rows, &report.total)
}
