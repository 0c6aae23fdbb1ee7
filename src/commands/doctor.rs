// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Desk;
use crate::attention::parse_main_categories;
use crate::models::AttentionRecord;
use crate::receipts::total_mismatch;
use crate::utils::{fmt_money, pretty_table};
use anyhow::Result;

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let records = desk.load_records(m)?;
    let rows = find_issues(&records, &desk.settings.currency_symbol);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Receipt", "Detail"], rows));
    }
    Ok(())
}

/// One `[issue, receipt, detail]` row per problem found.
pub fn find_issues(records: &[AttentionRecord], symbol: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for r in records {
        let label = r.receipt_number.clone().unwrap_or_else(|| r.id.clone());

        // 1) Text no category token can be read from
        if parse_main_categories(&r.attention_text).is_empty() {
            rows.push(vec![
                "no_attention_type".into(),
                label.clone(),
                r.attention_text.clone(),
            ]);
        }

        // 2) Amount absent or unreadable
        if r.amount_total.is_none() {
            rows.push(vec!["missing_amount".into(), label.clone(), String::new()]);
        }

        // 3) Date absent or unreadable
        if r.date.is_none() {
            rows.push(vec!["missing_date".into(), label.clone(), String::new()]);
        }

        // 4) Total disagrees with the priced lines
        if let Some(diff) = total_mismatch(r) {
            rows.push(vec![
                "total_mismatch".into(),
                label,
                format!("off by {}", fmt_money(&diff, symbol)),
            ]);
        }
    }
    rows
}
