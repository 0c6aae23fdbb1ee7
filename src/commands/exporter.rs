// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::balance::selection_from_matches;
use super::Desk;
use crate::filter::filter_records;
use crate::models::AttentionRecord;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m
        .get_one::<String>("format")
        .context("--format is required")?
        .to_lowercase();
    let out = m.get_one::<PathBuf>("out").context("--out is required")?;
    let records = desk.load_records(m)?;
    let selection = selection_from_matches(&desk.catalog, m)?;
    let kept = filter_records(&records, &selection);
    write_records(&kept, &fmt, out)?;
    println!("Exported {} receipts to {}", kept.len(), out.display());
    Ok(())
}

pub fn write_records(records: &[&AttentionRecord], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out.display()))?;
            wtr.write_record([
                "id",
                "receipt_number",
                "date",
                "patient_name",
                "health_unit",
                "attention_text",
                "amount_total",
                "exemption",
            ])?;
            for r in records {
                wtr.write_record([
                    r.id.clone(),
                    r.receipt_number.clone().unwrap_or_default(),
                    r.date.map(|d| d.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()).unwrap_or_default(),
                    r.patient_name.clone().unwrap_or_default(),
                    r.health_unit.clone().unwrap_or_default(),
                    r.attention_text.clone(),
                    r.amount_total.map(|a| a.to_string()).unwrap_or_default(),
                    r.exemption.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(records)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    Ok(())
}
