// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reading exported receipt rows.
//!
//! Rows come from the hosted store as CSV, a JSON array, or JSON Lines. A row
//! that cannot be decoded at all is skipped with a warning so one corrupt row
//! never hides the rest of the report.

use crate::error::{DeskError, Result};
use crate::models::{AttentionRecord, lenient_datetime, lenient_decimal};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    JsonLines,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(Format::Csv),
            Some("json") => Ok(Format::Json),
            Some("jsonl") | Some("ndjson") => Ok(Format::JsonLines),
            _ => Err(DeskError::UnknownFormat(path.to_path_buf())),
        }
    }
}

pub fn load_records(path: &Path) -> Result<Vec<AttentionRecord>> {
    let format = Format::from_path(path)?;
    let file = File::open(path)?;
    let records = read_records(file, format)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "loaded records");
    Ok(records)
}

pub fn read_records<R: Read>(reader: R, format: Format) -> Result<Vec<AttentionRecord>> {
    match format {
        Format::Csv => read_csv(reader),
        Format::Json => read_json(reader),
        Format::JsonLines => read_json_lines(reader),
    }
}

/// A CSV row exactly as written. Every cell is read as text so values such
/// as `00042` or `true` reach the record unchanged.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "numero_recibo")]
    receipt_number: Option<String>,
    #[serde(default, alias = "nombre_paciente")]
    patient_name: Option<String>,
    #[serde(default, alias = "unidad_salud")]
    health_unit: Option<String>,
    #[serde(default, alias = "tipo_atencion")]
    attention_text: Option<String>,
    #[serde(default, alias = "fecha_recibo")]
    date: Option<String>,
    #[serde(default, alias = "total")]
    amount_total: Option<String>,
    #[serde(default, alias = "excepciones")]
    exemption: Option<String>,
}

fn non_blank(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty())
}

impl CsvRow {
    fn into_record(self) -> Option<AttentionRecord> {
        let id = non_blank(self.id)?.trim().to_string();
        Some(AttentionRecord {
            id,
            receipt_number: non_blank(self.receipt_number),
            patient_name: non_blank(self.patient_name),
            health_unit: non_blank(self.health_unit),
            attention_text: self.attention_text.unwrap_or_default(),
            date: self.date.as_deref().and_then(lenient_datetime),
            amount_total: self.amount_total.as_deref().and_then(lenient_decimal),
            exemption: non_blank(self.exemption),
        })
    }
}

fn read_csv<R: Read>(reader: R) -> Result<Vec<AttentionRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<CsvRow>().enumerate() {
        match result.map(CsvRow::into_record) {
            Ok(Some(rec)) => out.push(rec),
            Ok(None) => tracing::warn!(row = idx + 1, "skipping row without id"),
            Err(err) => tracing::warn!(row = idx + 1, error = %err, "skipping unreadable row"),
        }
    }
    Ok(out)
}

fn read_json<R: Read>(reader: R) -> Result<Vec<AttentionRecord>> {
    let rows: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| decode_row(idx + 1, row))
        .collect())
}

fn read_json_lines<R: Read>(reader: R) -> Result<Vec<AttentionRecord>> {
    let mut out = Vec::new();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<serde_json::Value>(&line) {
            Ok(row) => out.extend(decode_row(idx + 1, row)),
            Err(err) => tracing::warn!(row = idx + 1, error = %err, "skipping unreadable line"),
        }
    }
    Ok(out)
}

fn decode_row(row: usize, value: serde_json::Value) -> Option<AttentionRecord> {
    match serde_json::from_value(value) {
        Ok(rec) => Some(rec),
        Err(err) => {
            tracing::warn!(row, error = %err, "skipping unreadable row");
            None
        }
    }
}

/// Keeps only the rows of `unit`. Rows without a unit are dropped.
pub fn for_health_unit(records: Vec<AttentionRecord>, unit: &str) -> Vec<AttentionRecord> {
    records
        .into_iter()
        .filter(|r| r.health_unit.as_deref() == Some(unit))
        .collect()
}
