// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Patient directory derived from the loaded receipt rows.

use crate::models::AttentionRecord;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientSummary {
    pub name: String,
    pub receipts: usize,
    pub total: Decimal,
    pub last_visit: Option<NaiveDateTime>,
}

/// Distinct patient names, ordered by name ignoring case.
///
/// `search` keeps names containing it, case-insensitively. A blank search
/// keeps everyone. Rows without a patient name are skipped.
pub fn list_patients(records: &[AttentionRecord], search: Option<&str>) -> Vec<PatientSummary> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut by_name: BTreeMap<(String, String), PatientSummary> = BTreeMap::new();
    for r in records {
        let Some(name) = r.patient_name.as_deref().map(str::trim) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let lower = name.to_lowercase();
        if let Some(needle) = &needle {
            if !lower.contains(needle.as_str()) {
                continue;
            }
        }
        let entry = by_name
            .entry((lower, name.to_string()))
            .or_insert_with(|| PatientSummary {
                name: name.to_string(),
                receipts: 0,
                total: Decimal::ZERO,
                last_visit: None,
            });
        entry.receipts += 1;
        entry.total += r.amount_or_zero();
        entry.last_visit = entry.last_visit.max(r.date);
    }
    by_name.into_values().collect()
}

/// Receipts of one patient, newest first. Undated rows come last.
pub fn patient_receipts<'a>(records: &'a [AttentionRecord], name: &str) -> Vec<&'a AttentionRecord> {
    let name = name.trim();
    let mut kept: Vec<&AttentionRecord> = records
        .iter()
        .filter(|r| r.patient_name.as_deref().map(str::trim) == Some(name))
        .collect();
    kept.sort_by(|a, b| b.date.cmp(&a.date));
    kept
}
