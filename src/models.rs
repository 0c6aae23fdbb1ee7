// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// One persisted receipt row as fetched from the hosted store.
///
/// The store is weakly typed, so `date` and `amount_total` are optional:
/// values that fail to parse are kept as `None` instead of rejecting the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, alias = "numero_recibo", deserialize_with = "de_opt_text")]
    pub receipt_number: Option<String>,
    #[serde(default, alias = "nombre_paciente", deserialize_with = "de_opt_text")]
    pub patient_name: Option<String>,
    #[serde(default, alias = "unidad_salud", deserialize_with = "de_opt_text")]
    pub health_unit: Option<String>,
    #[serde(default, alias = "tipo_atencion", deserialize_with = "de_text")]
    pub attention_text: String,
    #[serde(default, alias = "fecha_recibo", deserialize_with = "de_lenient_datetime")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, alias = "total", deserialize_with = "de_lenient_decimal")]
    pub amount_total: Option<Decimal>,
    #[serde(default, alias = "excepciones", deserialize_with = "de_opt_text")]
    pub exemption: Option<String>,
}

impl AttentionRecord {
    pub fn new(id: impl Into<String>, attention_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            receipt_number: None,
            patient_name: None,
            health_unit: None,
            attention_text: attention_text.into(),
            date: None,
            amount_total: None,
            exemption: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount_total = Some(amount);
        self
    }

    /// Amount used for totals; absent amounts count as zero.
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount_total.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Scalar::deserialize(d)?.into_text())
}

fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<Scalar>::deserialize(d)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

fn de_opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(d)?
        .map(Scalar::into_text)
        .filter(|s| !s.trim().is_empty()))
}

fn de_lenient_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
    Ok(Option::<Scalar>::deserialize(d)?.and_then(|v| match v {
        Scalar::Bool(_) => None,
        Scalar::Int(i) => Some(Decimal::from(i)),
        // Display of f64 is the shortest round-trip form, e.g. 10.5 rather than 10.5000000001.
        Scalar::Float(f) => Decimal::from_str(&f.to_string()).ok(),
        Scalar::Text(s) => lenient_decimal(&s),
    }))
}

fn de_lenient_datetime<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    Ok(Option::<Scalar>::deserialize(d)?.and_then(|v| match v {
        Scalar::Text(s) => lenient_datetime(&s),
        _ => None,
    }))
}

/// Parses a decimal amount, tolerating surrounding whitespace and a
/// leading `L.` currency marker. Returns `None` for anything else.
pub fn lenient_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    let s = s.strip_prefix("L.").unwrap_or(s).trim().replace(',', "");
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(&s).ok()
}

/// Parses the timestamp shapes found in exported rows: RFC 3339, ISO date-time
/// without offset, or a bare `YYYY-MM-DD` (taken as midnight).
///
/// Offsets are dropped and the wall-clock time of the stamp is kept.
pub fn lenient_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
