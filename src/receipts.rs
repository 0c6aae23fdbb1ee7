// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::CategoryCatalog;
use crate::error::Result;
use crate::models::{lenient_decimal, AttentionRecord};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

static PRICE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(L\.\s*([\d.]+)\)").unwrap());

/// Reason a receipt is issued free of charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Exemption {
    LowIncome,
    Senior,
    Other(String),
}

impl Exemption {
    /// Maps a form value to an exemption. The stored labels are the ones
    /// historical rows use; anything else is kept as free text.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        match s {
            "" => None,
            "Escasos Recursos" => Some(Exemption::LowIncome),
            "Tercera Edad" => Some(Exemption::Senior),
            other => Some(Exemption::Other(other.to_string())),
        }
    }
}

impl fmt::Display for Exemption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exemption::LowIncome => f.write_str("Escasos Recursos"),
            Exemption::Senior => f.write_str("Tercera Edad"),
            Exemption::Other(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptItem {
    pub category: String,
    pub subcategory: String,
    pub price: Decimal,
}

impl ReceiptItem {
    /// `"<Category> - <Subcategory> (L. <price>)"`
    pub fn detail(&self) -> String {
        format!(
            "{} - {} (L. {})",
            self.category,
            self.subcategory,
            self.price.normalize()
        )
    }
}

/// Services chosen for a new receipt, priced from the catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReceiptDraft {
    items: Vec<ReceiptItem>,
    exemption: Option<Exemption>,
}

impl ReceiptDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog service; choosing the same service twice is a no-op.
    pub fn add(&mut self, catalog: &CategoryCatalog, category: &str, sub: &str) -> Result<()> {
        let (category, subcategory) = catalog.canonical_pair(category, sub)?;
        if self
            .items
            .iter()
            .any(|i| i.category == category && i.subcategory == subcategory)
        {
            return Ok(());
        }
        let price = catalog.price_of(&category, &subcategory);
        self.items.push(ReceiptItem {
            category,
            subcategory,
            price,
        });
        Ok(())
    }

    pub fn set_exemption(&mut self, exemption: Option<Exemption>) {
        self.exemption = exemption;
    }

    pub fn items(&self) -> &[ReceiptItem] {
        &self.items
    }

    pub fn exemption(&self) -> Option<&Exemption> {
        self.exemption.as_ref()
    }

    /// Sum of item prices, or zero when an exemption applies.
    pub fn total(&self) -> Decimal {
        if self.exemption.is_some() {
            return Decimal::ZERO;
        }
        self.items.iter().map(|i| i.price).sum()
    }

    /// Attention text stored on the receipt row.
    pub fn attention_text(&self) -> String {
        self.items
            .iter()
            .map(ReceiptItem::detail)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub description: String,
    pub price: Decimal,
}

/// Splits stored attention text into printable lines.
///
/// The `(L. <price>)` tag becomes the line price (zero when missing or
/// unreadable) and is removed from the description.
pub fn receipt_lines(attention_text: &str) -> Vec<ReceiptLine> {
    if attention_text.trim().is_empty() {
        return Vec::new();
    }
    attention_text
        .split(',')
        .map(|segment| {
            let price = PRICE_TAG
                .captures(segment)
                .and_then(|c| c.get(1))
                .and_then(|m| lenient_decimal(m.as_str()))
                .unwrap_or(Decimal::ZERO);
            ReceiptLine {
                description: PRICE_TAG.replace(segment, "").trim().to_string(),
                price,
            }
        })
        .collect()
}

/// Next receipt number for a health unit: one above the highest numeric
/// number in use. Non-numeric numbers are ignored.
pub fn next_receipt_number<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(|n| n.trim().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    max.saturating_add(1).to_string()
}

/// Records dated on `day`, from midnight up to (not including) the next midnight.
pub fn receipts_on(records: &[AttentionRecord], day: NaiveDate) -> Vec<&AttentionRecord> {
    let start = day.and_time(NaiveTime::MIN);
    let end = day.succ_opt().map(|d| d.and_time(NaiveTime::MIN));
    records
        .iter()
        .filter(|r| match r.date {
            Some(d) => d >= start && end.is_none_or(|e| d < e),
            None => false,
        })
        .collect()
}

/// Difference between a row's stored total and the sum of its line prices.
///
/// `None` when the row is exempt or has no amount.
pub fn total_mismatch(record: &AttentionRecord) -> Option<Decimal> {
    if record.exemption.is_some() {
        return None;
    }
    let stored = record.amount_total?;
    let lines: Decimal = receipt_lines(&record.attention_text)
        .iter()
        .map(|l| l.price)
        .sum();
    (stored != lines).then(|| stored - lines)
}
