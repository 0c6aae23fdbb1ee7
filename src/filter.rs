// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record filtering for the balance report.
//!
//! A [`FilterSelection`] is an immutable value; the page or command that owns
//! it swaps in a new one whenever the user changes a filter and recomputes the
//! view with [`filter_records`]. An empty dimension matches everything.

use crate::attention::{
    normalize, pair_key, parse_main_categories, parse_main_subcategory_pairs, split_pair_key,
    PAIR_SEPARATOR,
};
use crate::catalog::CategoryCatalog;
use crate::models::AttentionRecord;
use crate::utils::fmt_date;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use rust_decimal::Decimal;
use serde::Serialize;

/// Inclusive day range: `from` at 00:00:00.000 through `to` at 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// A single calendar day.
    pub fn day(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.from.and_time(NaiveTime::MIN)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.to.and_time(NaiveTime::MIN) + Duration::milliseconds(86_399_999)
    }

    /// Stamps are compared at millisecond precision.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let at = at.trunc_subsecs(3);
        at >= self.start() && at <= self.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSelection {
    categories: Vec<String>,
    subcategory_pairs: Vec<(String, String)>,
    date_range: Option<DateRange>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn subcategory_pairs(&self) -> &[(String, String)] {
        &self.subcategory_pairs
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    /// True when no dimension restricts anything.
    pub fn is_open(&self) -> bool {
        self.categories.is_empty() && self.subcategory_pairs.is_empty() && self.date_range.is_none()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !self.has_category(&category) {
            self.categories.push(category);
        }
        self
    }

    pub fn with_subcategory(mut self, category: impl Into<String>, sub: impl Into<String>) -> Self {
        let (category, sub) = (category.into(), sub.into());
        if !self.has_subcategory(&category, &sub) {
            self.subcategory_pairs.push((category, sub));
        }
        self
    }

    /// Adds the category when absent, removes it when present.
    pub fn toggled_category(&self, category: &str) -> Self {
        let mut next = self.clone();
        if self.has_category(category) {
            let key = normalize(category);
            next.categories.retain(|c| normalize(c) != key);
            next
        } else {
            next.with_category(category)
        }
    }

    /// Adds the pair when absent, removes it when present.
    pub fn toggled_subcategory(&self, category: &str, sub: &str) -> Self {
        let mut next = self.clone();
        if self.has_subcategory(category, sub) {
            let key = pair_key(category, sub);
            next.subcategory_pairs.retain(|(c, s)| pair_key(c, s) != key);
            next
        } else {
            next.with_subcategory(category, sub)
        }
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn without_date_range(mut self) -> Self {
        self.date_range = None;
        self
    }

    /// Every category and every pair of the catalog; the date range is kept.
    pub fn select_all(&self, catalog: &CategoryCatalog) -> Self {
        Self {
            categories: catalog.category_names().into_iter().map(String::from).collect(),
            subcategory_pairs: catalog.all_pairs(),
            date_range: self.date_range,
        }
    }

    pub fn cleared(&self) -> Self {
        Self::default()
    }

    fn has_category(&self, category: &str) -> bool {
        let key = normalize(category);
        self.categories.iter().any(|c| normalize(c) == key)
    }

    fn has_subcategory(&self, category: &str, sub: &str) -> bool {
        let key = pair_key(category, sub);
        self.subcategory_pairs.iter().any(|(c, s)| pair_key(c, s) == key)
    }

    /// One-line "filters applied" header for printed reports.
    pub fn describe(&self, catalog: &CategoryCatalog) -> String {
        let mut parts = Vec::new();
        if !self.categories.is_empty() {
            parts.push(format!("Types: {}", self.categories.join(", ")));
        }
        if !self.subcategory_pairs.is_empty() {
            let mut groups: Vec<(String, Vec<String>)> = Vec::new();
            for (category, sub) in &self.subcategory_pairs {
                let key = pair_key(category, sub);
                let (norm_main, norm_sub) = split_pair_key(&key);
                let main = catalog.resolve_category(norm_main).unwrap_or(norm_main);
                let display_sub = catalog
                    .resolve_subcategory(main, norm_sub)
                    .unwrap_or(norm_sub)
                    .to_string();
                match groups.iter_mut().find(|(m, _)| m == main) {
                    Some((_, subs)) => subs.push(display_sub),
                    None => groups.push((main.to_string(), vec![display_sub])),
                }
            }
            let grouped: Vec<String> = groups
                .iter()
                .map(|(main, subs)| format!("{}: {}", main, subs.join(", ")))
                .collect();
            parts.push(format!("Subcategories: {}", grouped.join(" | ")));
        }
        if let Some(range) = self.date_range {
            parts.push(format!(
                "Date range: {} - {}",
                fmt_date(range.from),
                fmt_date(range.to)
            ));
        }
        if parts.is_empty() {
            "No filters".to_string()
        } else {
            parts.join(" \u{2022} ")
        }
    }
}

/// Attention text of one record, prepared for matching.
#[derive(Debug, Clone)]
pub struct ParsedAttention {
    /// Normalized text, hyphens kept.
    pub text: String,
    /// Normalized text with every hyphen turned into a space.
    pub spaced: String,
    pub mains: Vec<String>,
    pub pairs: Vec<String>,
}

impl ParsedAttention {
    pub fn parse(attention_text: &str) -> Self {
        let text = normalize(attention_text);
        let spaced = text.replace('-', " ");
        Self {
            text,
            spaced,
            mains: parse_main_categories(attention_text),
            pairs: parse_main_subcategory_pairs(attention_text),
        }
    }

    /// The category is one of the parsed entry tokens.
    pub fn has_category_token(&self, category: &str) -> bool {
        self.mains.iter().any(|m| m == category)
    }

    /// The category shows up anywhere in the text, hyphen or space form.
    pub fn mentions_category(&self, category: &str) -> bool {
        self.text.contains(category) || self.spaced.contains(category)
    }

    /// The `main|sub` key is one of the parsed entry pairs.
    pub fn has_pair_token(&self, key: &str) -> bool {
        self.pairs.iter().any(|p| p == key)
    }

    /// `main-sub` appears in the text, or `main sub` in its spaced form.
    pub fn mentions_pair(&self, key: &str) -> bool {
        let hyphen_form = key.replacen(PAIR_SEPARATOR, "-", 1);
        let space_form = key.replacen(PAIR_SEPARATOR, " ", 1);
        self.text.contains(&hyphen_form) || self.spaced.contains(&space_form)
    }
}

/// Selection with every name already normalized, built once per filter pass.
struct PreparedSelection {
    mains: Vec<String>,
    pairs: Vec<String>,
    date_range: Option<DateRange>,
}

impl PreparedSelection {
    fn new(selection: &FilterSelection) -> Self {
        Self {
            mains: selection.categories.iter().map(|c| normalize(c)).collect(),
            pairs: selection
                .subcategory_pairs
                .iter()
                .map(|(c, s)| pair_key(c, s))
                .collect(),
            date_range: selection.date_range,
        }
    }

    fn match_category(&self, parsed: &ParsedAttention) -> bool {
        self.mains.is_empty()
            || self
                .mains
                .iter()
                .any(|sel| parsed.has_category_token(sel) || parsed.mentions_category(sel))
    }

    fn match_subcategory(&self, parsed: &ParsedAttention) -> bool {
        self.pairs.is_empty()
            || self
                .pairs
                .iter()
                .any(|sel| parsed.has_pair_token(sel) || parsed.mentions_pair(sel))
    }

    fn match_date(&self, date: Option<NaiveDateTime>) -> bool {
        match self.date_range {
            None => true,
            Some(range) => date.is_some_and(|d| range.contains(d)),
        }
    }

    fn includes(&self, record: &AttentionRecord) -> bool {
        let parsed = ParsedAttention::parse(&record.attention_text);
        self.match_category(&parsed)
            && self.match_subcategory(&parsed)
            && self.match_date(record.date)
    }
}

/// Whether a single record passes the selection.
pub fn record_matches(record: &AttentionRecord, selection: &FilterSelection) -> bool {
    PreparedSelection::new(selection).includes(record)
}

/// Records passing the selection, in input order. Inputs are not modified.
pub fn filter_records<'a>(
    records: &'a [AttentionRecord],
    selection: &FilterSelection,
) -> Vec<&'a AttentionRecord> {
    let prepared = PreparedSelection::new(selection);
    let out: Vec<&AttentionRecord> = records.iter().filter(|r| prepared.includes(r)).collect();
    tracing::debug!(input = records.len(), kept = out.len(), "filtered records");
    out
}

/// Sum of `amount_total`; records without an amount count as zero.
pub fn sum_totals<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a AttentionRecord>,
{
    records
        .into_iter()
        .fold(Decimal::ZERO, |acc, r| acc + r.amount_or_zero())
}

/// Holds the fetched rows and the current selection for a balance screen.
///
/// The selection is replaced as a whole; filtering itself stays stateless.
#[derive(Debug, Clone, Default)]
pub struct BalanceView {
    records: Vec<AttentionRecord>,
    selection: FilterSelection,
}

impl BalanceView {
    pub fn new(records: Vec<AttentionRecord>) -> Self {
        Self {
            records,
            selection: FilterSelection::default(),
        }
    }

    pub fn records(&self) -> &[AttentionRecord] {
        &self.records
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn set_records(&mut self, records: Vec<AttentionRecord>) {
        self.records = records;
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    pub fn visible(&self) -> Vec<&AttentionRecord> {
        filter_records(&self.records, &self.selection)
    }

    pub fn total(&self) -> Decimal {
        sum_totals(self.visible())
    }
}
