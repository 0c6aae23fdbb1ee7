// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Attention-type text handling.
//!
//! Receipt rows carry their services as free text such as
//! `"Odontologia - Consulta (L. 20), Examenes de laboratorio - Glicemia (L. 80)"`.
//! Historical rows are inconsistent about case, accents, dash style and
//! spacing, so everything is compared in normalized form.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static DASH_VARIANTS: Lazy<Regex> = Lazy::new(|| Regex::new("[\u{2013}\u{2014}\u{2212}]").unwrap());
static AROUND_HYPHEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Separator between a category and its subcategory inside a pair key.
pub const PAIR_SEPARATOR: char = '|';

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Canonical form used for every attention-type comparison.
///
/// Lower-cases, strips diacritics, folds en/em dashes and the minus sign into
/// `-`, removes whitespace around hyphens and collapses remaining whitespace.
/// Applying it twice gives the same result as applying it once.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    let dashed = DASH_VARIANTS.replace_all(&stripped, "-");
    let hyphens = AROUND_HYPHEN.replace_all(&dashed, "-");
    WHITESPACE_RUN.replace_all(&hyphens, " ").trim().to_string()
}

/// Category tokens of every entry, in order, duplicates kept.
///
/// Each comma-separated entry contributes the text before its first hyphen.
pub fn parse_main_categories(text: &str) -> Vec<String> {
    normalize(text)
        .split(',')
        .filter_map(|segment| {
            let main = segment.split('-').next().unwrap_or("").trim();
            (!main.is_empty()).then(|| main.to_string())
        })
        .collect()
}

/// `main|sub` keys of every entry, in order.
///
/// Entries without a category are dropped, while entries without a
/// subcategory are kept as `main|`. Legacy rows depend on this asymmetry.
pub fn parse_main_subcategory_pairs(text: &str) -> Vec<String> {
    normalize(text)
        .split(',')
        .filter_map(|segment| {
            let mut parts = segment.split('-');
            let main = parts.next().unwrap_or("").trim();
            let sub = parts.next().unwrap_or("").trim();
            if main.is_empty() {
                return None;
            }
            Some(format!("{}{}{}", main, PAIR_SEPARATOR, sub))
        })
        .collect()
}

/// Normalized `main|sub` key for a category/subcategory pair.
pub fn pair_key(main: &str, sub: &str) -> String {
    normalize(&format!("{}{}{}", main, PAIR_SEPARATOR, sub))
}

/// Splits a `main|sub` key back into its halves. A key without a separator
/// is treated as a bare category.
pub fn split_pair_key(key: &str) -> (&str, &str) {
    key.split_once(PAIR_SEPARATOR).unwrap_or((key, ""))
}
