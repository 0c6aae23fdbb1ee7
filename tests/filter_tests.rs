// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use receiptdesk::catalog::CategoryCatalog;
use receiptdesk::filter::{
    filter_records, record_matches, sum_totals, BalanceView, DateRange, FilterSelection,
    ParsedAttention,
};
use receiptdesk::models::AttentionRecord;
use rust_decimal::Decimal;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> NaiveDateTime {
    day(y, m, d).and_hms_milli_opt(h, min, s, ms).unwrap()
}

fn rec(id: &str, text: &str) -> AttentionRecord {
    AttentionRecord::new(id, text)
}

fn ids(records: &[&AttentionRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn empty_selection_includes_every_record() {
    let records = vec![
        rec("1", "Odontologia - Consulta (L. 20.00)"),
        rec("2", ""),
        rec("3", "texto sin formato"),
    ];
    let kept = filter_records(&records, &FilterSelection::new());
    assert_eq!(ids(&kept), vec!["1", "2", "3"]);
}

#[test]
fn category_filter_selects_matching_records() {
    let records = vec![
        rec("1", "Odontologia - Consulta (L. 20.00)"),
        rec("2", "Control de Embarazo - Consulta (L. 10.00)"),
    ];
    let sel = FilterSelection::new().with_category("Odontologia");
    assert_eq!(ids(&filter_records(&records, &sel)), vec!["1"]);
}

#[test]
fn category_match_tolerates_accents_and_formatting() {
    let sel = FilterSelection::new().with_category("Odontologia");
    assert!(record_matches(&rec("1", "ODONTOLOGÍA-Consulta (L. 20)"), &sel));
    assert!(record_matches(&rec("2", "odontologia - consulta (l. 20)"), &sel));
    assert!(!record_matches(&rec("3", "Gratis - Partos (L. 0)"), &sel));
}

#[test]
fn category_matches_through_spaced_text() {
    let sel = FilterSelection::new().with_category("Planificacion Familiar");
    assert!(record_matches(&rec("1", "Planificacion-Familiar - Citologia"), &sel));
}

#[test]
fn multi_entry_record_matches_its_second_category() {
    let records = vec![rec(
        "1",
        "Odontologia - Consulta (L. 20.00), Examenes de laboratorio - Glicemia (L. 80.00)",
    )];
    let sel = FilterSelection::new().with_category("Examenes de laboratorio");
    assert_eq!(filter_records(&records, &sel).len(), 1);
}

#[test]
fn subcategory_filter_uses_hyphen_and_space_forms() {
    let records = vec![
        rec("1", "Odontologia - Consulta (L. 20.00)"),
        rec("2", "Odontologia - Extraccion (L. 50)"),
        rec("3", "Control de Embarazo - Consulta (L. 10)"),
        rec("4", "Odontologia Consulta"),
    ];
    let sel = FilterSelection::new().with_subcategory("Odontologia", "Consulta");
    assert_eq!(ids(&filter_records(&records, &sel)), vec!["1", "4"]);
}

#[test]
fn subcategory_matches_parsed_pair_exactly() {
    let parsed = ParsedAttention::parse("Gratis - Partos");
    assert!(parsed.has_pair_token("gratis|partos"));
    assert!(!parsed.has_pair_token("gratis|"));
    let bare = ParsedAttention::parse("Gratis");
    assert!(bare.has_pair_token("gratis|"));
}

#[test]
fn structured_and_substring_predicates_are_independent() {
    let parsed = ParsedAttention::parse("Examenes de laboratorio - Glicemia (L. 80)");
    assert!(parsed.has_category_token("examenes de laboratorio"));
    assert!(!parsed.has_category_token("laboratorio"));
    assert!(parsed.mentions_category("laboratorio"));
    assert!(!parsed.has_pair_token("examenes de laboratorio|glicemia"));
    assert!(parsed.mentions_pair("examenes de laboratorio|glicemia"));
}

#[test]
fn category_and_subcategory_filters_combine_with_and() {
    let records = vec![
        rec(
            "1",
            "Odontologia - Consulta (L. 20.00), Examenes de laboratorio - Glicemia (L. 80.00)",
        ),
        rec("2", "Odontologia - Consulta (L. 20.00)"),
    ];
    let sel = FilterSelection::new()
        .with_category("Odontologia")
        .with_subcategory("Examenes de laboratorio", "Glicemia");
    assert_eq!(ids(&filter_records(&records, &sel)), vec!["1"]);
}

#[test]
fn date_range_bounds_are_inclusive_to_the_millisecond() {
    let records = vec![
        rec("before", "Odontologia").with_date(at(2025, 2, 28, 23, 59, 59, 999)),
        rec("start", "Odontologia").with_date(at(2025, 3, 1, 0, 0, 0, 0)),
        rec("end", "Odontologia").with_date(at(2025, 3, 31, 23, 59, 59, 999)),
        rec("after", "Odontologia").with_date(at(2025, 4, 1, 0, 0, 0, 0)),
        rec("undated", "Odontologia"),
    ];
    let range = DateRange::new(day(2025, 3, 1), day(2025, 3, 31));
    let sel = FilterSelection::new().with_date_range(range);
    assert_eq!(ids(&filter_records(&records, &sel)), vec!["start", "end"]);

    let open = sel.without_date_range();
    assert_eq!(filter_records(&records, &open).len(), 5);
}

#[test]
fn filtering_does_not_modify_inputs() {
    let records = vec![rec("1", "Odontologia - Consulta")];
    let before = records.clone();
    let sel = FilterSelection::new().with_category("Gratis");
    assert!(filter_records(&records, &sel).is_empty());
    assert_eq!(records, before);
}

#[test]
fn sum_totals_treats_missing_amounts_as_zero() {
    let records = vec![
        rec("1", "").with_amount(Decimal::new(1050, 2)),
        rec("2", "").with_amount(Decimal::new(525, 2)),
        rec("3", ""),
    ];
    assert_eq!(sum_totals(&records), Decimal::new(1575, 2));
    assert_eq!(sum_totals(&Vec::<AttentionRecord>::new()), Decimal::ZERO);
}

#[test]
fn toggles_add_and_remove_by_normalized_name() {
    let sel = FilterSelection::new().toggled_category("Odontologia");
    assert_eq!(sel.categories(), ["Odontologia".to_string()]);
    let sel = sel.toggled_category("ODONTOLOGÍA");
    assert!(sel.categories().is_empty());

    let sel = sel
        .toggled_subcategory("Odontologia", "Consulta")
        .toggled_subcategory("Gratis", "Partos");
    assert_eq!(sel.subcategory_pairs().len(), 2);
    let sel = sel.toggled_subcategory("odontologia", "consulta");
    assert_eq!(
        sel.subcategory_pairs(),
        [("Gratis".to_string(), "Partos".to_string())]
    );
}

#[test]
fn select_all_and_clear() {
    let catalog = CategoryCatalog::default();
    let range = DateRange::day(day(2025, 1, 1));
    let sel = FilterSelection::new().with_date_range(range).select_all(&catalog);
    assert_eq!(sel.categories().len(), 5);
    assert_eq!(sel.subcategory_pairs().len(), 25);
    assert_eq!(sel.date_range(), Some(range));
    let cleared = sel.cleared();
    assert!(cleared.is_open());
}

#[test]
fn describe_groups_subcategories_under_display_names() {
    let catalog = CategoryCatalog::default();
    assert_eq!(FilterSelection::new().describe(&catalog), "No filters");

    let sel = FilterSelection::new()
        .with_category("Odontologia")
        .with_category("Gratis")
        .with_subcategory("odontologia", "consulta")
        .with_subcategory("Gratis", "Partos")
        .with_subcategory("Odontologia", "Extraccion")
        .with_date_range(DateRange::new(day(2025, 1, 1), day(2025, 1, 31)));
    assert_eq!(
        sel.describe(&catalog),
        "Types: Odontologia, Gratis \u{2022} Subcategories: Odontologia: Consulta, Extraccion | Gratis: Partos \u{2022} Date range: 01/01/2025 - 31/01/2025"
    );
}

#[test]
fn describe_falls_back_to_normalized_keys() {
    let catalog = CategoryCatalog::default();
    let sel = FilterSelection::new().with_subcategory("Radiología", "Tórax");
    assert_eq!(sel.describe(&catalog), "Subcategories: radiologia: torax");
}

#[test]
fn balance_view_recomputes_on_new_selection() {
    let mut view = BalanceView::new(vec![
        rec("1", "Odontologia - Consulta (L. 20)").with_amount(Decimal::from(20)),
        rec("2", "Gratis - Partos (L. 0)").with_amount(Decimal::ZERO),
        rec("3", "Examenes de laboratorio - Glicemia (L. 80)").with_amount(Decimal::from(80)),
    ]);
    assert_eq!(view.visible().len(), 3);
    assert_eq!(view.total(), Decimal::from(100));

    let next = view.selection().toggled_category("Examenes de laboratorio");
    view.set_selection(next);
    assert_eq!(view.visible().len(), 1);
    assert_eq!(view.total(), Decimal::from(80));
    assert_eq!(view.records().len(), 3);
}

#[test]
fn range_end_ignores_sub_millisecond_precision() {
    let last_micro = day(2025, 3, 31).and_hms_micro_opt(23, 59, 59, 999_500).unwrap();
    let range = DateRange::new(day(2025, 3, 1), day(2025, 3, 31));
    assert!(range.contains(last_micro));
    assert!(!range.contains(at(2025, 4, 1, 0, 0, 0, 0)));

    let records = vec![rec("late", "Odontologia").with_date(last_micro)];
    let sel = FilterSelection::new().with_date_range(range);
    assert_eq!(ids(&filter_records(&records, &sel)), vec!["late"]);
}

#[test]
fn replacing_records_keeps_the_selection() {
    let mut view = BalanceView::new(vec![rec("1", "Odontologia - Consulta (L. 20)")]);
    view.set_selection(FilterSelection::new().with_category("Gratis"));
    assert!(view.visible().is_empty());

    view.set_records(vec![
        rec("2", "Gratis - Partos (L. 0)").with_amount(Decimal::ZERO),
        rec("3", "Gratis - Control prenatal (L. 0)").with_amount(Decimal::new(150, 2)),
        rec("4", "Odontologia - Limpieza (L. 200)").with_amount(Decimal::from(200)),
    ]);
    assert_eq!(view.selection().categories(), ["Gratis".to_string()]);
    assert_eq!(ids(&view.visible()), vec!["2", "3"]);
    assert_eq!(view.total(), Decimal::new(150, 2));
}
