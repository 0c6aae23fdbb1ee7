// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use receiptdesk::catalog::CategoryCatalog;
use receiptdesk::cli;
use receiptdesk::commands::{catalog, Desk};
use receiptdesk::config::Settings;
use rust_decimal::Decimal;

fn catalog_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["receiptdesk", "catalog"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("catalog", m)) = matches.subcommand() else {
        panic!("no catalog subcommand");
    };
    m.clone()
}

#[test]
fn catalog_prints_in_every_output_mode() {
    let desk = Desk::default();
    catalog::handle(&desk, &catalog_matches(&[])).unwrap();
    catalog::handle(&desk, &catalog_matches(&["--json"])).unwrap();
    catalog::handle(&desk, &catalog_matches(&["--jsonl"])).unwrap();
}

#[test]
fn catalog_entries_serialize_as_a_list() {
    let desk = Desk::default();
    let value = serde_json::to_value(desk.catalog.entries()).unwrap();
    let list = value.as_array().unwrap();
    assert_eq!(list.len(), 5);
    assert!(list[0]["name"].is_string());
    assert!(list[0]["subcategories"].is_array());
}

#[test]
fn desk_money_uses_the_configured_symbol() {
    let settings = Settings {
        currency_symbol: "HNL".into(),
        ..Settings::default()
    };
    let desk = Desk::with_settings(settings, CategoryCatalog::default());
    assert_eq!(desk.money(&Decimal::new(123450, 2)), "HNL 1,234.50");
    catalog::handle(&desk, &catalog_matches(&["--json"])).unwrap();
}
