// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use receiptdesk::config::Settings;
use receiptdesk::error::DeskError;
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_settings_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.currency_symbol, "L.");
    assert_eq!(settings.catalog().unwrap().category_names().len(), 5);
}

#[test]
fn settings_file_overrides_fields() {
    let dir = tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"[{"name": "Radiologia", "subcategories": [{"label": "Torax", "price": 350}]}]"#,
    )
    .unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        format!(
            r#"{{"health_unit": "Centro A", "catalog_path": {}}}"#,
            serde_json::to_string(&catalog).unwrap()
        ),
    )
    .unwrap();

    let settings = Settings::load(Some(path.as_path())).unwrap();
    assert_eq!(settings.currency_symbol, "L.");
    assert_eq!(settings.health_unit.as_deref(), Some("Centro A"));
    assert_eq!(settings.catalog().unwrap().category_names(), vec!["Radiologia"]);
}

#[test]
fn malformed_settings_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ currency_symbol: ").unwrap();
    assert!(matches!(Settings::load_from(&path), Err(DeskError::Settings(_))));
}
