// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use receiptdesk::error::DeskError;
use receiptdesk::loader::{for_health_unit, load_records, read_records, Format};
use rust_decimal::Decimal;
use std::fs;
use tempfile::tempdir;

#[test]
fn csv_rows_with_legacy_columns_load_leniently() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("recibos.csv");
    fs::write(
        &path,
        "id,numero_recibo,fecha_recibo,nombre_paciente,unidad_salud,tipo_atencion,total,excepciones\n\
         1,1,2025-01-03,Ana,Centro A,\"Odontologia - Consulta (L. 20), Gratis - Partos (L. 0)\",20,\n\
         2,2,2025-01-04T10:30:00,Luis,Centro A,Gratis - Partos (L. 0),,Tercera Edad\n\
         3,3,not-a-date,Eva,Centro B,Examenes de laboratorio - Glicemia (L. 80),abc,\n",
    )
    .unwrap();

    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 3);

    let first = &records[0];
    assert_eq!(first.id, "1");
    assert_eq!(first.receipt_number.as_deref(), Some("1"));
    assert_eq!(first.patient_name.as_deref(), Some("Ana"));
    assert_eq!(
        first.attention_text,
        "Odontologia - Consulta (L. 20), Gratis - Partos (L. 0)"
    );
    assert_eq!(
        first.date,
        NaiveDate::from_ymd_opt(2025, 1, 3).unwrap().and_hms_opt(0, 0, 0)
    );
    assert_eq!(first.amount_total, Some(Decimal::from(20)));
    assert_eq!(first.exemption, None);

    let second = &records[1];
    assert_eq!(
        second.date,
        NaiveDate::from_ymd_opt(2025, 1, 4).unwrap().and_hms_opt(10, 30, 0)
    );
    assert_eq!(second.amount_total, None);
    assert_eq!(second.exemption.as_deref(), Some("Tercera Edad"));

    let third = &records[2];
    assert_eq!(third.date, None);
    assert_eq!(third.amount_total, None);
    assert_eq!(third.health_unit.as_deref(), Some("Centro B"));
}

#[test]
fn json_rows_skip_undecodable_entries() {
    let raw = r#"[
        {"id": 7, "tipo_atencion": "Odontologia - Limpieza (L. 200)", "total": 200.5, "fecha_recibo": "2025-02-01T08:00:00Z"},
        {"id": "8", "attention_text": null, "total": null},
        {"no_id": true}
    ]"#;
    let records = read_records(raw.as_bytes(), Format::Json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "7");
    assert_eq!(records[0].amount_total, Some(Decimal::new(2005, 1)));
    assert_eq!(
        records[0].date,
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(8, 0, 0)
    );
    assert_eq!(records[1].attention_text, "");
    assert_eq!(records[1].amount_total, None);
}

#[test]
fn json_lines_tolerate_blank_and_broken_lines() {
    let raw = "{\"id\": 1, \"total\": \"L. 1,250.00\"}\n\n{broken\n{\"id\": 2, \"total\": 15}\n";
    let records = read_records(raw.as_bytes(), Format::JsonLines).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].amount_total, Some(Decimal::new(125000, 2)));
    assert_eq!(records[1].amount_total, Some(Decimal::from(15)));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("recibos.xlsx");
    fs::write(&path, "").unwrap();
    assert!(matches!(load_records(&path), Err(DeskError::UnknownFormat(_))));
}

#[test]
fn health_unit_narrowing_drops_other_units() {
    let raw = r#"[{"id": 1, "unidad_salud": "Centro A"}, {"id": 2, "unidad_salud": "Centro B"}, {"id": 3}]"#;
    let records = read_records(raw.as_bytes(), Format::Json).unwrap();
    let kept = for_health_unit(records, "Centro A");
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "1");
}

#[test]
fn csv_cells_keep_their_exact_text() {
    let raw = "id,numero_recibo,nombre_paciente,tipo_atencion,total\n\
               00042,007,Ana,Gratis - Partos (L. 0),0\n\
               43,008,true,Odontologia - Consulta (L. 20),20\n\
               ,009,Sin Id,Gratis - Partos (L. 0),0\n";
    let records = read_records(raw.as_bytes(), Format::Csv).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "00042");
    assert_eq!(records[0].receipt_number.as_deref(), Some("007"));
    assert_eq!(records[1].id, "43");
    assert_eq!(records[1].patient_name.as_deref(), Some("true"));
    assert_eq!(records[1].amount_total, Some(Decimal::from(20)));
}
