// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Desk;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &desk.catalog.entries())? {
        return Ok(());
    }
    let mut data = Vec::new();
    for entry in desk.catalog.entries() {
        for sub in &entry.subcategories {
            data.push(vec![entry.name.clone(), sub.label.clone(), desk.money(&sub.price)]);
        }
    }
    println!("{}", pretty_table(&["Attention type", "Service", "Price"], data));
    Ok(())
}
