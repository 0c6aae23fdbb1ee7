// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod balance;
pub mod today;
pub mod catalog;
pub mod receipt;
pub mod exporter;
pub mod doctor;
pub mod patients;

use crate::catalog::CategoryCatalog;
use crate::config::Settings;
use crate::loader;
use crate::models::AttentionRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Settings and catalog shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Desk {
    pub settings: Settings,
    pub catalog: CategoryCatalog,
}

impl Desk {
    pub fn open(config: Option<&Path>) -> Result<Self> {
        let settings = Settings::load(config).context("Load settings")?;
        let catalog = settings.catalog().context("Load category catalog")?;
        Ok(Self::with_settings(settings, catalog))
    }

    pub fn with_settings(settings: Settings, catalog: CategoryCatalog) -> Self {
        Self { settings, catalog }
    }

    /// Rows from `--input`, narrowed to the configured health unit.
    pub fn load_records(&self, m: &clap::ArgMatches) -> Result<Vec<AttentionRecord>> {
        let path = m.get_one::<PathBuf>("input").context("--input is required")?;
        let records = loader::load_records(path)
            .with_context(|| format!("Read receipts from {}", path.display()))?;
        Ok(match &self.settings.health_unit {
            Some(unit) => loader::for_health_unit(records, unit),
            None => records,
        })
    }

    pub fn money(&self, d: &rust_decimal::Decimal) -> String {
        crate::utils::fmt_money(d, &self.settings.currency_symbol)
    }
}
