// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::CategoryCatalog;
use crate::error::{DeskError, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("org.receiptdesk", "Receiptdesk", "receiptdesk"));

pub const CONFIG_ENV: &str = "RECEIPTDESK_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency_symbol: String,
    /// Only rows of this health unit are considered when set.
    pub health_unit: Option<String>,
    /// JSON catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "L.".to_string(),
            health_unit: None,
            catalog_path: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| DeskError::Settings(format!("{}: {}", path.display(), e)))
    }

    /// Resolves the settings file from an explicit path, `RECEIPTDESK_CONFIG`,
    /// or the platform config directory, in that order.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(p) => PathBuf::from(p),
                None => config_path()?,
            },
        };
        Self::load_from(&path)
    }

    pub fn catalog(&self) -> Result<CategoryCatalog> {
        match &self.catalog_path {
            Some(path) => CategoryCatalog::from_json_file(path),
            None => Ok(CategoryCatalog::default()),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        DeskError::Settings("Could not determine platform-specific config dir".into())
    })?;
    Ok(proj.config_dir().join("settings.json"))
}
