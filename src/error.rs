// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown format for '{}' (use .csv, .json or .jsonl)", .0.display())]
    UnknownFormat(PathBuf),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown subcategory '{1}' for category '{0}'")]
    UnknownSubcategory(String, String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, DeskError>;
