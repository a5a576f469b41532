// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types for the statement pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required column '{column}' (accepted headers: {accepted})")]
    MissingColumn {
        column: &'static str,
        accepted: String,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid forecast horizon {0}, expected 1-12 months")]
    InvalidHorizon(u32),

    #[error("Forecast model error: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, Error>;
