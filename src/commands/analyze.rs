// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forecast::{Horizon, LinearTrendForecaster};
use crate::ingest::DateOrder;
use crate::pipeline::{self, AnalysisOptions, Dashboard};
use crate::report::TerminalRenderer;
use crate::utils::maybe_print_json;
use anyhow::{Context, Result};
use std::fs::File;
use std::io;

pub const NO_FILE_PROMPT: &str =
    "No statement given. Pass a ';'-separated CSV with --path to start the analysis.";

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let Some(dashboard) = run(m)? else {
        println!("{}", NO_FILE_PROMPT);
        return Ok(());
    };
    if !maybe_print_json(json_flag, &dashboard)? {
        let mut renderer = TerminalRenderer::new(io::stdout().lock());
        dashboard.render(&mut renderer)?;
    }
    Ok(())
}

pub fn options(m: &clap::ArgMatches) -> Result<AnalysisOptions> {
    let defaults = AnalysisOptions::default();
    let horizon = match m.get_one::<u32>("horizon") {
        Some(h) => Horizon::new(*h)?,
        None => defaults.horizon,
    };
    let date_order = m
        .get_one::<String>("date_format")
        .map(|s| s.parse::<DateOrder>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(defaults.date_order);
    let tail = m.get_one::<usize>("tail").copied().unwrap_or(defaults.tail);
    Ok(AnalysisOptions {
        horizon,
        date_order,
        tail,
        ..defaults
    })
}

/// `None` when no statement path was given.
pub fn run(m: &clap::ArgMatches) -> Result<Option<Dashboard>> {
    let Some(path) = m
        .get_one::<String>("path")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    else {
        return Ok(None);
    };
    let opts = options(m)?;
    let file = File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let dashboard = pipeline::analyze(file, &opts, &LinearTrendForecaster)
        .with_context(|| format!("Analyze statement {}", path))?;
    Ok(Some(dashboard))
}
