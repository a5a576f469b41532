// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::ingest::{
    csv_reader, parse_br_amount, parse_statement_date, ColumnMap, DateOrder, ReadOptions,
};
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs::File;
use std::io::Read;

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub rows: usize,
    pub issues: Vec<(String, String)>,
}

impl DoctorReport {
    fn push(&mut self, issue: &str, detail: String) {
        self.issues.push((issue.to_string(), detail));
    }

    pub fn count(&self, issue: &str) -> usize {
        self.issues.iter().filter(|(i, _)| i == issue).count()
    }
}

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let path = m
        .get_one::<String>("path")
        .map(|s| s.trim())
        .context("path missing")?;
    let order = m
        .get_one::<String>("date_format")
        .map(|s| s.parse::<DateOrder>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();
    let file = File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let report = diagnose(file, order)?;

    if report.issues.is_empty() {
        println!(
            "doctor: no issues found in {} rows ({} dates)",
            report.rows, order
        );
    } else {
        let rows = report
            .issues
            .into_iter()
            .map(|(issue, detail)| vec![issue, detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Validate a statement against one date order without building transactions.
pub fn diagnose<R: Read>(rdr: R, order: DateOrder) -> Result<DoctorReport> {
    let date_shape = Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$")?;
    let opts = ReadOptions {
        date_order: order,
        ..ReadOptions::default()
    };
    let mut rdr = csv_reader(rdr, &opts);
    let mut report = DoctorReport::default();

    let cols = match ColumnMap::resolve(rdr.headers()?) {
        Ok(cols) => cols,
        Err(Error::MissingColumn { column, accepted }) => {
            report.push("missing_column", format!("{} (accepted: {})", column, accepted));
            return Ok(report);
        }
        Err(e) => return Err(e.into()),
    };

    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = idx + 2;
        report.rows += 1;

        let date_raw = rec.get(cols.date).unwrap_or("").trim();
        if !date_shape.is_match(date_raw) {
            report.push("date_shape", format!("line {}: '{}'", line, date_raw));
        } else if parse_statement_date(date_raw, order).is_none() {
            if parse_statement_date(date_raw, order.other()).is_some() {
                report.push(
                    "date_order",
                    format!("line {}: '{}' only parses as {}", line, date_raw, order.other()),
                );
            } else {
                report.push("bad_date", format!("line {}: '{}'", line, date_raw));
            }
        }

        let amount_raw = rec.get(cols.amount).unwrap_or("");
        if parse_br_amount(amount_raw).is_none() {
            report.push("bad_amount", format!("line {}: '{}'", line, amount_raw));
        }
    }
    Ok(report)
}
