// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Statement ingestion: header aliasing, locale-aware amount parsing and
//! fixed-format date parsing.

use crate::error::{Error, Result};
use crate::models::Transaction;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub const DATE_ALIASES: &[&str] = &["DATA", "Data"];
pub const AMOUNT_ALIASES: &[&str] = &["VALOR", "Valor"];
pub const DESCRIPTION_ALIASES: &[&str] = &["DESC", "Desc"];

/// Field order of the statement's date column. One order is used per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
    #[default]
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    pub fn format(&self) -> &'static str {
        match self {
            DateOrder::DayFirst => "%d/%m/%Y",
            DateOrder::MonthFirst => "%m/%d/%Y",
        }
    }

    pub fn other(&self) -> DateOrder {
        match self {
            DateOrder::DayFirst => DateOrder::MonthFirst,
            DateOrder::MonthFirst => DateOrder::DayFirst,
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dmy" => Ok(DateOrder::DayFirst),
            "mdy" => Ok(DateOrder::MonthFirst),
            other => Err(format!("Unknown date format '{}' (use dmy|mdy)", other)),
        }
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::DayFirst => f.write_str("dmy"),
            DateOrder::MonthFirst => f.write_str("mdy"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub delimiter: u8,
    pub date_order: DateOrder,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            delimiter: b';',
            date_order: DateOrder::default(),
        }
    }
}

/// Positions of the canonical columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub amount: usize,
    pub description: usize,
}

impl ColumnMap {
    pub fn resolve(headers: &StringRecord) -> Result<Self> {
        Ok(ColumnMap {
            date: find_column(headers, "Data", DATE_ALIASES)?,
            amount: find_column(headers, "Valor", AMOUNT_ALIASES)?,
            description: find_column(headers, "Desc", DESCRIPTION_ALIASES)?,
        })
    }
}

fn find_column(headers: &StringRecord, column: &'static str, aliases: &[&str]) -> Result<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&h.trim_start_matches('\u{feff}').trim()))
        .ok_or_else(|| Error::MissingColumn {
            column,
            accepted: aliases.join(", "),
        })
}

/// Largest accepted magnitude for one amount. Anything above reads as
/// unparseable so per-month and per-year sums stay far from `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Parse a Brazilian-formatted amount such as `-1.234,56`.
pub fn parse_br_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned
        .parse::<Decimal>()
        .ok()
        .filter(|amount| amount.abs() <= MAX_AMOUNT)
}

pub fn parse_statement_date(raw: &str, order: DateOrder) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), order.format()).ok()
}

pub fn csv_reader<R: Read>(rdr: R, opts: &ReadOptions) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(rdr)
}

/// Read and normalize every row of a statement. Fields that fail to parse
/// become `None`; only structural problems are errors.
pub fn read_statement<R: Read>(rdr: R, opts: &ReadOptions) -> Result<Vec<Transaction>> {
    let mut rdr = csv_reader(rdr, opts);
    let cols = ColumnMap::resolve(rdr.headers()?)?;

    let mut txns = Vec::new();
    let mut bad_dates = 0usize;
    let mut bad_amounts = 0usize;

    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let date_raw = rec.get(cols.date).unwrap_or("");
        let amount_raw = rec.get(cols.amount).unwrap_or("");
        let description = rec.get(cols.description).unwrap_or("").trim().to_string();

        let date = parse_statement_date(date_raw, opts.date_order);
        if date.is_none() {
            bad_dates += 1;
            debug!(row = idx + 1, value = date_raw, "unparseable date");
        }
        let amount = parse_br_amount(amount_raw);
        if amount.is_none() {
            bad_amounts += 1;
            debug!(row = idx + 1, value = amount_raw, "unparseable amount");
        }

        txns.push(Transaction::new(date, amount, description));
    }

    info!(
        rows = txns.len(),
        null_dates = bad_dates,
        null_amounts = bad_amounts,
        "statement loaded"
    );
    Ok(txns)
}

pub fn read_statement_path(path: impl AsRef<Path>, opts: &ReadOptions) -> Result<Vec<Transaction>> {
    let file = File::open(path.as_ref())?;
    read_statement(file, opts)
}
