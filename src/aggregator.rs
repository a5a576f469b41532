// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly and yearly roll-ups of categorized transactions.

use crate::models::{Category, Direction, Transaction, YearMonth};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub type MonthlySeries = BTreeMap<YearMonth, Decimal>;

/// Rows that can be placed in a month bucket.
fn dated(txns: &[Transaction]) -> impl Iterator<Item = (NaiveDate, Decimal, &Transaction)> {
    txns.iter().filter_map(|t| Some((t.date?, t.amount?, t)))
}

fn sum_by_month<F>(txns: &[Transaction], keep: F) -> MonthlySeries
where
    F: Fn(Decimal) -> bool,
{
    let mut map = MonthlySeries::new();
    for (date, amount, _) in dated(txns) {
        if keep(amount) {
            *map.entry(YearMonth::from_date(date)).or_insert(Decimal::ZERO) += amount;
        }
    }
    map
}

pub fn monthly_balance(txns: &[Transaction]) -> MonthlySeries {
    sum_by_month(txns, |_| true)
}

pub fn monthly_income(txns: &[Transaction]) -> MonthlySeries {
    sum_by_month(txns, |a| a > Decimal::ZERO)
}

pub fn monthly_expense(txns: &[Transaction]) -> MonthlySeries {
    sum_by_month(txns, |a| a < Decimal::ZERO)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub balance: MonthlySeries,
    pub income: MonthlySeries,
    pub expense: MonthlySeries,
}

impl MonthlyReport {
    pub fn build(txns: &[Transaction]) -> Self {
        MonthlyReport {
            balance: monthly_balance(txns),
            income: monthly_income(txns),
            expense: monthly_expense(txns),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectionTotals {
    pub expense: Decimal,
    pub income: Decimal,
}

/// Per-year sums by direction. Every year present carries both values.
pub fn yearly_by_direction(txns: &[Transaction]) -> BTreeMap<i32, DirectionTotals> {
    let mut map: BTreeMap<i32, DirectionTotals> = BTreeMap::new();
    for (date, amount, t) in dated(txns) {
        let entry = map.entry(date.year()).or_default();
        match t.direction {
            Direction::Expense => entry.expense += amount,
            Direction::Income => entry.income += amount,
        }
    }
    map
}

/// Expense totals per (year, category) over the years and categories present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryMatrix {
    pub years: Vec<i32>,
    pub categories: Vec<Category>,
    cells: BTreeMap<i32, BTreeMap<Category, Decimal>>,
}

impl CategoryMatrix {
    /// Absent combinations read as zero.
    pub fn get(&self, year: i32, category: Category) -> Decimal {
        self.cells
            .get(&year)
            .and_then(|row| row.get(&category))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// One value per year, in `years` order.
    pub fn series(&self, category: Category) -> Vec<Decimal> {
        self.years.iter().map(|y| self.get(*y, category)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

pub fn yearly_by_category(txns: &[Transaction]) -> CategoryMatrix {
    let mut cells: BTreeMap<i32, BTreeMap<Category, Decimal>> = BTreeMap::new();
    let mut categories = BTreeSet::new();
    for (date, amount, t) in dated(txns) {
        if amount >= Decimal::ZERO {
            continue;
        }
        categories.insert(t.category);
        *cells
            .entry(date.year())
            .or_default()
            .entry(t.category)
            .or_insert(Decimal::ZERO) += amount;
    }
    CategoryMatrix {
        years: cells.keys().copied().collect(),
        categories: categories.into_iter().collect(),
        cells,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Statement-wide totals by direction label. Undated rows are included.
pub fn summary_totals(txns: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for t in txns {
        let Some(amount) = t.amount else { continue };
        match t.direction {
            Direction::Income => totals.income += amount,
            Direction::Expense => totals.expense += amount,
        }
    }
    totals.net = totals.income + totals.expense;
    totals
}

/// `(first day of month, positive expense magnitude)` in chronological order.
pub fn monthly_expense_magnitudes(txns: &[Transaction]) -> Vec<(NaiveDate, Decimal)> {
    monthly_expense(txns)
        .into_iter()
        .map(|(ym, total)| (ym.first_day(), -total))
        .collect()
}
