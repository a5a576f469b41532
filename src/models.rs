// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

/// Spending category, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Supermercado,
    Restaurante,
    Transporte,
    Saude,
    Lazer,
    Educacao,
    Moradia,
    Servicos,
    Telefonia,
    Outros,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Supermercado,
        Category::Restaurante,
        Category::Transporte,
        Category::Saude,
        Category::Lazer,
        Category::Educacao,
        Category::Moradia,
        Category::Servicos,
        Category::Telefonia,
        Category::Outros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Supermercado => "Supermercado",
            Category::Restaurante => "Restaurante",
            Category::Transporte => "Transporte",
            Category::Saude => "Saude",
            Category::Lazer => "Lazer",
            Category::Educacao => "Educacao",
            Category::Moradia => "Moradia",
            Category::Servicos => "Servicos",
            Category::Telefonia => "Telefonia",
            Category::Outros => "Outros",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Direction {
    Expense,
    Income,
}

impl Direction {
    /// Negative amounts are expenses; zero and missing amounts count as income.
    pub fn from_amount(amount: Option<Decimal>) -> Self {
        match amount {
            Some(a) if a < Decimal::ZERO => Direction::Expense,
            _ => Direction::Income,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Expense => "Despesa",
            Direction::Income => "Receita",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar month bucket, stored as the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth(date - Days::new(u64::from(date.day0())))
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(YearMonth)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(YearMonth)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One normalized statement row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub description: String,
    pub direction: Direction,
    pub category: Category,
}

impl Transaction {
    /// Category starts as `Outros` until the categorizer runs.
    pub fn new(date: Option<NaiveDate>, amount: Option<Decimal>, description: String) -> Self {
        Transaction {
            date,
            amount,
            description,
            direction: Direction::from_amount(amount),
            category: Category::Outros,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    pub fn year_month(&self) -> Option<YearMonth> {
        self.date.map(YearMonth::from_date)
    }
}
