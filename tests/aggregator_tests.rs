// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fluxo::aggregator::{
    monthly_balance, monthly_expense, monthly_expense_magnitudes, monthly_income,
    summary_totals, yearly_by_category, yearly_by_direction, DirectionTotals,
};
use fluxo::categorizer::categorize_all;
use fluxo::models::{Category, Transaction, YearMonth};
use rust_decimal::Decimal;
use std::str::FromStr;

fn tx(date: Option<&str>, amount: Option<&str>, desc: &str) -> Transaction {
    Transaction::new(
        date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
        amount.map(|a| Decimal::from_str(a).unwrap()),
        desc.to_string(),
    )
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn sample() -> Vec<Transaction> {
    let mut txns = vec![
        tx(Some("2022-12-20"), Some("-45.00"), "Carrefour"),
        tx(Some("2023-01-05"), Some("-10.00"), "Uber"),
        tx(Some("2023-01-10"), Some("100.00"), "Salario"),
        tx(Some("2023-01-28"), Some("-5.50"), "Padaria"),
        tx(Some("2023-02-02"), Some("-20.00"), "Posto Shell"),
        tx(Some("2023-03-15"), Some("0.00"), "Estorno"),
        tx(None, Some("-7.00"), "Data ruim"),
        tx(Some("2023-03-20"), None, "Valor ruim"),
    ];
    categorize_all(&mut txns);
    txns
}

#[test]
fn monthly_balance_sums_all_amounts() {
    let balance = monthly_balance(&sample());
    let months: Vec<YearMonth> = balance.keys().copied().collect();
    assert_eq!(months, vec![ym(2022, 12), ym(2023, 1), ym(2023, 2), ym(2023, 3)]);
    assert_eq!(balance[&ym(2022, 12)], dec("-45.00"));
    assert_eq!(balance[&ym(2023, 1)], dec("84.50"));
    assert_eq!(balance[&ym(2023, 2)], dec("-20.00"));
    assert_eq!(balance[&ym(2023, 3)], dec("0"));
}

#[test]
fn monthly_income_and_expense_split_by_sign() {
    let txns = sample();
    let income = monthly_income(&txns);
    let expense = monthly_expense(&txns);

    assert_eq!(income.len(), 1);
    assert_eq!(income[&ym(2023, 1)], dec("100.00"));

    assert_eq!(expense[&ym(2023, 1)], dec("-15.50"));
    assert_eq!(expense[&ym(2023, 2)], dec("-20.00"));
    // The zero-valued March row lands in neither series.
    assert!(!expense.contains_key(&ym(2023, 3)));
    assert!(!income.contains_key(&ym(2023, 3)));
}

#[test]
fn monthly_totals_match_dated_amounts() {
    let txns = sample();
    let monthly: Decimal = monthly_balance(&txns).values().copied().sum();
    let dated: Decimal = txns
        .iter()
        .filter(|t| t.date.is_some())
        .filter_map(|t| t.amount)
        .sum();
    assert_eq!(monthly, dated);
}

#[test]
fn no_months_are_invented() {
    let txns = vec![
        tx(Some("2023-01-01"), Some("-1"), ""),
        tx(Some("2023-06-01"), Some("-1"), ""),
    ];
    assert_eq!(monthly_balance(&txns).len(), 2);
}

#[test]
fn yearly_direction_totals_are_zero_filled() {
    let by_year = yearly_by_direction(&sample());
    assert_eq!(
        by_year[&2022],
        DirectionTotals {
            expense: dec("-45.00"),
            income: Decimal::ZERO,
        }
    );
    assert_eq!(by_year[&2023].expense, dec("-35.50"));
    assert_eq!(by_year[&2023].income, dec("100.00"));
}

#[test]
fn yearly_category_matrix_covers_expenses_only() {
    let matrix = yearly_by_category(&sample());
    assert_eq!(matrix.years, vec![2022, 2023]);
    assert_eq!(
        matrix.categories,
        vec![
            Category::Supermercado,
            Category::Restaurante,
            Category::Transporte
        ]
    );
    assert_eq!(matrix.get(2022, Category::Supermercado), dec("-45.00"));
    assert_eq!(matrix.get(2023, Category::Transporte), dec("-30.00"));
    assert_eq!(matrix.get(2023, Category::Restaurante), dec("-5.50"));
    // Absent combinations read as zero.
    assert_eq!(matrix.get(2022, Category::Transporte), Decimal::ZERO);
    assert_eq!(
        matrix.series(Category::Supermercado),
        vec![dec("-45.00"), Decimal::ZERO]
    );
    // Income-only categories never appear.
    assert!(!matrix.categories.contains(&Category::Outros));
}

#[test]
fn summary_totals_include_undated_rows() {
    let totals = summary_totals(&sample());
    assert_eq!(totals.income, dec("100.00"));
    assert_eq!(totals.expense, dec("-87.50"));
    assert_eq!(totals.net, dec("12.50"));
}

#[test]
fn expense_magnitudes_are_positive_month_starts() {
    let series = monthly_expense_magnitudes(&sample());
    let first_of = |y, m| NaiveDate::from_ymd_opt(y, m, 1).unwrap();
    assert_eq!(
        series,
        vec![
            (first_of(2022, 12), dec("45.00")),
            (first_of(2023, 1), dec("15.50")),
            (first_of(2023, 2), dec("20.00")),
        ]
    );
}

#[test]
fn empty_input_gives_empty_aggregates() {
    let txns: Vec<Transaction> = Vec::new();
    assert!(monthly_balance(&txns).is_empty());
    assert!(yearly_by_direction(&txns).is_empty());
    assert!(yearly_by_category(&txns).is_empty());
    assert_eq!(summary_totals(&txns).net, Decimal::ZERO);
}
