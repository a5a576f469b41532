// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Table and chart specifications, and the renderers that draw them.
//!
//! Builders here turn aggregates into renderer-agnostic [`TableSpec`] and
//! [`ChartSpec`] values. [`TerminalRenderer`] prints them as comfy-table
//! tables; other front ends implement [`Renderer`].

use crate::aggregator::{CategoryMatrix, DirectionTotals, MonthlyReport, MonthlySeries, Totals};
use crate::error::Result;
use crate::forecast::{self, Forecast};
use crate::models::Transaction;
use crate::utils::{fmt_amount, fmt_money, pretty_table};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Group,
    Stack,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub points: Vec<(String, Decimal)>,
}

impl Series {
    fn new(name: &str, kind: SeriesKind, points: Vec<(String, Decimal)>) -> Self {
        Series {
            name: name.to_string(),
            kind,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub bar_mode: BarMode,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Warning,
}

pub trait Renderer {
    fn render_table(&mut self, table: &TableSpec) -> Result<()>;
    fn render_chart(&mut self, chart: &ChartSpec) -> Result<()>;
    fn render_notice(&mut self, level: Notice, message: &str) -> Result<()>;
}

/// Draws every table and chart as a text table.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        TerminalRenderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render_table(&mut self, table: &TableSpec) -> Result<()> {
        let headers: Vec<&str> = table.headers.iter().map(String::as_str).collect();
        writeln!(self.out, "{}", table.title)?;
        writeln!(self.out, "{}", pretty_table(&headers, table.rows.clone()))?;
        Ok(())
    }

    fn render_chart(&mut self, chart: &ChartSpec) -> Result<()> {
        // One row per x label, one column per series. Labels are ISO-like so
        // lexical order is chronological.
        let labels: BTreeSet<&str> = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(x, _)| x.as_str()))
            .collect();
        let lookup: Vec<BTreeMap<&str, &Decimal>> = chart
            .series
            .iter()
            .map(|s| s.points.iter().map(|(x, y)| (x.as_str(), y)).collect())
            .collect();

        let mut headers = vec![chart.x_title.as_str()];
        headers.extend(chart.series.iter().map(|s| s.name.as_str()));
        let rows = labels
            .iter()
            .map(|label| {
                let mut row = vec![label.to_string()];
                row.extend(
                    lookup
                        .iter()
                        .map(|m| m.get(label).map(|v| fmt_amount(v)).unwrap_or_default()),
                );
                row
            })
            .collect();

        writeln!(self.out, "{} [{}]", chart.title, chart.y_title)?;
        writeln!(self.out, "{}", pretty_table(&headers, rows))?;
        Ok(())
    }

    fn render_notice(&mut self, level: Notice, message: &str) -> Result<()> {
        match level {
            Notice::Info => writeln!(self.out, "{}", message)?,
            Notice::Warning => writeln!(self.out, "warning: {}", message)?,
        }
        Ok(())
    }
}

fn month_points(series: &MonthlySeries) -> Vec<(String, Decimal)> {
    series.iter().map(|(m, v)| (m.to_string(), *v)).collect()
}

pub fn monthly_chart(report: &MonthlyReport) -> ChartSpec {
    ChartSpec {
        title: "Saldo, Receita e Despesa Mensal".into(),
        x_title: "Ano/Mês".into(),
        y_title: "Valor (R$)".into(),
        bar_mode: BarMode::Group,
        series: vec![
            Series::new("Saldo Mensal", SeriesKind::Line, month_points(&report.balance)),
            Series::new("Receita", SeriesKind::Bar, month_points(&report.income)),
            Series::new("Despesa", SeriesKind::Bar, month_points(&report.expense)),
        ],
    }
}

pub fn direction_chart(by_year: &BTreeMap<i32, DirectionTotals>) -> ChartSpec {
    let expense = by_year.iter().map(|(y, t)| (y.to_string(), t.expense)).collect();
    let income = by_year.iter().map(|(y, t)| (y.to_string(), t.income)).collect();
    ChartSpec {
        title: "Total de Gastos por Tipo (Ano a Ano)".into(),
        x_title: "Ano".into(),
        y_title: "Valor (R$)".into(),
        bar_mode: BarMode::Group,
        series: vec![
            Series::new("Despesa", SeriesKind::Bar, expense),
            Series::new("Receita", SeriesKind::Bar, income),
        ],
    }
}

pub fn category_chart(matrix: &CategoryMatrix) -> ChartSpec {
    let series = matrix
        .categories
        .iter()
        .map(|cat| {
            let points = matrix
                .years
                .iter()
                .zip(matrix.series(*cat))
                .map(|(y, v)| (y.to_string(), v))
                .collect();
            Series::new(cat.as_str(), SeriesKind::Bar, points)
        })
        .collect();
    ChartSpec {
        title: "Total de Gastos por Categoria (Ano a Ano)".into(),
        x_title: "Ano".into(),
        y_title: "Valor (R$)".into(),
        bar_mode: BarMode::Stack,
        series,
    }
}

pub fn forecast_chart(fc: &Forecast) -> ChartSpec {
    let actual = fc
        .actual
        .iter()
        .map(|(d, v)| (d.to_string(), *v))
        .collect();
    let predicted = fc
        .fitted
        .iter()
        .map(|p| (p.date.to_string(), forecast::to_money(p.predicted)))
        .collect();
    ChartSpec {
        title: "Previsão de Despesas".into(),
        x_title: "Data".into(),
        y_title: "Despesa (R$)".into(),
        bar_mode: BarMode::Group,
        series: vec![
            Series::new("Despesa Real", SeriesKind::Line, actual),
            Series::new("Previsão", SeriesKind::Line, predicted),
        ],
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

/// The last `tail` rows of the categorized statement.
pub fn recent_table(txns: &[Transaction], tail: usize) -> TableSpec {
    let start = txns.len().saturating_sub(tail);
    let rows = txns[start..]
        .iter()
        .map(|t| {
            vec![
                t.date.map(|d| d.to_string()).unwrap_or_default(),
                t.amount.map(|a| fmt_amount(&a)).unwrap_or_default(),
                t.description.clone(),
                t.direction.label().to_string(),
                t.category.to_string(),
                t.year_month().map(|m| m.to_string()).unwrap_or_default(),
                t.year().map(|y| y.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    TableSpec {
        title: "Resumo do Extrato".into(),
        headers: headers(&["Data", "Valor", "Desc", "Tipo", "Categoria", "AnoMes", "Ano"]),
        rows,
    }
}

pub fn forecast_table(fc: &Forecast) -> TableSpec {
    let mut rows: Vec<Vec<String>> = fc
        .months
        .iter()
        .map(|m| vec![m.month.to_string(), fmt_money(&m.predicted)])
        .collect();
    rows.push(vec!["Total".into(), fmt_money(&fc.total)]);
    TableSpec {
        title: "Próximos meses previstos".into(),
        headers: headers(&["Mês", "Despesa Prevista"]),
        rows,
    }
}

pub fn summary_table(totals: &Totals) -> TableSpec {
    TableSpec {
        title: "Resumo Financeiro Total".into(),
        headers: headers(&["", "Valor"]),
        rows: vec![
            vec!["Total de Receitas".into(), fmt_money(&totals.income)],
            vec!["Total de Gastos".into(), fmt_money(&totals.expense)],
            vec!["Saldo Final".into(), fmt_money(&totals.net)],
        ],
    }
}
