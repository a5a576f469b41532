// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{self, CategoryMatrix, DirectionTotals, MonthlyReport, Totals};
use crate::categorizer;
use crate::error::Result;
use crate::forecast::{self, ForecastOutcome, Forecaster, Horizon, MIN_OBSERVATIONS};
use crate::ingest::{self, DateOrder, ReadOptions};
use crate::models::Transaction;
use crate::report::{self, Notice, Renderer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;

/// Knobs for one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub horizon: Horizon,
    pub date_order: DateOrder,
    /// Rows shown in the recent-transactions table.
    pub tail: usize,
    pub delimiter: u8,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            horizon: Horizon::default(),
            date_order: DateOrder::default(),
            tail: 5,
            delimiter: b';',
        }
    }
}

impl AnalysisOptions {
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            delimiter: self.delimiter,
            date_order: self.date_order,
        }
    }
}

/// Everything one statement produces.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub transactions: Vec<Transaction>,
    #[serde(skip)]
    pub tail: usize,
    pub monthly: MonthlyReport,
    pub yearly_by_direction: BTreeMap<i32, DirectionTotals>,
    pub yearly_by_category: CategoryMatrix,
    pub forecast: ForecastOutcome,
    pub totals: Totals,
}

pub fn analyze_transactions<F: Forecaster>(
    mut transactions: Vec<Transaction>,
    opts: &AnalysisOptions,
    forecaster: &F,
) -> Result<Dashboard> {
    categorizer::categorize_all(&mut transactions);

    let monthly = MonthlyReport::build(&transactions);
    let history = aggregator::monthly_expense_magnitudes(&transactions);
    let forecast = forecast::forecast_expenses(forecaster, &history, opts.horizon)?;

    Ok(Dashboard {
        yearly_by_direction: aggregator::yearly_by_direction(&transactions),
        yearly_by_category: aggregator::yearly_by_category(&transactions),
        totals: aggregator::summary_totals(&transactions),
        tail: opts.tail,
        monthly,
        forecast,
        transactions,
    })
}

/// Ingest, categorize, aggregate and forecast one statement.
pub fn analyze<R: Read, F: Forecaster>(
    rdr: R,
    opts: &AnalysisOptions,
    forecaster: &F,
) -> Result<Dashboard> {
    let transactions = ingest::read_statement(rdr, &opts.read_options())?;
    analyze_transactions(transactions, opts, forecaster)
}

impl Dashboard {
    pub fn render<R: Renderer>(&self, out: &mut R) -> Result<()> {
        out.render_table(&report::recent_table(&self.transactions, self.tail))?;
        out.render_chart(&report::monthly_chart(&self.monthly))?;
        out.render_chart(&report::direction_chart(&self.yearly_by_direction))?;
        out.render_chart(&report::category_chart(&self.yearly_by_category))?;

        match &self.forecast {
            ForecastOutcome::Ready(fc) => {
                out.render_chart(&report::forecast_chart(fc))?;
                out.render_table(&report::forecast_table(fc))?;
            }
            ForecastOutcome::InsufficientData { observed } => {
                out.render_notice(
                    Notice::Warning,
                    &format!(
                        "Not enough data for an expense forecast ({} of {} months with expenses).",
                        observed, MIN_OBSERVATIONS
                    ),
                )?;
            }
        }

        out.render_table(&report::summary_table(&self.totals))?;
        Ok(())
    }
}
