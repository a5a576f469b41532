// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expense forecasting.
//!
//! The model is a collaborator behind [`Forecaster`] / [`ForecastModel`]; this
//! module only shapes the monthly series going in and the predictions coming
//! out. [`LinearTrendForecaster`] is the default model.

use crate::error::{Error, Result};
use crate::models::YearMonth;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// Fewer distinct observations than this skips the forecast.
pub const MIN_OBSERVATIONS: usize = 3;

/// Number of months to forecast, 1 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Horizon(u32);

impl Horizon {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 12;

    pub fn new(months: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&months) {
            Ok(Horizon(months))
        } else {
            Err(Error::InvalidHorizon(months))
        }
    }

    pub fn months(&self) -> u32 {
        self.0
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Horizon(3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
}

pub trait Forecaster {
    type Model: ForecastModel;

    fn fit(&self, series: &[SeriesPoint]) -> Result<Self::Model>;
}

pub trait ForecastModel {
    /// One point per requested date, in the same order.
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastPoint>>;
}

/// Ordinary least squares over days elapsed since the first observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTrendForecaster;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrendModel {
    origin: NaiveDate,
    intercept: f64,
    slope: f64,
}

impl LinearTrendModel {
    pub fn slope_per_day(&self) -> f64 {
        self.slope
    }

    fn x(&self, date: NaiveDate) -> f64 {
        (date - self.origin).num_days() as f64
    }
}

impl Forecaster for LinearTrendForecaster {
    type Model = LinearTrendModel;

    fn fit(&self, series: &[SeriesPoint]) -> Result<LinearTrendModel> {
        let origin = series
            .iter()
            .map(|p| p.date)
            .min()
            .ok_or_else(|| Error::Model("empty series".into()))?;
        if series.len() < 2 {
            return Err(Error::Model(format!(
                "need at least 2 observations, got {}",
                series.len()
            )));
        }

        let n = series.len() as f64;
        let xs: Vec<f64> = series
            .iter()
            .map(|p| (p.date - origin).num_days() as f64)
            .collect();
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = series.iter().map(|p| p.value).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, p) in xs.iter().zip(series) {
            sxx += (x - mean_x) * (x - mean_x);
            sxy += (x - mean_x) * (p.value - mean_y);
        }
        if sxx == 0.0 {
            return Err(Error::Model("all observations share one date".into()));
        }

        let slope = sxy / sxx;
        Ok(LinearTrendModel {
            origin,
            intercept: mean_y - slope * mean_x,
            slope,
        })
    }
}

impl ForecastModel for LinearTrendModel {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastPoint>> {
        Ok(dates
            .iter()
            .map(|d| ForecastPoint {
                date: *d,
                predicted: self.intercept + self.slope * self.x(*d),
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthForecast {
    pub month: YearMonth,
    pub predicted: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub horizon: Horizon,
    /// Observed `(month start, expense magnitude)` pairs.
    pub actual: Vec<(NaiveDate, Decimal)>,
    /// Predictions over the observed and future dates.
    pub fitted: Vec<ForecastPoint>,
    pub months: Vec<MonthForecast>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Ready(Forecast),
    InsufficientData { observed: usize },
}

impl ForecastOutcome {
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            ForecastOutcome::Ready(f) => Some(f),
            ForecastOutcome::InsufficientData { .. } => None,
        }
    }
}

/// Predicted expense magnitude as money. Negative or non-finite predictions
/// read as zero.
pub fn to_money(value: f64) -> Decimal {
    Decimal::from_f64(value.max(0.0))
        .unwrap_or(Decimal::ZERO)
        .round_dp(2)
}

/// Month-end dates of the `horizon` months following `last`'s month.
pub fn future_month_ends(last: NaiveDate, horizon: Horizon) -> Result<Vec<NaiveDate>> {
    let out_of_range = || Error::Model(format!("forecast dates after {} out of range", last));
    let mut month = YearMonth::from_date(last);
    let mut dates = Vec::with_capacity(horizon.months() as usize);
    for _ in 0..horizon.months() {
        month = month.succ().ok_or_else(out_of_range)?;
        dates.push(month.last_day().ok_or_else(out_of_range)?);
    }
    Ok(dates)
}

pub fn forecast_expenses<F: Forecaster>(
    forecaster: &F,
    history: &[(NaiveDate, Decimal)],
    horizon: Horizon,
) -> Result<ForecastOutcome> {
    let observed: BTreeSet<NaiveDate> = history.iter().map(|(d, _)| *d).collect();
    let Some(last) = observed.iter().next_back().copied() else {
        warn!("no expense history, skipping forecast");
        return Ok(ForecastOutcome::InsufficientData { observed: 0 });
    };
    if observed.len() < MIN_OBSERVATIONS {
        warn!(
            observed = observed.len(),
            required = MIN_OBSERVATIONS,
            "not enough expense history for a forecast"
        );
        return Ok(ForecastOutcome::InsufficientData {
            observed: observed.len(),
        });
    }

    let mut actual = history.to_vec();
    actual.sort_by_key(|(d, _)| *d);
    let series: Vec<SeriesPoint> = actual
        .iter()
        .map(|(date, value)| SeriesPoint {
            date: *date,
            value: value.to_f64().unwrap_or(0.0),
        })
        .collect();

    let model = forecaster.fit(&series)?;

    let h = horizon.months() as usize;
    let timeline: Vec<NaiveDate> = observed
        .iter()
        .copied()
        .chain(future_month_ends(last, horizon)?)
        .collect();
    let fitted = model.predict(&timeline)?;
    if fitted.len() < h {
        return Err(Error::Model(format!(
            "model returned {} points for {} dates",
            fitted.len(),
            timeline.len()
        )));
    }

    let mut by_month: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for p in &fitted[fitted.len() - h..] {
        let bucket = by_month
            .entry(YearMonth::from_date(p.date))
            .or_insert(Decimal::ZERO);
        *bucket = bucket.saturating_add(to_money(p.predicted));
    }
    let months: Vec<MonthForecast> = by_month
        .into_iter()
        .map(|(month, predicted)| MonthForecast { month, predicted })
        .collect();
    let total = months
        .iter()
        .fold(Decimal::ZERO, |acc, m| acc.saturating_add(m.predicted));

    info!(horizon = h, %total, "expense forecast ready");
    Ok(ForecastOutcome::Ready(Forecast {
        horizon,
        actual,
        fitted,
        months,
        total,
    }))
}
