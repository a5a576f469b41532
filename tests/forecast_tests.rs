// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fluxo::error::{Error, Result};
use fluxo::forecast::{
    forecast_expenses, future_month_ends, ForecastModel, ForecastOutcome, ForecastPoint,
    Forecaster, Horizon, LinearTrendForecaster, SeriesPoint,
};
use fluxo::models::YearMonth;
use rust_decimal::Decimal;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Twelve month starts of 2023 with strictly increasing expenses.
fn rising_year() -> Vec<(NaiveDate, Decimal)> {
    (1..=12)
        .map(|m| (ymd(2023, m, 1), Decimal::from(90 + 10 * m)))
        .collect()
}

struct FixedModel {
    value: f64,
    date: Option<NaiveDate>,
}

impl ForecastModel for FixedModel {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastPoint>> {
        Ok(dates
            .iter()
            .map(|d| ForecastPoint {
                date: self.date.unwrap_or(*d),
                predicted: self.value,
            })
            .collect())
    }
}

/// Predicts `value` everywhere, optionally stamping every point with `date`.
struct FixedForecaster {
    value: f64,
    date: Option<NaiveDate>,
}

impl Forecaster for FixedForecaster {
    type Model = FixedModel;

    fn fit(&self, _series: &[SeriesPoint]) -> Result<FixedModel> {
        Ok(FixedModel {
            value: self.value,
            date: self.date,
        })
    }
}

struct UnreachableForecaster;

impl Forecaster for UnreachableForecaster {
    type Model = FixedModel;

    fn fit(&self, _series: &[SeriesPoint]) -> Result<FixedModel> {
        panic!("fit must not be called");
    }
}

#[test]
fn horizon_accepts_one_to_twelve() {
    assert_eq!(Horizon::default().months(), 3);
    assert_eq!(Horizon::new(1).unwrap().months(), 1);
    assert_eq!(Horizon::new(12).unwrap().months(), 12);
    assert!(matches!(Horizon::new(0), Err(Error::InvalidHorizon(0))));
    assert!(matches!(Horizon::new(13), Err(Error::InvalidHorizon(13))));
}

#[test]
fn future_dates_are_following_month_ends() {
    let dates = future_month_ends(ymd(2023, 12, 1), Horizon::new(3).unwrap()).unwrap();
    assert_eq!(
        dates,
        vec![ymd(2024, 1, 31), ymd(2024, 2, 29), ymd(2024, 3, 31)]
    );
}

#[test]
fn linear_trend_fits_a_line() {
    let series = vec![
        SeriesPoint { date: ymd(2023, 1, 1), value: 1.0 },
        SeriesPoint { date: ymd(2023, 1, 11), value: 2.0 },
        SeriesPoint { date: ymd(2023, 1, 21), value: 3.0 },
    ];
    let model = LinearTrendForecaster.fit(&series).unwrap();
    assert!((model.slope_per_day() - 0.1).abs() < 1e-9);

    let out = model.predict(&[ymd(2023, 1, 31)]).unwrap();
    assert_eq!(out.len(), 1);
    assert!((out[0].predicted - 4.0).abs() < 1e-9);
}

#[test]
fn linear_trend_rejects_degenerate_series() {
    let one = [SeriesPoint { date: ymd(2023, 1, 1), value: 1.0 }];
    assert!(matches!(LinearTrendForecaster.fit(&one), Err(Error::Model(_))));

    let same_day = [
        SeriesPoint { date: ymd(2023, 1, 1), value: 1.0 },
        SeriesPoint { date: ymd(2023, 1, 1), value: 2.0 },
    ];
    assert!(matches!(
        LinearTrendForecaster.fit(&same_day),
        Err(Error::Model(_))
    ));
    assert!(LinearTrendForecaster.fit(&[]).is_err());
}

#[test]
fn horizon_yields_one_point_per_future_month() {
    for h in [1, 3, 12] {
        let horizon = Horizon::new(h).unwrap();
        let outcome = forecast_expenses(&LinearTrendForecaster, &rising_year(), horizon).unwrap();
        let fc = outcome.forecast().expect("forecast expected");
        assert_eq!(fc.months.len(), h as usize);
        assert_eq!(fc.fitted.len(), 12 + h as usize);
        assert_eq!(fc.months[0].month, YearMonth::new(2024, 1).unwrap());
    }
}

#[test]
fn rising_history_forecasts_rising_expenses() {
    let outcome =
        forecast_expenses(&LinearTrendForecaster, &rising_year(), Horizon::new(3).unwrap())
            .unwrap();
    let fc = outcome.forecast().unwrap();
    let values: Vec<Decimal> = fc.months.iter().map(|m| m.predicted).collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", values);
    assert!(values[0] >= Decimal::from(200));

    let sum: Decimal = values.iter().sum();
    assert_eq!(fc.total, sum);
}

#[test]
fn two_months_is_insufficient_and_skips_the_model() {
    let history = vec![
        (ymd(2023, 1, 1), Decimal::from(100)),
        (ymd(2023, 2, 1), Decimal::from(120)),
    ];
    let outcome = forecast_expenses(&UnreachableForecaster, &history, Horizon::default()).unwrap();
    assert_eq!(outcome, ForecastOutcome::InsufficientData { observed: 2 });
    assert!(outcome.forecast().is_none());

    let empty = forecast_expenses(&UnreachableForecaster, &[], Horizon::default()).unwrap();
    assert_eq!(empty, ForecastOutcome::InsufficientData { observed: 0 });
}

#[test]
fn three_months_is_enough() {
    let history: Vec<_> = rising_year().into_iter().take(3).collect();
    let outcome = forecast_expenses(&LinearTrendForecaster, &history, Horizon::default()).unwrap();
    assert!(outcome.forecast().is_some());
}

#[test]
fn predictions_are_summed_per_month() {
    let forecaster = FixedForecaster {
        value: 50.0,
        date: None,
    };
    let outcome = forecast_expenses(&forecaster, &rising_year(), Horizon::new(3).unwrap()).unwrap();
    let fc = outcome.forecast().unwrap();
    assert!(fc
        .months
        .iter()
        .all(|m| m.predicted == Decimal::new(5000, 2)));
    assert_eq!(fc.total, Decimal::new(15000, 2));
}

#[test]
fn same_month_predictions_collapse_into_one_bucket() {
    let forecaster = FixedForecaster {
        value: 10.0,
        date: Some(ymd(2024, 1, 15)),
    };
    let outcome = forecast_expenses(&forecaster, &rising_year(), Horizon::new(3).unwrap()).unwrap();
    let fc = outcome.forecast().unwrap();
    assert_eq!(fc.months.len(), 1);
    assert_eq!(fc.months[0].month, YearMonth::new(2024, 1).unwrap());
    assert_eq!(fc.months[0].predicted, Decimal::from(30));
    assert_eq!(fc.total, Decimal::from(30));
}

#[test]
fn negative_predictions_floor_at_zero() {
    let forecaster = FixedForecaster {
        value: -5.0,
        date: None,
    };
    let outcome = forecast_expenses(&forecaster, &rising_year(), Horizon::new(2).unwrap()).unwrap();
    let fc = outcome.forecast().unwrap();
    assert!(fc.months.iter().all(|m| m.predicted == Decimal::ZERO));
    assert_eq!(fc.total, Decimal::ZERO);
}
