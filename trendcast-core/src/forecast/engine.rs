//! Fit, then extrapolate `horizon` steps past the last bar.
//!
//! Offset `k` (1-based) gets position `last_i + k` and the date reached by
//! `k` applications of the configured [`DateStep`], so positions and dates
//! always advance together.

use chrono::NaiveDate;
use serde::Serialize;

use super::step::DateStep;
use super::trend::LinearTrend;
use crate::domain::{ForecastPoint, HistoricalSeries};
use crate::error::PipelineError;

/// Upper bound on the up-front allocation for forecast points.
const MAX_PREALLOC: usize = 4096;

/// Fitted trend plus the points it produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extrapolation {
    pub trend: LinearTrend,
    pub points: Vec<ForecastPoint>,
}

/// Forecast `horizon` closes after the end of `series`.
pub fn forecast(
    series: &HistoricalSeries,
    horizon: usize,
    step: DateStep,
) -> Result<Vec<ForecastPoint>, PipelineError> {
    extrapolate(series, horizon, step).map(|e| e.points)
}

/// Like [`forecast`], but also returns the fitted trend.
pub fn extrapolate(
    series: &HistoricalSeries,
    horizon: usize,
    step: DateStep,
) -> Result<Extrapolation, PipelineError> {
    if horizon == 0 {
        return Err(PipelineError::InvalidHorizon);
    }

    let trend = LinearTrend::fit(&series.closes())?;
    tracing::debug!(
        symbol = series.symbol(),
        slope = trend.slope,
        intercept = trend.intercept,
        n = trend.n_observations,
        "fitted linear trend"
    );

    // fit() succeeded, so the series has at least two bars.
    let mut date = series
        .last_date()
        .ok_or(PipelineError::InsufficientData {
            required: super::MIN_FIT_POINTS,
            actual: 0,
        })?;
    let last_position = trend.last_position();

    // Every step advances at least one day.
    let days_left = (NaiveDate::MAX - date).num_days();
    if i64::try_from(horizon).map_or(true, |h| h > days_left) {
        return Err(PipelineError::DateOutOfRange { date });
    }

    let mut points = Vec::with_capacity(horizon.min(MAX_PREALLOC));
    for k in 1..=horizon {
        date = step
            .next(date)
            .ok_or(PipelineError::DateOutOfRange { date })?;
        points.push(ForecastPoint::new(date, trend.predict_at(last_position + k)));
    }

    Ok(Extrapolation { trend, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBar;

    fn series(closes: &[f64]) -> HistoricalSeries {
        // Consecutive weekdays starting Monday 2024-01-01.
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut bars = Vec::new();
        for &close in closes {
            bars.push(PriceBar::new(date, close));
            date = DateStep::Weekday.next(date).unwrap();
        }
        HistoricalSeries::new("AAPL", bars)
    }

    #[test]
    fn perfect_line_extrapolates_exactly() {
        let hist = series(&[100.0, 102.0, 104.0, 106.0, 108.0]);
        let points = forecast(&hist, 3, DateStep::CalendarDay).unwrap();
        let values: Vec<f64> = points.iter().map(|p| p.predicted_close).collect();
        assert_eq!(values.len(), 3);
        for (got, want) in values.iter().zip([110.0, 112.0, 114.0]) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn calendar_dates_follow_last_bar() {
        // Last bar is Friday 2024-01-05.
        let hist = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let points = forecast(&hist, 3, DateStep::CalendarDay).unwrap();
        let dates: Vec<String> = points.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-06", "2024-01-07", "2024-01-08"]);
    }

    #[test]
    fn weekday_dates_skip_weekend_but_positions_stay_consecutive() {
        let hist = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let points = forecast(&hist, 2, DateStep::Weekday).unwrap();
        assert_eq!(points[0].date.to_string(), "2024-01-08");
        assert_eq!(points[1].date.to_string(), "2024-01-09");
        assert!((points[0].predicted_close - 6.0).abs() < 1e-9);
        assert!((points[1].predicted_close - 7.0).abs() < 1e-9);
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let hist = series(&[1.0, 2.0]);
        assert!(matches!(
            forecast(&hist, 0, DateStep::CalendarDay),
            Err(PipelineError::InvalidHorizon)
        ));
    }

    #[test]
    fn single_bar_is_insufficient() {
        let hist = series(&[1.0]);
        assert!(matches!(
            forecast(&hist, 5, DateStep::CalendarDay),
            Err(PipelineError::InsufficientData { actual: 1, .. })
        ));
    }

    #[test]
    fn extrapolation_exposes_trend() {
        let hist = series(&[10.0, 20.0, 30.0]);
        let result = extrapolate(&hist, 1, DateStep::CalendarDay).unwrap();
        assert!((result.trend.slope - 10.0).abs() < 1e-9);
        assert_eq!(result.points.len(), 1);
    }

    fn series_ending_at(last: NaiveDate) -> HistoricalSeries {
        let first = last.pred_opt().unwrap();
        HistoricalSeries::new(
            "AAPL",
            vec![PriceBar::new(first, 1.0), PriceBar::new(last, 2.0)],
        )
    }

    #[test]
    fn step_past_calendar_end_is_date_out_of_range() {
        let last = NaiveDate::MAX.pred_opt().unwrap();
        let hist = series_ending_at(last);

        let points = forecast(&hist, 1, DateStep::CalendarDay).unwrap();
        assert_eq!(points[0].date, NaiveDate::MAX);

        match forecast(&hist, 2, DateStep::CalendarDay) {
            Err(PipelineError::DateOutOfRange { date }) => assert_eq!(date, last),
            other => panic!("expected DateOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn weekday_step_at_calendar_end_is_date_out_of_range() {
        let hist = series_ending_at(NaiveDate::MAX);
        assert!(matches!(
            forecast(&hist, 1, DateStep::Weekday),
            Err(PipelineError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn huge_horizon_is_date_out_of_range() {
        let hist = series(&[1.0, 2.0, 3.0]);
        for horizon in [usize::MAX, usize::MAX / 2, 200_000_000] {
            match forecast(&hist, horizon, DateStep::CalendarDay) {
                Err(PipelineError::DateOutOfRange { date }) => {
                    assert_eq!(date.to_string(), "2024-01-03");
                }
                other => panic!("horizon {horizon}: expected DateOutOfRange, got {other:?}"),
            }
        }
    }

    #[test]
    fn deterministic_across_calls() {
        let hist = series(&[101.3, 99.8, 103.2, 104.9, 102.1, 108.4]);
        let a = forecast(&hist, 10, DateStep::Weekday).unwrap();
        let b = forecast(&hist, 10, DateStep::Weekday).unwrap();
        assert_eq!(a, b);
    }
}
