//! Series merge: history + forecast → one date-ordered series.
//!
//! Steps, in order: concatenate, dedupe by date with history taking
//! precedence, sort ascending, drop rows whose close is not finite.
//! Nothing is truncated here.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{CombinedRow, CombinedSeries, ForecastPoint, HistoricalSeries, Origin};

pub fn merge(historical: &HistoricalSeries, forecast: &[ForecastPoint]) -> CombinedSeries {
    let mut by_date: BTreeMap<NaiveDate, CombinedRow> = BTreeMap::new();

    for bar in historical.bars() {
        by_date.entry(bar.date).or_insert(CombinedRow {
            date: bar.date,
            close: bar.close,
            origin: Origin::Historical,
        });
    }

    let mut collisions = 0usize;
    for point in forecast {
        if by_date.contains_key(&point.date) {
            collisions += 1;
            continue;
        }
        by_date.insert(
            point.date,
            CombinedRow {
                date: point.date,
                close: point.predicted_close,
                origin: Origin::Forecast,
            },
        );
    }

    let total = by_date.len();
    let rows: Vec<CombinedRow> = by_date
        .into_values()
        .filter(|row| row.close.is_finite())
        .collect();

    let non_finite = total - rows.len();
    if collisions > 0 || non_finite > 0 {
        tracing::warn!(
            symbol = historical.symbol(),
            collisions,
            non_finite,
            "merge discarded rows"
        );
    }

    CombinedSeries::from_sorted_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBar;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn history() -> HistoricalSeries {
        HistoricalSeries::new(
            "AAPL",
            vec![
                PriceBar::new(date(3), 190.0),
                PriceBar::new(date(4), 191.5),
                PriceBar::new(date(5), 193.0),
            ],
        )
    }

    #[test]
    fn empty_forecast_returns_history_unchanged() {
        let hist = history();
        let combined = merge(&hist, &[]);
        assert_eq!(combined.len(), hist.len());
        for (row, bar) in combined.rows().iter().zip(hist.bars()) {
            assert_eq!(row.date, bar.date);
            assert_eq!(row.close, bar.close);
            assert_eq!(row.origin, Origin::Historical);
        }
    }

    #[test]
    fn forecast_appended_in_date_order() {
        let combined = merge(
            &history(),
            &[
                ForecastPoint::new(date(7), 196.0),
                ForecastPoint::new(date(6), 194.5),
            ],
        );
        let dates: Vec<_> = combined.rows().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(3), date(4), date(5), date(6), date(7)]);
        assert_eq!(combined.forecast_count(), 2);
    }

    #[test]
    fn historical_value_wins_on_collision() {
        let combined = merge(&history(), &[ForecastPoint::new(date(5), 999.0)]);
        assert_eq!(combined.len(), 3);
        let row = combined.get(date(5)).unwrap();
        assert_eq!(row.close, 193.0);
        assert_eq!(row.origin, Origin::Historical);
    }

    #[test]
    fn non_finite_predictions_are_dropped() {
        let combined = merge(
            &history(),
            &[
                ForecastPoint::new(date(6), f64::NAN),
                ForecastPoint::new(date(7), f64::INFINITY),
                ForecastPoint::new(date(8), 197.0),
            ],
        );
        assert_eq!(combined.len(), 4);
        assert_eq!(combined.rows().last().unwrap().date, date(8));
    }

    #[test]
    fn duplicate_forecast_dates_keep_first() {
        let combined = merge(
            &history(),
            &[
                ForecastPoint::new(date(6), 1.0),
                ForecastPoint::new(date(6), 2.0),
            ],
        );
        assert_eq!(combined.get(date(6)).unwrap().close, 1.0);
    }
}
