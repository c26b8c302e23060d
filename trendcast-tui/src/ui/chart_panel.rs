//! Panels 3 and 4: combined line chart and combined bar chart.

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use trendcast_core::domain::DATE_FORMAT;
use trendcast_core::{CombinedRow, Origin};

use crate::app::AppState;
use crate::theme;
use crate::ui::render_empty;

/// Each bar is one column wide with a one-column gap.
const BAR_WIDTH: u16 = 1;
const BAR_GAP: u16 = 1;

pub fn render_combined(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(report) = &app.report else {
        render_empty(f, area);
        return;
    };
    let rows = report.combined.rows();
    if rows.is_empty() {
        render_empty(f, area);
        return;
    }

    let historical: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.origin == Origin::Historical)
        .map(|(i, r)| (i as f64, r.close))
        .collect();

    // Start the forecast line at the last historical point so the two connect.
    let mut forecast: Vec<(f64, f64)> = historical.last().copied().into_iter().collect();
    forecast.extend(
        rows.iter()
            .enumerate()
            .filter(|(_, r)| r.origin == Origin::Forecast)
            .map(|(i, r)| (i as f64, r.close)),
    );

    let datasets = vec![
        Dataset::default()
            .name("historical")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&historical),
        Dataset::default()
            .name("forecast")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::FORECAST))
            .graph_type(GraphType::Line)
            .data(&forecast),
    ];

    let closes = report.combined.closes();
    render_line_chart(f, area, datasets, &closes, rows[0].date, rows[rows.len() - 1].date);
}

/// Shared line chart frame: x is the row index, y the close.
pub(crate) fn render_line_chart(
    f: &mut Frame,
    area: Rect,
    datasets: Vec<Dataset>,
    closes: &[f64],
    first: NaiveDate,
    last: NaiveDate,
) {
    let [y_min, y_max] = y_bounds(closes);
    let x_max = closes.len().saturating_sub(1) as f64;
    let y_mid = (y_min + y_max) / 2.0;

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first.format(DATE_FORMAT).to_string(), theme::muted()),
                    Span::styled(last.format(DATE_FORMAT).to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Close", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_mid:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

pub fn render_bars(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(report) = &app.report else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let max_bars = (chunks[1].width / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let values = bar_values(report.combined.rows(), max_bars);
    let (Some(first), Some(last)) = (values.first(), values.last()) else {
        render_empty(f, area);
        return;
    };

    let header = Line::from(vec![
        Span::styled(
            format!(
                "{} .. {} ({} of {} rows)  ",
                first.date.format(DATE_FORMAT),
                last.date.format(DATE_FORMAT),
                values.len(),
                report.combined.len()
            ),
            theme::muted(),
        ),
        Span::styled("■ historical ", theme::accent()),
        Span::styled("■ forecast", theme::forecast()),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let bars: Vec<Bar> = values
        .iter()
        .map(|v| {
            let style = match v.origin {
                Origin::Historical => theme::accent(),
                Origin::Forecast => theme::forecast(),
            };
            Bar::default()
                .value(v.cents)
                .text_value(String::new())
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP);
    f.render_widget(chart, chunks[1]);
}

/// One bar of the combined bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarValue {
    pub date: NaiveDate,
    /// Close in cents; bar heights are integers and never negative.
    pub cents: u64,
    pub origin: Origin,
}

/// The last `max_bars` rows as bar values.
pub fn bar_values(rows: &[CombinedRow], max_bars: usize) -> Vec<BarValue> {
    let start = rows.len().saturating_sub(max_bars);
    rows[start..]
        .iter()
        .map(|r| BarValue {
            date: r.date,
            cents: (r.close * 100.0).round().max(0.0) as u64,
            origin: r.origin,
        })
        .collect()
}

/// Y-axis bounds with 5% padding. A flat series gets a unit band.
pub fn y_bounds(values: &[f64]) -> [f64; 2] {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let padding = (max - min) * 0.05;
    if padding > 0.0 {
        [min - padding, max + padding]
    } else {
        [min - 1.0, max + 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, close: f64, origin: Origin) -> CombinedRow {
        CombinedRow {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            close,
            origin,
        }
    }

    #[test]
    fn bar_values_keep_the_tail_in_cents() {
        let rows = vec![
            row(1, 10.0, Origin::Historical),
            row(2, 10.556, Origin::Historical),
            row(3, -3.0, Origin::Forecast),
        ];
        let values = bar_values(&rows, 2);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].cents, 1056);
        assert_eq!(values[1].cents, 0);
        assert_eq!(values[1].origin, Origin::Forecast);
        assert_eq!(bar_values(&rows, 10).len(), 3);
    }

    #[test]
    fn y_bounds_pad_range() {
        let [lo, hi] = y_bounds(&[100.0, 200.0]);
        assert!((lo - 95.0).abs() < 1e-9);
        assert!((hi - 205.0).abs() < 1e-9);
    }

    #[test]
    fn y_bounds_flat_and_empty() {
        assert_eq!(y_bounds(&[5.0, 5.0]), [4.0, 6.0]);
        assert_eq!(y_bounds(&[]), [0.0, 1.0]);
    }
}
