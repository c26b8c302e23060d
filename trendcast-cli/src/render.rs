//! Plain-text rendering for the `forecast` command.

use std::io::Write;

use trendcast_core::domain::DATE_FORMAT;
use trendcast_core::{CombinedRow, CombinedSeries, ForecastReport};

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn format_summary(report: &ForecastReport) -> String {
    let hist = &report.historical;
    let mut out = String::new();
    out.push_str("=== Forecast ===\n");
    out.push_str(&format!("Symbol:         {}\n", report.request.symbol));
    out.push_str(&format!(
        "Period:         {} to {} (end exclusive)\n",
        report.request.start.format(DATE_FORMAT),
        report.request.end.format(DATE_FORMAT)
    ));
    if let (Some(first), Some(last)) = (hist.first_date(), hist.last_date()) {
        out.push_str(&format!(
            "History:        {} bars, {} to {}\n",
            hist.len(),
            first.format(DATE_FORMAT),
            last.format(DATE_FORMAT)
        ));
    }
    out.push_str(&format!(
        "Horizon:        {} ({})\n",
        report.request.horizon, report.date_step
    ));
    out.push_str(&format!(
        "Trend:          close = {:.4} + {:.4} * i\n",
        report.trend.intercept, report.trend.slope
    ));
    out
}

/// Fixed-width table of combined rows.
pub fn format_table(rows: &[CombinedRow]) -> String {
    let mut out = format!("{:<12} {:>12}  {}\n", "Date", "Close", "Origin");
    out.push_str(&"-".repeat(36));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:<12} {:>12.2}  {}\n",
            row.date.format(DATE_FORMAT).to_string(),
            row.close,
            row.origin.label()
        ));
    }
    out
}

/// One-line sparkline, at most `width` characters.
///
/// Longer inputs are bucketed and each bucket is drawn at its mean.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let buckets: Vec<f64> = if values.len() <= width {
        values.to_vec()
    } else {
        (0..width)
            .map(|b| {
                let lo = b * values.len() / width;
                let hi = ((b + 1) * values.len() / width).max(lo + 1);
                let chunk = &values[lo..hi];
                chunk.iter().sum::<f64>() / chunk.len() as f64
            })
            .collect()
    };

    let min = buckets.iter().copied().fold(f64::INFINITY, f64::min);
    let max = buckets.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let top = (SPARK_CHARS.len() - 1) as f64;

    buckets
        .iter()
        .map(|&v| {
            let level = if range > 0.0 {
                ((v - min) / range * top).round() as usize
            } else {
                0
            };
            SPARK_CHARS[level.min(SPARK_CHARS.len() - 1)]
        })
        .collect()
}

/// Write the combined series as `date,close,origin` CSV.
pub fn write_csv<W: Write>(series: &CombinedSeries, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in series.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
