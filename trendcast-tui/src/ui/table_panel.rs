//! Panel 2: the last `horizon` rows of the combined series.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use trendcast_core::domain::DATE_FORMAT;
use trendcast_core::Origin;

use crate::app::AppState;
use crate::theme;
use crate::ui::render_empty;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(report) = &app.report else {
        render_empty(f, area);
        return;
    };

    let header = Row::new(vec![
        Cell::from(Span::styled("Date", theme::accent_bold())),
        Cell::from(Span::styled("Close", theme::accent_bold())),
        Cell::from(Span::styled("Origin", theme::accent_bold())),
    ])
    .bottom_margin(1);

    let rows: Vec<Row> = report
        .table_rows()
        .iter()
        .map(|r| {
            let style = match r.origin {
                Origin::Historical => theme::text(),
                Origin::Forecast => theme::forecast(),
            };
            Row::new(vec![
                Cell::from(r.date.format(DATE_FORMAT).to_string()),
                Cell::from(format!("{:>10.2}", r.close)),
                Cell::from(r.origin.label()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths).header(header).column_spacing(2);
    f.render_widget(table, area);
}
