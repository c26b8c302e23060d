//! Panel 1: historical closes as a line chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::chart_panel::render_line_chart;
use crate::ui::render_empty;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(report) = &app.report else {
        render_empty(f, area);
        return;
    };
    let hist = &report.historical;
    let (Some(first), Some(last)) = (hist.first_date(), hist.last_date()) else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let closes = hist.closes();
    let last_close = closes.last().copied().unwrap_or_default();
    let header = Line::from(vec![
        Span::styled(format!("{} ", hist.symbol()), theme::accent_bold()),
        Span::styled(format!("{} bars  last close ", hist.len()), theme::muted()),
        Span::styled(format!("{last_close:.2}"), theme::text()),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let data: Vec<(f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| (i as f64, c))
        .collect();
    let dataset = Dataset::default()
        .name("close")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    render_line_chart(f, chunks[1], vec![dataset], &closes, first, last);
}
