//! Panel 5: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-5", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "Enter", "Run the forecast for the current form");
    key(&mut lines, "e", "Open error history");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Request form");
    key(&mut lines, "j / k", "Next / previous field");
    key(&mut lines, "h / l", "Cycle symbol, shift date by a day, or change horizon");
    key(&mut lines, "H / L", "Shift date by 30 days or horizon by 10");
    key(&mut lines, "i", "Type a value for the current field");
    lines.push(Line::from(""));

    section(&mut lines, "Panels");
    key(&mut lines, "History", "Historical closes for the requested window");
    key(&mut lines, "Forecast Table", "Last <horizon> rows of history + forecast");
    key(&mut lines, "Combined", "History (cyan) and forecast (orange) as one line");
    key(&mut lines, "Bars", "Combined closes as bars, most recent that fit");
    lines.push(Line::from(""));

    section(&mut lines, "Notes");
    key(&mut lines, "End date", "Exclusive: the last bar is the day before");
    key(&mut lines, "Trend", "Ordinary least squares on the row index");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
