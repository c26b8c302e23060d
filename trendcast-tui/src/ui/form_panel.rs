//! Sidebar: request form plus run settings.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, FormField};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Request ")
        .title_style(theme::panel_title(true));

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for field in FormField::ALL {
        let is_active = field == app.form.active;
        let value = app.form.value(field, &app.symbols);
        let shown = match field {
            FormField::Symbol => format!("< {value} >"),
            _ => value,
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>8}: ", field.label()),
                if is_active { theme::accent_bold() } else { theme::muted() },
            ),
            Span::styled(
                shown,
                if is_active { theme::selected() } else { theme::text() },
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:>8}: ", "Step"), theme::muted()),
        Span::styled(app.date_step.label(), theme::neutral()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{:>8}: ", "Source"), theme::muted()),
        Span::styled(app.provider_name().to_string(), theme::neutral()),
    ]));

    if let Some(report) = &app.report {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Last run", theme::accent_bold())));
        lines.push(Line::from(vec![
            Span::styled(format!("{:>8}: ", "Bars"), theme::muted()),
            Span::styled(report.historical.len().to_string(), theme::text()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!("{:>8}: ", "Slope"), theme::muted()),
            Span::styled(
                format!("{:+.4}", report.trend.slope),
                ratatui::style::Style::default().fg(theme::slope_color(report.trend.slope)),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[j/k]field [h/l]adjust", theme::muted())));
    lines.push(Line::from(Span::styled("[i]edit [Enter]run", theme::muted())));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
