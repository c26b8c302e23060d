//! Overlay widgets: welcome, field editor, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to TrendCast ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Pick a symbol with h / l",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Move to the dates and horizon with j / k, press i to type",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Press Enter to fetch history and fit the trend",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  4. Switch views with 1-5",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Single-field text editor.
pub fn render_edit(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(60, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(
            " Edit {} [Enter]apply [Esc]cancel ",
            app.form.active.label()
        ))
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let hint = match app.form.active {
        crate::app::FormField::Symbol => "One of the configured symbols",
        crate::app::FormField::Horizon => "Positive number of steps",
        _ => "YYYY-MM-DD",
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(hint, theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(app.edit_buffer.as_str(), theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];
    f.render_widget(Paragraph::new(text), inner);
}

/// Error history overlay, newest first.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().skip(app.error_scroll) {
        if lines.len() >= inner.height as usize {
            break;
        }
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
