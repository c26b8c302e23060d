//! Top-level UI layout: form sidebar, one main panel, status bar.

pub mod chart_panel;
pub mod form_panel;
pub mod help_panel;
pub mod history_panel;
pub mod overlays;
pub mod status_bar;
pub mod table_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

const SIDEBAR_WIDTH: u16 = 32;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(chunks[0]);

    form_panel::render(f, columns[0], app);
    draw_panel(f, columns[1], app);
    status_bar::render(f, chunks[1], app);

    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, columns[1]),
        Overlay::Edit => overlays::render_edit(f, columns[1], app),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[0], app),
        Overlay::None => {}
    }
}

fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::History => history_panel::render(f, inner, app),
        Panel::Table => table_panel::render(f, inner, app),
        Panel::Combined => chart_panel::render_combined(f, inner, app),
        Panel::Bars => chart_panel::render_bars(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Placeholder shown by data panels before the first successful run.
pub fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No forecast yet.", theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the form on the left and press Enter.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
