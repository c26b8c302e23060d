//! Keyboard input dispatch: overlays first, then global keys, then the form.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

const BIG_STEP: i64 = 30;
const HORIZON_BIG_STEP: i64 = 10;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Edit => {
            handle_edit_overlay(app, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(panel) = Panel::from_index(c as usize - '1' as usize) {
                app.active_panel = panel;
            }
        }
        KeyCode::Tab => {
            app.active_panel = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel.prev()
            } else {
                app.active_panel.next()
            };
        }
        KeyCode::BackTab => app.active_panel = app.active_panel.prev(),
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Enter => app.run_forecast(),
        KeyCode::Char('i') => app.begin_edit(),
        KeyCode::Char('j') | KeyCode::Down => app.form.active = app.form.active.next(),
        KeyCode::Char('k') | KeyCode::Up => app.form.active = app.form.active.prev(),
        KeyCode::Char('l') | KeyCode::Right => nudge(app, 1),
        KeyCode::Char('h') | KeyCode::Left => nudge(app, -1),
        KeyCode::Char('L') => nudge_big(app, 1),
        KeyCode::Char('H') => nudge_big(app, -1),
        _ => {}
    }
}

fn nudge(app: &mut AppState, delta: i64) {
    let symbols = app.symbols.clone();
    app.form.nudge(&symbols, delta);
}

fn nudge_big(app: &mut AppState, sign: i64) {
    let step = match app.form.active {
        crate::app::FormField::Horizon => HORIZON_BIG_STEP,
        _ => BIG_STEP,
    };
    nudge(app, sign * step);
}

fn handle_edit_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) => app.edit_buffer.push(c),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::app::FormField;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ready_app() -> AppState {
        let mut app = test_app(20);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.overlay, Overlay::None);
        app
    }

    #[test]
    fn welcome_dismissed_by_any_key() {
        let mut app = test_app(20);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn number_keys_switch_panels() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.active_panel, Panel::Bars);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_panel, Panel::Help);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_panel, Panel::Bars);
    }

    #[test]
    fn form_navigation_and_adjustment() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.form.value(FormField::Symbol, &app.symbols), "GOOGL");

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.form.active, FormField::Horizon);
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.form.horizon, "40");
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.form.horizon, "39");
    }

    #[test]
    fn typing_into_edit_overlay() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.overlay, Overlay::Edit);
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "2024-01-15".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.form.start, "2024-01-15");
    }

    #[test]
    fn escape_cancels_edit() {
        let mut app = ready_app();
        let before = app.form.start.clone();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.form.start, before);
    }

    #[test]
    fn enter_runs_forecast_and_errors_open_history() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Enter);
        assert!(app.report.is_some());

        app.form.horizon = "0".into();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.error_history.len(), 1);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn q_quits() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
