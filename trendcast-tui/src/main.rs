//! TrendCast TUI: request form, forecast table, line and bar charts.
//!
//! Panels:
//! 1. History: historical closes for the requested window
//! 2. Forecast Table: last `horizon` rows of the combined series
//! 3. Combined: history and forecast as one line chart
//! 4. Bars: combined closes as a bar chart
//! 5. Help: keyboard shortcuts
//!
//! Usage: `trendcast-tui [CONFIG_PATH]`. Logs go to `trendcast-tui.log`.

mod app;
mod input;
mod theme;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use trendcast_core::data::build_provider;
use trendcast_core::AppConfig;

use crate::app::AppState;

const LOG_FILE: &str = "trendcast-tui.log";

fn main() -> Result<()> {
    init_logging()?;

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    let provider = build_provider(&config.provider)?;
    let today = chrono::Local::now().date_naive();
    let mut app = AppState::new(&config, provider, today)?;
    tracing::info!(provider = app.provider_name(), symbols = config.symbols.len(), "tui started");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Logs go to a file so they never draw over the alternate screen.
fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("create {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Forecasts run inside handle_key, so a fetch blocks this loop
        // until the provider answers or times out.
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
