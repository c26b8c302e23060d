//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. Forecasts run synchronously on the main thread
//! when the user presses Enter.

use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveDateTime};

use trendcast_core::data::{DataError, DataProvider, SymbolList};
use trendcast_core::domain::DATE_FORMAT;
use trendcast_core::{
    run_forecast, AppConfig, ConfigError, DateStep, ForecastReport, ForecastRequest,
    PipelineError, PipelineSettings,
};

pub const MAX_ERROR_HISTORY: usize = 50;

/// Which view is shown in the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    History,
    Table,
    Combined,
    Bars,
    Help,
}

impl Panel {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            Panel::History => 0,
            Panel::Table => 1,
            Panel::Combined => 2,
            Panel::Bars => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::History),
            1 => Some(Panel::Table),
            2 => Some(Panel::Combined),
            3 => Some(Panel::Bars),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::History => "History",
            Panel::Table => "Forecast Table",
            Panel::Combined => "Combined",
            Panel::Bars => "Bars",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::History)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::History)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Data,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn of(err: &PipelineError) -> Self {
        match err {
            PipelineError::InvalidRange { .. }
            | PipelineError::UnknownSymbol { .. }
            | PipelineError::InvalidHorizon
            | PipelineError::DateOutOfRange { .. } => ErrorCategory::Input,
            PipelineError::DataUnavailable { .. } | PipelineError::InsufficientData { .. } => {
                ErrorCategory::Data
            }
            PipelineError::Provider(e) => match e {
                DataError::NetworkUnreachable(_)
                | DataError::Timeout { .. }
                | DataError::RateLimited { .. }
                | DataError::Http { .. } => ErrorCategory::Network,
                DataError::ResponseFormatChanged(_)
                | DataError::SymbolNotFound { .. }
                | DataError::Io(_) => ErrorCategory::Data,
                DataError::Other(_) => ErrorCategory::Other,
            },
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Fields of the sidebar form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Symbol,
    Start,
    End,
    Horizon,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Symbol,
        FormField::Start,
        FormField::End,
        FormField::Horizon,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Symbol => "Symbol",
            FormField::Start => "Start",
            FormField::End => "End",
            FormField::Horizon => "Horizon",
        }
    }

    pub fn next(self) -> FormField {
        match self {
            FormField::Symbol => FormField::Start,
            FormField::Start => FormField::End,
            FormField::End => FormField::Horizon,
            FormField::Horizon => FormField::Horizon,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Symbol => FormField::Symbol,
            FormField::Start => FormField::Symbol,
            FormField::End => FormField::Start,
            FormField::Horizon => FormField::End,
        }
    }
}

/// Sidebar form. Dates and horizon are kept as text so the user can type
/// freely; they are parsed when the forecast runs.
#[derive(Debug, Clone)]
pub struct FormState {
    pub symbol_idx: usize,
    pub start: String,
    pub end: String,
    pub horizon: String,
    pub active: FormField,
}

impl FormState {
    pub fn new(start: NaiveDate, end: NaiveDate, horizon: usize) -> Self {
        Self {
            symbol_idx: 0,
            start: start.format(DATE_FORMAT).to_string(),
            end: end.format(DATE_FORMAT).to_string(),
            horizon: horizon.to_string(),
            active: FormField::Symbol,
        }
    }

    pub fn value(&self, field: FormField, symbols: &SymbolList) -> String {
        match field {
            FormField::Symbol => symbols.get(self.symbol_idx).unwrap_or("").to_string(),
            FormField::Start => self.start.clone(),
            FormField::End => self.end.clone(),
            FormField::Horizon => self.horizon.clone(),
        }
    }

    pub fn cycle_symbol(&mut self, symbols: &SymbolList, forward: bool) {
        let n = symbols.len();
        if n == 0 {
            return;
        }
        self.symbol_idx = if forward {
            (self.symbol_idx + 1) % n
        } else {
            (self.symbol_idx + n - 1) % n
        };
    }

    /// Shift the active date field by `days`, or the horizon by one step.
    /// Fields that do not parse are left alone.
    pub fn nudge(&mut self, symbols: &SymbolList, delta: i64) {
        match self.active {
            FormField::Symbol => self.cycle_symbol(symbols, delta > 0),
            FormField::Start => nudge_date(&mut self.start, delta),
            FormField::End => nudge_date(&mut self.end, delta),
            FormField::Horizon => {
                if let Ok(h) = self.horizon.trim().parse::<i64>() {
                    self.horizon = h.saturating_add(delta).max(1).to_string();
                }
            }
        }
    }

    /// Parse the form into a request.
    pub fn to_request(&self, symbols: &SymbolList) -> Result<ForecastRequest, String> {
        let symbol = symbols
            .get(self.symbol_idx)
            .ok_or_else(|| "no symbol selected".to_string())?;
        let start = parse_date(&self.start, "start")?;
        let end = parse_date(&self.end, "end")?;
        let horizon = self
            .horizon
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("horizon: expected a positive integer, got '{}'", self.horizon))?;
        Ok(ForecastRequest::new(symbol, start, end, horizon))
    }
}

fn parse_date(text: &str, field: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| format!("{field}: expected YYYY-MM-DD, got '{text}'"))
}

fn nudge_date(text: &mut String, days: i64) {
    let Ok(date) = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT) else {
        return;
    };
    if let Some(next) = date.checked_add_signed(chrono::Duration::days(days)) {
        *text = next.format(DATE_FORMAT).to_string();
    }
}

/// Modal overlays drawn over the main area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Edit,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Inputs
    pub form: FormState,
    pub edit_buffer: String,
    pub symbols: SymbolList,
    pub date_step: DateStep,
    provider: Box<dyn DataProvider>,

    // Last successful run
    pub report: Option<ForecastReport>,

    // Status and errors
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        provider: Box<dyn DataProvider>,
        today: NaiveDate,
    ) -> Result<Self, ConfigError> {
        let (start, end) = config.forecast.default_range(today)?;
        Ok(Self {
            active_panel: Panel::History,
            running: true,
            form: FormState::new(start, end, config.forecast.default_horizon),
            edit_buffer: String::new(),
            symbols: config.symbols.clone(),
            date_step: config.forecast.date_step,
            provider,
            report: None,
            status_message: None,
            error_history: VecDeque::with_capacity(MAX_ERROR_HISTORY),
            error_scroll: 0,
            overlay: Overlay::Welcome,
        })
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run the pipeline for the current form values.
    ///
    /// Failures land in the status bar and error history; the previous
    /// report is cleared so stale charts are never shown for new inputs.
    pub fn run_forecast(&mut self) {
        let request = match self.form.to_request(&self.symbols) {
            Ok(request) => request,
            Err(message) => {
                self.push_error(ErrorCategory::Input, message, "form".into());
                return;
            }
        };

        let settings = PipelineSettings {
            symbols: self.symbols.clone(),
            date_step: self.date_step,
        };
        match run_forecast(&request, self.provider.as_ref(), &settings) {
            Ok(report) => {
                self.set_status(format!(
                    "{}: {} bars, {} forecast points (slope {:+.4}/step)",
                    report.request.symbol,
                    report.historical.len(),
                    report.forecast.len(),
                    report.trend.slope
                ));
                self.report = Some(report);
            }
            Err(err) => {
                tracing::warn!(error = %err, symbol = %request.symbol, "forecast failed");
                let context = format!(
                    "{} {}..{} horizon {}",
                    request.symbol, request.start, request.end, request.horizon
                );
                self.report = None;
                self.push_error(ErrorCategory::of(&err), err.to_string(), context);
            }
        }
    }

    /// Open the edit overlay for the active field.
    pub fn begin_edit(&mut self) {
        self.edit_buffer = self.form.value(self.form.active, &self.symbols);
        self.overlay = Overlay::Edit;
    }

    /// Apply the edit buffer to the active field.
    pub fn commit_edit(&mut self) {
        let text = self.edit_buffer.trim().to_string();
        match self.form.active {
            FormField::Symbol => match self.symbols.position(&text) {
                Some(idx) => self.form.symbol_idx = idx,
                None => self.set_warning(format!("{} is not in the symbol list", text.to_uppercase())),
            },
            FormField::Start => self.form.start = text,
            FormField::End => self.form.end = text,
            FormField::Horizon => self.form.horizon = text,
        }
        self.edit_buffer.clear();
        self.overlay = Overlay::None;
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.overlay = Overlay::None;
    }

    /// Push an error to the history, capping at [`MAX_ERROR_HISTORY`].
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > MAX_ERROR_HISTORY {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
