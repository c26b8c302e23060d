//! How forecast dates advance from the last historical date.
//!
//! `CalendarDay` reproduces plain day increments, so forecast dates may land
//! on weekends. `Weekday` skips Saturday and Sunday. Neither knows about
//! exchange holidays.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStep {
    #[default]
    CalendarDay,
    Weekday,
}

impl DateStep {
    /// The next date after `date`, or `None` past the end of the calendar.
    pub fn next(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateStep::CalendarDay => date.succ_opt(),
            DateStep::Weekday => {
                let mut next = date.succ_opt()?;
                while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
                    next = next.succ_opt()?;
                }
                Some(next)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateStep::CalendarDay => "calendar_day",
            DateStep::Weekday => "weekday",
        }
    }
}

impl fmt::Display for DateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DateStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calendar" | "calendar_day" | "calendar-day" | "day" => Ok(DateStep::CalendarDay),
            "weekday" | "weekdays" | "trading" | "trading_day" => Ok(DateStep::Weekday),
            other => Err(format!(
                "unknown date step '{other}'. Valid: calendar_day, weekday"
            )),
        }
    }
}
