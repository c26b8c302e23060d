//! Neon-on-charcoal palette and the styles built from it.
//!
//! - **Accent**: electric cyan (focus, historical series)
//! - **Forecast**: neon orange (extrapolated values)
//! - **Positive / Negative**: neon green / hot pink (trend direction)
//! - **Muted**: steel blue (hints, axes, secondary text)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const FORECAST: Color = Color::Rgb(255, 140, 0);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn forecast() -> Style {
    Style::default().fg(FORECAST)
}

pub fn warning() -> Style {
    Style::default().fg(FORECAST)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

/// Highlighted row or field.
pub fn selected() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Green for a rising trend, pink for a falling one.
pub fn slope_color(slope: f64) -> Color {
    if slope >= 0.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_colors() {
        assert_eq!(slope_color(0.5), POSITIVE);
        assert_eq!(slope_color(0.0), POSITIVE);
        assert_eq!(slope_color(-0.1), NEGATIVE);
    }

    #[test]
    fn border_follows_focus() {
        assert_eq!(panel_border(true).fg, Some(ACCENT));
        assert_eq!(panel_border(false).fg, Some(MUTED));
    }
}
