//! Colour tokens for the dashboard.
//!
//! Palette:
//! - **Accent**: cyan (focus, titles)
//! - **Positive**: green (up moves, correct forecasts, precise bars)
//! - **Negative**: red (down moves, wrong forecasts)
//! - **Forecast**: blue (forecast line, imprecise bars)
//! - **Warning**: orange (threshold line, warnings)
//! - **Muted**: gray (captions, hints)

use ratatui::style::{Color, Modifier, Style};

use ai4vt_core::Direction;

pub const ACCENT: Color = Color::Rgb(0, 215, 255);
pub const POSITIVE: Color = Color::Rgb(34, 197, 94);
pub const NEGATIVE: Color = Color::Rgb(239, 68, 68);
pub const FORECAST: Color = Color::Rgb(59, 130, 246);
pub const REAL: Color = Color::Rgb(29, 78, 216);
pub const WARNING: Color = Color::Rgb(249, 115, 22);
pub const MUTED: Color = Color::Rgb(140, 140, 150);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn value_bold() -> Style {
    text().add_modifier(Modifier::BOLD)
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

pub fn selected_row() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

/// Colour for a direction badge or signed cell.
pub fn direction(dir: Direction) -> Style {
    match dir {
        Direction::Up => positive(),
        Direction::Down => negative(),
        Direction::Flat => accent(),
        Direction::Unavailable => muted(),
    }
}

pub fn market_dot(open: bool) -> Style {
    if open {
        positive().add_modifier(Modifier::BOLD)
    } else {
        negative().add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_colours() {
        assert_eq!(direction(Direction::Up).fg, Some(POSITIVE));
        assert_eq!(direction(Direction::Down).fg, Some(NEGATIVE));
        assert_eq!(direction(Direction::Flat).fg, Some(ACCENT));
        assert_eq!(direction(Direction::Unavailable).fg, Some(MUTED));
    }

    #[test]
    fn border_follows_focus() {
        assert_eq!(panel_border(true).fg, Some(ACCENT));
        assert_eq!(panel_border(false).fg, Some(MUTED));
    }
}
