//! Qualitative direction of a signed change, and its text rendering.
//!
//! Colour coding lives in the presentation layer; this module only decides
//! which way a number points.

use serde::{Deserialize, Serialize};

use crate::domain::Unit;

/// Placeholder for a delta that cannot be computed.
pub const UNAVAILABLE: &str = "n/a";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Flat,
    Unavailable,
}

impl Direction {
    /// Direction of a delta. Zero is flat, a missing or NaN delta is unavailable.
    pub fn of(delta: Option<f64>) -> Self {
        match delta {
            Some(d) if d.is_nan() => Direction::Unavailable,
            Some(d) if d > 0.0 => Direction::Up,
            Some(d) if d < 0.0 => Direction::Down,
            Some(_) => Direction::Flat,
            None => Direction::Unavailable,
        }
    }

    /// Sign colouring for a plain value: strictly positive is up, anything
    /// else (zero included) is down.
    pub fn of_value(value: f64) -> Self {
        if value.is_nan() {
            Direction::Unavailable
        } else if value > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
            Direction::Flat => "►",
            Direction::Unavailable => "·",
        }
    }
}

/// Render a delta as `+1.25%`, `-0.50`, `+$0.75`, or [`UNAVAILABLE`].
pub fn format_delta(delta: Option<f64>, unit: Unit) -> String {
    let Some(d) = delta.filter(|d| d.is_finite()) else {
        return UNAVAILABLE.to_string();
    };
    let sign = if d >= 0.0 { "+" } else { "-" };
    let mag = d.abs();
    match unit {
        Unit::Percent => format!("{sign}{mag:.2}%"),
        Unit::Currency => format!("{sign}${mag:.2}"),
        Unit::Plain => format!("{sign}{mag:.2}"),
    }
}

/// Render a plain value in its unit: `0.57%`, `$119.10`, `6`.
pub fn format_value(value: Option<f64>, unit: Unit) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return UNAVAILABLE.to_string();
    };
    match unit {
        Unit::Percent => format!("{v:.2}%"),
        Unit::Currency => format!("${v:.2}"),
        Unit::Plain if v.fract() == 0.0 => format!("{v:.0}"),
        Unit::Plain => format!("{v:.2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_of_delta() {
        assert_eq!(Direction::of(Some(0.3)), Direction::Up);
        assert_eq!(Direction::of(Some(-0.3)), Direction::Down);
        assert_eq!(Direction::of(Some(0.0)), Direction::Flat);
        assert_eq!(Direction::of(Some(f64::NAN)), Direction::Unavailable);
        assert_eq!(Direction::of(None), Direction::Unavailable);
    }

    #[test]
    fn direction_of_value_treats_zero_as_down() {
        assert_eq!(Direction::of_value(0.1), Direction::Up);
        assert_eq!(Direction::of_value(0.0), Direction::Down);
        assert_eq!(Direction::of_value(-2.0), Direction::Down);
    }

    #[test]
    fn delta_formatting() {
        assert_eq!(format_delta(Some(1.254), Unit::Percent), "+1.25%");
        assert_eq!(format_delta(Some(-0.5), Unit::Plain), "-0.50");
        assert_eq!(format_delta(Some(0.0), Unit::Percent), "+0.00%");
        assert_eq!(format_delta(Some(-0.75), Unit::Currency), "-$0.75");
        assert_eq!(format_delta(None, Unit::Percent), "n/a");
        assert_eq!(format_delta(Some(f64::NAN), Unit::Percent), "n/a");
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(Some(119.1), Unit::Currency), "$119.10");
        assert_eq!(format_value(Some(0.57), Unit::Percent), "0.57%");
        assert_eq!(format_value(Some(6.0), Unit::Plain), "6");
        assert_eq!(format_value(Some(f64::NAN), Unit::Plain), "n/a");
    }
}
