//! NYSE open/closed clock, evaluated in New York local time.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    Open,
    Closed,
}

impl MarketStatus {
    /// Regular session is 09:30 through 16:00 inclusive, Monday to Friday.
    /// Exchange holidays are not modelled.
    pub fn at(instant: DateTime<Utc>) -> Self {
        let ny = instant.with_timezone(&New_York);
        if matches!(ny.weekday(), Weekday::Sat | Weekday::Sun) {
            return MarketStatus::Closed;
        }
        let minutes = ny.hour() * 60 + ny.minute();
        if (9 * 60 + 30..=16 * 60).contains(&minutes) {
            MarketStatus::Open
        } else {
            MarketStatus::Closed
        }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    pub fn is_open(self) -> bool {
        self == MarketStatus::Open
    }

    pub fn label(self) -> &'static str {
        match self {
            MarketStatus::Open => "Market Open (NYSE)",
            MarketStatus::Closed => "Market Closed (NYSE)",
        }
    }
}
