//! DailyRecord — one trading day's forecast-vs-actual data point.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Shown in place of a missing headline.
pub const HEADLINE_FALLBACK: &str = "No headline available";

/// Shown in place of a missing improvement value.
pub const IMPROVEMENT_FALLBACK: &str = "N/A";

/// One trading day as returned by `GET /results`.
///
/// Numeric fields are parsed leniently: a JSON number, a numeric string,
/// `null` or a missing key are all accepted, and anything that is not a
/// number ends up as `NaN`. Downstream code treats `NaN` as "unavailable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub open_today: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub close_yesterday: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub real_move_pct: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub forecasted_pct: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub calculated_pct: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub average_pct: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub confidence_level: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub sentiment_score: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub market_impact_score: f64,
    #[serde(default)]
    pub volatility_indicator: Option<Volatility>,
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub improvement: Option<f64>,
}

impl DailyRecord {
    /// A record for `date` with every numeric field unavailable.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            open_today: f64::NAN,
            close_yesterday: f64::NAN,
            real_move_pct: f64::NAN,
            forecasted_pct: f64::NAN,
            calculated_pct: f64::NAN,
            average_pct: f64::NAN,
            confidence_level: f64::NAN,
            sentiment_score: f64::NAN,
            market_impact_score: f64::NAN,
            volatility_indicator: None,
            correct: false,
            headline: None,
            improvement: None,
        }
    }

    /// Headline text, or [`HEADLINE_FALLBACK`] when absent or blank.
    pub fn headline_or_fallback(&self) -> &str {
        match self.headline.as_deref() {
            Some(h) if !h.trim().is_empty() => h,
            _ => HEADLINE_FALLBACK,
        }
    }

    /// Improvement formatted for display, or [`IMPROVEMENT_FALLBACK`].
    pub fn improvement_display(&self) -> String {
        match self.improvement {
            Some(v) if v.is_finite() => format!("{v:.2}"),
            _ => IMPROVEMENT_FALLBACK.to_string(),
        }
    }

    /// The `{date}` path segment for the summary endpoint.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Volatility indicator: the live API sends a label ("High", "Low", ...),
/// older feeds send a numeric level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Volatility {
    Level(f64),
    Label(String),
}

impl Volatility {
    pub fn level(&self) -> Option<f64> {
        match self {
            Volatility::Level(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volatility::Level(v) if v.is_finite() => write!(f, "{v}"),
            Volatility::Level(_) => f.write_str("n/a"),
            Volatility::Label(s) => f.write_str(s),
        }
    }
}

/// Display unit of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Percent,
    Currency,
    Plain,
}

/// Every numeric field a delta can be taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    OpenToday,
    CloseYesterday,
    RealMovePct,
    ForecastedPct,
    CalculatedPct,
    AveragePct,
    ConfidenceLevel,
    SentimentScore,
    MarketImpactScore,
    VolatilityIndicator,
    Improvement,
}

impl NumericField {
    pub const ALL: [NumericField; 11] = [
        NumericField::OpenToday,
        NumericField::CloseYesterday,
        NumericField::RealMovePct,
        NumericField::ForecastedPct,
        NumericField::CalculatedPct,
        NumericField::AveragePct,
        NumericField::ConfidenceLevel,
        NumericField::SentimentScore,
        NumericField::MarketImpactScore,
        NumericField::VolatilityIndicator,
        NumericField::Improvement,
    ];

    /// Field value on `record`, `None` when absent or NaN.
    pub fn value(self, record: &DailyRecord) -> Option<f64> {
        let raw = match self {
            NumericField::OpenToday => record.open_today,
            NumericField::CloseYesterday => record.close_yesterday,
            NumericField::RealMovePct => record.real_move_pct,
            NumericField::ForecastedPct => record.forecasted_pct,
            NumericField::CalculatedPct => record.calculated_pct,
            NumericField::AveragePct => record.average_pct,
            NumericField::ConfidenceLevel => record.confidence_level,
            NumericField::SentimentScore => record.sentiment_score,
            NumericField::MarketImpactScore => record.market_impact_score,
            NumericField::VolatilityIndicator => {
                return record.volatility_indicator.as_ref().and_then(Volatility::level)
            }
            NumericField::Improvement => return record.improvement.filter(|v| v.is_finite()),
        };
        raw.is_finite().then_some(raw)
    }

    /// Wire name, identical to the JSON key.
    pub fn key(self) -> &'static str {
        match self {
            NumericField::OpenToday => "open_today",
            NumericField::CloseYesterday => "close_yesterday",
            NumericField::RealMovePct => "real_move_pct",
            NumericField::ForecastedPct => "forecasted_pct",
            NumericField::CalculatedPct => "calculated_pct",
            NumericField::AveragePct => "average_pct",
            NumericField::ConfidenceLevel => "confidence_level",
            NumericField::SentimentScore => "sentiment_score",
            NumericField::MarketImpactScore => "market_impact_score",
            NumericField::VolatilityIndicator => "volatility_indicator",
            NumericField::Improvement => "improvement",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericField::OpenToday => "Open Today",
            NumericField::CloseYesterday => "Close Yesterday",
            NumericField::RealMovePct => "Real Move",
            NumericField::ForecastedPct => "Forecasted",
            NumericField::CalculatedPct => "Calculated",
            NumericField::AveragePct => "Average Forecast",
            NumericField::ConfidenceLevel => "Confidence",
            NumericField::SentimentScore => "Sentiment",
            NumericField::MarketImpactScore => "Market Impact",
            NumericField::VolatilityIndicator => "Volatility",
            NumericField::Improvement => "Improvement",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            NumericField::OpenToday | NumericField::CloseYesterday => Unit::Currency,
            NumericField::RealMovePct
            | NumericField::ForecastedPct
            | NumericField::CalculatedPct
            | NumericField::AveragePct
            | NumericField::ConfidenceLevel => Unit::Percent,
            NumericField::SentimentScore
            | NumericField::MarketImpactScore
            | NumericField::VolatilityIndicator
            | NumericField::Improvement => Unit::Plain,
        }
    }
}

// ─── Lenient numeric parsing ────────────────────────────────────────

fn nan() -> f64 {
    f64::NAN
}

fn coerce(value: Option<Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce(Option::<Value>::deserialize(deserializer)?))
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    if matches!(raw, None | Some(Value::Null)) {
        return Ok(None);
    }
    Ok(Some(coerce(raw)))
}
