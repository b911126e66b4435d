use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// A single OHLC bar, as returned by the market-data provider.
///
/// ```json
/// {
///     "time": "2024-05-01T13:30:00Z",
///     "open": 169.58,
///     "high": 172.71,
///     "low": 169.11,
///     "close": 169.30,
///     "volume": 50383100
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PriceRow {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Price rows, ordered by `time` ascending. May be empty.
pub type PriceSeries = Vec<PriceRow>;

// -------------------------------------------------------------------------------------------------

/// Historical shows daily bars over a [`Period`]; intraday shows 5-minute bars over one day.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Historical,
    Intraday,
}

impl DisplayMode {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Historical => "Historical",
            DisplayMode::Intraday => "Intraday",
        }
    }

    /// The range & interval to request from the provider.
    pub fn window(&self, period: Period) -> FetchWindow {
        match self {
            DisplayMode::Historical => FetchWindow {
                range: period.as_str(),
                interval: "1d",
            },
            DisplayMode::Intraday => FetchWindow {
                range: "1d",
                interval: "5m",
            },
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Historical => write!(f, "historical"),
            DisplayMode::Intraday => write!(f, "intraday"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "historical" => Ok(DisplayMode::Historical),
            "intraday" => Ok(DisplayMode::Intraday),
            other => Err(format!("unknown display mode \"{other}\"")),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum ChartKind {
    Line,
    Candlestick,
}

// -------------------------------------------------------------------------------------------------

/// Lookback periods offered by the dashboard.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Period {
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[default]
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::FiveDays,
        Period::OneMonth,
        Period::SixMonths,
        Period::OneYear,
        Period::FiveYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::FiveYears => "5y",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::FiveDays => "5 Days",
            Period::OneMonth => "1 Month",
            Period::SixMonths => "6 Months",
            Period::OneYear => "1 Year",
            Period::FiveYears => "5 Years",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Period::ALL
            .into_iter()
            .find(|period| period.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown period \"{s}\""))
    }
}

/// Query parameters for the provider's chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub range: &'static str,
    pub interval: &'static str,
}
