use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLCV columns a price table may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredColumn {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl RequiredColumn {
    /// Canonical column name used after normalisation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::Volume => "Volume",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Open,
            Self::High,
            Self::Low,
            Self::Close,
            Self::Volume,
        ]
    }

    /// Open/High/Low/Close, the columns a candlestick needs
    pub fn ohlc() -> Vec<Self> {
        vec![Self::Open, Self::High, Self::Low, Self::Close]
    }

    /// Common alternative column names
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Open => vec!["Open", "open", "OPEN", "o"],
            Self::High => vec!["High", "high", "HIGH", "h"],
            Self::Low => vec!["Low", "low", "LOW", "l"],
            Self::Close => vec!["Close", "close", "CLOSE", "c"],
            Self::Volume => vec!["Volume", "volume", "VOLUME", "vol", "Vol", "v"],
        }
    }
}

/// Accepted names for the time column
pub const DATETIME_ALIASES: [&str; 7] =
    ["Date", "date", "Datetime", "datetime", "time", "timestamp", "Timestamp"];

/// Metadata about a loaded price table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub source: String,
    pub num_rows: usize,
    pub num_columns: usize,
    pub columns: Vec<String>,
    pub datetime_column: Option<String>,
    pub date_range: Option<(NaiveDateTime, NaiveDateTime)>,
    pub price_range: (f64, f64),  // (min, max) of Close
    pub volume_range: Option<(f64, f64)>,
}
