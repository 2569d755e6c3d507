use super::traits::ConfigSection;
use crate::error::SignalDeskError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bar spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1h")]
    Hourly,
}

impl Interval {
    pub fn duration(&self) -> Duration {
        match self {
            Interval::Daily => Duration::days(1),
            Interval::Hourly => Duration::hours(1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Hourly => "1h",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Load bars from this CSV; the synthetic series is used when unset
    pub csv_path: Option<PathBuf>,
    pub ticker: String,
    pub periods: usize,
    pub interval: Interval,
    pub min_rows: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            ticker: "BTC-USD".to_string(),
            periods: 180,
            interval: Interval::Daily,
            min_rows: 1,
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), SignalDeskError> {
        if self.periods == 0 {
            return Err(SignalDeskError::Configuration(
                "periods must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}
