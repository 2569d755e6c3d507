use super::traits::ConfigSection;
use crate::error::SignalDeskError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestingConfig {
    pub initial_capital: f64,
    pub signal_column: String,
    pub price_column: String,
}

impl Default for BacktestingConfig {
    fn default() -> Self {
        Self {
            initial_capital: 10000.0,
            signal_column: "MA_signal".to_string(),
            price_column: "Close".to_string(),
        }
    }
}

impl ConfigSection for BacktestingConfig {
    fn section_name() -> &'static str {
        "backtesting"
    }

    fn validate(&self) -> Result<(), SignalDeskError> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(SignalDeskError::Configuration(
                "Initial capital must be positive".to_string()
            ));
        }
        if self.signal_column.is_empty() || self.price_column.is_empty() {
            return Err(SignalDeskError::Configuration(
                "Backtest signal and price columns must be named".to_string()
            ));
        }
        Ok(())
    }
}
