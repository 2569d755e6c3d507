use super::traits::ConfigSection;
use crate::error::SignalDeskError;
use serde::{Deserialize, Serialize};

/// Indicators a pipeline can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Rsi,
    Macd,
    MaCross,
    EmaCross,
    Bollinger,
    Vwap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Applied in this order
    pub enabled: Vec<IndicatorKind>,

    pub rsi_length: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,

    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,

    pub sma_short: usize,
    pub sma_long: usize,

    pub ema_short: usize,
    pub ema_long: usize,

    pub bb_length: usize,
    pub bb_std: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            enabled: vec![IndicatorKind::Rsi, IndicatorKind::Macd, IndicatorKind::MaCross],
            rsi_length: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            sma_short: 50,
            sma_long: 200,
            ema_short: 12,
            ema_long: 26,
            bb_length: 20,
            bb_std: 2.0,
        }
    }
}

impl ConfigSection for IndicatorConfig {
    fn section_name() -> &'static str {
        "indicators"
    }

    fn validate(&self) -> Result<(), SignalDeskError> {
        let windows = [
            ("rsi_length", self.rsi_length),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("sma_short", self.sma_short),
            ("sma_long", self.sma_long),
            ("ema_short", self.ema_short),
            ("ema_long", self.ema_long),
            ("bb_length", self.bb_length),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(SignalDeskError::Configuration(format!(
                "{} must be at least 1",
                name
            )));
        }
        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
            || self.rsi_oversold > self.rsi_overbought
        {
            return Err(SignalDeskError::Configuration(
                "RSI thresholds must satisfy 0 <= oversold <= overbought <= 100".to_string(),
            ));
        }
        if !self.bb_std.is_finite() || self.bb_std < 0.0 {
            return Err(SignalDeskError::Configuration(
                "bb_std must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
