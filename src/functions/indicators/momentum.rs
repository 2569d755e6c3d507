use crate::data::connectors::RequiredColumn;
use crate::error::{Result, SignalDeskError};
use crate::functions::{
    frame::{float_values, ohlcv_expr, set_signal_column, with_exprs},
    primitives::{diff, rolling_mean},
    signals::threshold_signals,
    traits::{IndicatorOutputs, Transform},
};
use crate::types::ScaleType;
use polars::prelude::*;

pub const RSI_COLUMN: &str = "RSI";
pub const RSI_SIGNAL_COLUMN: &str = "RSI_signal";

// --- RSI ---
pub struct RSI {
    pub length: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl RSI {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            oversold: 30.0,
            overbought: 70.0,
        }
    }

    pub fn with_thresholds(mut self, oversold: f64, overbought: f64) -> Self {
        self.oversold = oversold;
        self.overbought = overbought;
        self
    }

    /// RSI over closing prices using simple rolling averages of gains and
    /// losses. A window with no losses is pinned at 100.
    pub fn expr(&self, close: Expr) -> Result<Expr> {
        let delta = diff(close);
        let gains = (delta.clone() + delta.clone().abs()) / lit(2.0);
        let losses = (delta.clone().abs() - delta) / lit(2.0);

        let avg_gain = rolling_mean(gains, self.length)?;
        let avg_loss = rolling_mean(losses, self.length)?;

        Ok(when(avg_loss.clone().eq(lit(0.0)))
            .then(lit(100.0))
            .otherwise(lit(100.0) - lit(100.0) / (lit(1.0) + avg_gain / avg_loss)))
    }
}

impl Default for RSI {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Transform for RSI {
    fn name(&self) -> &'static str {
        "RSI"
    }

    fn ui_name(&self) -> &'static str {
        "Relative Strength Index"
    }

    fn outputs(&self) -> IndicatorOutputs {
        IndicatorOutputs {
            name: self.name().to_string(),
            indicator_columns: vec![RSI_COLUMN.to_string()],
            signal_column: Some(RSI_SIGNAL_COLUMN.to_string()),
            scale: ScaleType::Oscillator0_100,
        }
    }

    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        if self.oversold > self.overbought {
            return Err(SignalDeskError::InvalidParameter(format!(
                "RSI oversold threshold {} is above overbought threshold {}",
                self.oversold, self.overbought
            )));
        }
        let close = ohlcv_expr(df, RequiredColumn::Close)?;
        if df.height() <= self.length {
            log::warn!(
                "RSI({}): only {} bars, every value will be missing",
                self.length,
                df.height()
            );
        }

        let mut out = with_exprs(df, vec![self.expr(close)?.alias(RSI_COLUMN)])?;
        let rsi = float_values(&out, RSI_COLUMN)?;
        let signals = threshold_signals(&rsi, self.oversold, self.overbought);
        set_signal_column(&mut out, RSI_SIGNAL_COLUMN, &signals)?;
        log::debug!("RSI({}) applied to {} bars", self.length, out.height());
        Ok(out)
    }
}

/// Adds `RSI` and `RSI_signal` (Buy below 30, Sell above 70).
pub fn add_rsi(df: &DataFrame, length: usize) -> Result<DataFrame> {
    RSI::new(length).apply(df)
}
