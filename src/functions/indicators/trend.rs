use crate::data::connectors::RequiredColumn;
use crate::error::Result;
use crate::functions::{
    frame::{float_values, ohlcv_expr, set_signal_column, with_exprs},
    primitives::{ema, rolling_mean},
    signals::{comparison_signals, crossover_signals},
    traits::{IndicatorOutputs, Transform},
};
use crate::types::ScaleType;
use polars::prelude::*;

pub const MACD_SIGNAL_COLUMN: &str = "MACD_signal";
pub const SMA_SHORT_COLUMN: &str = "SMA_short";
pub const SMA_LONG_COLUMN: &str = "SMA_long";
pub const MA_SIGNAL_COLUMN: &str = "MA_signal";
pub const EMA_SHORT_COLUMN: &str = "EMA_short";
pub const EMA_LONG_COLUMN: &str = "EMA_long";
pub const EMA_SIGNAL_COLUMN: &str = "EMA_signal";

fn warn_if_inverted(name: &str, short: usize, long: usize) {
    if short >= long {
        log::warn!(
            "{}: short window {} is not shorter than long window {}",
            name,
            short,
            long
        );
    }
}

// --- MACD ---
pub struct MACD {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

/// MACD line, signal line and histogram expressions
pub struct MacdLines {
    pub macd: Expr,
    pub signal: Expr,
    pub histogram: Expr,
}

impl MACD {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    fn suffix(&self) -> String {
        format!("{}_{}_{}", self.fast_period, self.slow_period, self.signal_period)
    }

    pub fn line_column(&self) -> String {
        format!("MACD_{}", self.suffix())
    }

    pub fn signal_line_column(&self) -> String {
        format!("MACDs_{}", self.suffix())
    }

    pub fn histogram_column(&self) -> String {
        format!("MACDh_{}", self.suffix())
    }

    pub fn lines(&self, close: Expr) -> Result<MacdLines> {
        let ema_fast = ema(close.clone(), self.fast_period)?;
        let ema_slow = ema(close, self.slow_period)?;

        let macd = ema_fast - ema_slow;
        let signal = ema(macd.clone(), self.signal_period)?;
        let histogram = macd.clone() - signal.clone();

        Ok(MacdLines {
            macd,
            signal,
            histogram,
        })
    }
}

impl Default for MACD {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Transform for MACD {
    fn name(&self) -> &'static str {
        "MACD"
    }

    fn ui_name(&self) -> &'static str {
        "Moving Average Convergence/Divergence"
    }

    fn outputs(&self) -> IndicatorOutputs {
        IndicatorOutputs {
            name: self.name().to_string(),
            indicator_columns: vec![
                self.line_column(),
                self.signal_line_column(),
                self.histogram_column(),
            ],
            signal_column: Some(MACD_SIGNAL_COLUMN.to_string()),
            scale: ScaleType::OscillatorCentered,
        }
    }

    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        warn_if_inverted("MACD", self.fast_period, self.slow_period);
        let lines = self.lines(ohlcv_expr(df, RequiredColumn::Close)?)?;

        let mut out = with_exprs(
            df,
            vec![
                lines.macd.alias(self.line_column()),
                lines.signal.alias(self.signal_line_column()),
                lines.histogram.alias(self.histogram_column()),
            ],
        )?;
        let signals = comparison_signals(
            &float_values(&out, &self.line_column())?,
            &float_values(&out, &self.signal_line_column())?,
        );
        set_signal_column(&mut out, MACD_SIGNAL_COLUMN, &signals)?;
        log::debug!("MACD({}) applied to {} bars", self.suffix(), out.height());
        Ok(out)
    }
}

/// Adds the 12/26/9 MACD lines and `MACD_signal` (Buy when MACD is above its
/// signal line, Sell otherwise).
pub fn add_macd(df: &DataFrame) -> Result<DataFrame> {
    MACD::default().apply(df)
}

// --- SMA crossover ---
pub struct MACross {
    pub short_period: usize,
    pub long_period: usize,
}

impl MACross {
    pub fn new(short_period: usize, long_period: usize) -> Self {
        Self {
            short_period,
            long_period,
        }
    }
}

impl Default for MACross {
    fn default() -> Self {
        Self::new(50, 200)
    }
}

impl Transform for MACross {
    fn name(&self) -> &'static str {
        "MA"
    }

    fn ui_name(&self) -> &'static str {
        "Simple Moving Average Crossover"
    }

    fn outputs(&self) -> IndicatorOutputs {
        IndicatorOutputs {
            name: self.name().to_string(),
            indicator_columns: vec![SMA_SHORT_COLUMN.to_string(), SMA_LONG_COLUMN.to_string()],
            signal_column: Some(MA_SIGNAL_COLUMN.to_string()),
            scale: ScaleType::Price,
        }
    }

    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        warn_if_inverted("MA cross", self.short_period, self.long_period);
        let close = ohlcv_expr(df, RequiredColumn::Close)?;
        let mut out = with_exprs(
            df,
            vec![
                rolling_mean(close.clone(), self.short_period)?.alias(SMA_SHORT_COLUMN),
                rolling_mean(close, self.long_period)?.alias(SMA_LONG_COLUMN),
            ],
        )?;
        let signals = crossover_signals(
            &float_values(&out, SMA_SHORT_COLUMN)?,
            &float_values(&out, SMA_LONG_COLUMN)?,
        );
        set_signal_column(&mut out, MA_SIGNAL_COLUMN, &signals)?;
        log::debug!(
            "MA cross({}/{}) applied to {} bars",
            self.short_period,
            self.long_period,
            out.height()
        );
        Ok(out)
    }
}

/// Adds `SMA_short`, `SMA_long` and the edge-triggered `MA_signal`.
pub fn add_ma_cross(df: &DataFrame, short: usize, long: usize) -> Result<DataFrame> {
    MACross::new(short, long).apply(df)
}

// --- EMA crossover ---
pub struct EMACross {
    pub short_period: usize,
    pub long_period: usize,
}

impl EMACross {
    pub fn new(short_period: usize, long_period: usize) -> Self {
        Self {
            short_period,
            long_period,
        }
    }
}

impl Default for EMACross {
    fn default() -> Self {
        Self::new(12, 26)
    }
}

impl Transform for EMACross {
    fn name(&self) -> &'static str {
        "EMA"
    }

    fn ui_name(&self) -> &'static str {
        "Exponential Moving Average Crossover"
    }

    fn outputs(&self) -> IndicatorOutputs {
        IndicatorOutputs {
            name: self.name().to_string(),
            indicator_columns: vec![EMA_SHORT_COLUMN.to_string(), EMA_LONG_COLUMN.to_string()],
            signal_column: Some(EMA_SIGNAL_COLUMN.to_string()),
            scale: ScaleType::Price,
        }
    }

    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        warn_if_inverted("EMA cross", self.short_period, self.long_period);
        let close = ohlcv_expr(df, RequiredColumn::Close)?;
        let mut out = with_exprs(
            df,
            vec![
                ema(close.clone(), self.short_period)?.alias(EMA_SHORT_COLUMN),
                ema(close, self.long_period)?.alias(EMA_LONG_COLUMN),
            ],
        )?;
        let signals = crossover_signals(
            &float_values(&out, EMA_SHORT_COLUMN)?,
            &float_values(&out, EMA_LONG_COLUMN)?,
        );
        set_signal_column(&mut out, EMA_SIGNAL_COLUMN, &signals)?;
        log::debug!(
            "EMA cross({}/{}) applied to {} bars",
            self.short_period,
            self.long_period,
            out.height()
        );
        Ok(out)
    }
}

/// Adds `EMA_short`, `EMA_long` and the edge-triggered `EMA_signal`.
pub fn add_ema_cross(df: &DataFrame, short: usize, long: usize) -> Result<DataFrame> {
    EMACross::new(short, long).apply(df)
}
