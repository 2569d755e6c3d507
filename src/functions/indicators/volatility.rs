use crate::data::connectors::RequiredColumn;
use crate::error::{Result, SignalDeskError};
use crate::functions::{
    frame::{float_values, ohlcv_expr, require_values, set_float_column, set_signal_column, with_exprs},
    primitives::{rolling_mean, rolling_std},
    signals::band_signals,
    traits::{IndicatorOutputs, Transform},
};
use crate::types::{ScaleType, Signal};
use polars::prelude::*;

pub const BB_SIGNAL_COLUMN: &str = "BB_signal";

// --- Bollinger Bands ---
pub struct BollingerBands {
    pub period: usize,
    pub std_dev: f64,
}

/// Band expressions over the closing price
pub struct BandLines {
    pub middle: Expr,
    pub upper: Expr,
    pub lower: Expr,
}

impl BollingerBands {
    pub fn new(period: usize, std_dev: f64) -> Self {
        Self { period, std_dev }
    }

    pub fn lower_column(&self) -> String {
        format!("BBL_{}_{}", self.period, self.std_dev)
    }

    pub fn middle_column(&self) -> String {
        format!("BBM_{}_{}", self.period, self.std_dev)
    }

    pub fn upper_column(&self) -> String {
        format!("BBU_{}_{}", self.period, self.std_dev)
    }

    fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(SignalDeskError::InvalidParameter(
                "Bollinger period must be at least 1".to_string(),
            ));
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(SignalDeskError::InvalidParameter(format!(
                "Bollinger band width must be a non-negative number, got {}",
                self.std_dev
            )));
        }
        Ok(())
    }

    /// Band lines, or `None` when no band can be computed for `height`
    /// bars: an empty table, or a period too short to have a deviation.
    pub fn lines(&self, close: Expr, height: usize) -> Result<Option<BandLines>> {
        self.validate()?;
        if height == 0 || self.period < 2 {
            return Ok(None);
        }

        let k = lit(self.std_dev);
        let middle = rolling_mean(close.clone(), self.period)?;
        let deviation = rolling_std(close, self.period)?;
        let upper = middle.clone() + k.clone() * deviation.clone();
        let lower = middle.clone() - k * deviation;

        Ok(Some(BandLines {
            middle,
            upper,
            lower,
        }))
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl Transform for BollingerBands {
    fn name(&self) -> &'static str {
        "BB"
    }

    fn ui_name(&self) -> &'static str {
        "Bollinger Bands"
    }

    fn outputs(&self) -> IndicatorOutputs {
        IndicatorOutputs {
            name: self.name().to_string(),
            indicator_columns: vec![self.lower_column(), self.middle_column(), self.upper_column()],
            signal_column: Some(BB_SIGNAL_COLUMN.to_string()),
            scale: ScaleType::Price,
        }
    }

    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let height = df.height();

        let out = match self.lines(ohlcv_expr(df, RequiredColumn::Close)?, height)? {
            Some(lines) => {
                let mut out = with_exprs(
                    df,
                    vec![
                        lines.lower.alias(self.lower_column()),
                        lines.middle.alias(self.middle_column()),
                        lines.upper.alias(self.upper_column()),
                    ],
                )?;
                let signals = band_signals(
                    &require_values(&out, RequiredColumn::Close)?,
                    &float_values(&out, &self.lower_column())?,
                    &float_values(&out, &self.upper_column())?,
                );
                set_signal_column(&mut out, BB_SIGNAL_COLUMN, &signals)?;
                out
            }
            None => {
                log::warn!(
                    "Bollinger({}, {}): bands unavailable for {} bars, adding empty columns",
                    self.period,
                    self.std_dev,
                    height
                );
                let mut out = df.clone();
                for name in [self.lower_column(), self.middle_column(), self.upper_column()] {
                    set_float_column(&mut out, &name, vec![None; height])?;
                }
                set_signal_column(&mut out, BB_SIGNAL_COLUMN, &vec![Signal::Neutral; height])?;
                out
            }
        };

        log::debug!(
            "Bollinger({}, {}) applied to {} bars",
            self.period,
            self.std_dev,
            height
        );
        Ok(out)
    }
}

/// Adds `BBL_/BBM_/BBU_{length}_{std}` and `BB_signal` (Buy at or below the
/// lower band, Sell at or above the upper band).
pub fn add_bollinger_bands(df: &DataFrame, length: usize, std: f64) -> Result<DataFrame> {
    BollingerBands::new(length, std).apply(df)
}
