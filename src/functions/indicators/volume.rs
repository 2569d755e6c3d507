use crate::data::connectors::RequiredColumn;
use crate::error::Result;
use crate::functions::{
    frame::{ohlcv_expr, with_exprs},
    primitives::cumulative_sum,
    traits::{IndicatorOutputs, Transform},
};
use crate::types::ScaleType;
use polars::prelude::*;

pub const VWAP_COLUMN: &str = "VWAP";

// --- VWAP (Volume Weighted Average Price) ---
#[derive(Default)]
pub struct VWAP;

impl VWAP {
    pub fn new() -> Self {
        Self
    }

    /// Cumulative VWAP from the first bar. Bars where the running volume is
    /// zero have no price and are missing.
    pub fn expr(&self, high: Expr, low: Expr, close: Expr, volume: Expr) -> Expr {
        let typical = (high + low + close) / lit(3.0);
        let cum_weighted = cumulative_sum(typical * volume.clone());
        let cum_volume = cumulative_sum(volume);

        when(cum_volume.clone().eq(lit(0.0)))
            .then(lit(NULL).cast(DataType::Float64))
            .otherwise(cum_weighted / cum_volume)
    }
}

impl Transform for VWAP {
    fn name(&self) -> &'static str {
        "VWAP"
    }

    fn ui_name(&self) -> &'static str {
        "Volume Weighted Average Price"
    }

    fn outputs(&self) -> IndicatorOutputs {
        IndicatorOutputs {
            name: self.name().to_string(),
            indicator_columns: vec![VWAP_COLUMN.to_string()],
            signal_column: None,
            scale: ScaleType::Price,
        }
    }

    fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let volume = ohlcv_expr(df, RequiredColumn::Volume)?;
        let high = ohlcv_expr(df, RequiredColumn::High)?;
        let low = ohlcv_expr(df, RequiredColumn::Low)?;
        let close = ohlcv_expr(df, RequiredColumn::Close)?;

        let out = with_exprs(df, vec![self.expr(high, low, close, volume).alias(VWAP_COLUMN)])?;
        let missing = out.column(VWAP_COLUMN)?.null_count();
        if missing > 0 {
            log::warn!(
                "VWAP: {} of {} bars without cumulative volume",
                missing,
                out.height()
            );
        } else {
            log::debug!("VWAP applied to {} bars", out.height());
        }
        Ok(out)
    }
}

/// Adds the cumulative `VWAP` column. Fails if `Volume` is absent.
pub fn add_vwap(df: &DataFrame) -> Result<DataFrame> {
    VWAP::new().apply(df)
}
