//! Series primitives shared by the indicator transforms.
//!
//! Each primitive builds a polars expression over a nullable Float64 input.
//! Missing cells stay null; they are never replaced by zero.

use crate::error::{Result, SignalDeskError};
use polars::prelude::*;

fn check_window(what: &str, window: usize) -> Result<()> {
    if window == 0 {
        return Err(SignalDeskError::InvalidParameter(format!(
            "{} window must be at least 1",
            what
        )));
    }
    Ok(())
}

fn fixed_window(window: usize) -> RollingOptionsFixedWindow {
    RollingOptionsFixedWindow {
        window_size: window,
        min_periods: window,
        ..Default::default()
    }
}

fn null_f64() -> Expr {
    lit(NULL).cast(DataType::Float64)
}

/// True where the trailing window is complete and every value in it is equal.
fn flat_window(values: &Expr, window: usize) -> Expr {
    values
        .clone()
        .rolling_max(fixed_window(window))
        .eq(values.clone().rolling_min(fixed_window(window)))
}

/// Exponential moving average with `alpha = 2 / (span + 1)` (adjust = false).
///
/// `ema[0] = x[0]`, so there is no warm-up gap. Leading nulls stay null and
/// the recurrence is seeded by the first present value. An interior null
/// produces a null at that bar and the previous average carries over.
pub fn ema(values: Expr, span: usize) -> Result<Expr> {
    check_window("EMA span", span)?;
    let options = EWMOptions {
        alpha: 2.0 / (span as f64 + 1.0),
        adjust: false,
        bias: false,
        min_periods: 1,
        ignore_nulls: true,
    };
    Ok(when(values.clone().is_null())
        .then(null_f64())
        .otherwise(values.ewm_mean(options)))
}

/// Trailing simple mean. The first `window - 1` outputs are missing, as is
/// any window holding a null. A window of equal values averages to exactly
/// that value.
pub fn rolling_mean(values: Expr, window: usize) -> Result<Expr> {
    check_window("rolling mean", window)?;
    Ok(when(flat_window(&values, window))
        .then(values.clone().rolling_max(fixed_window(window)))
        .otherwise(values.rolling_mean(fixed_window(window))))
}

/// Trailing sample standard deviation (ddof = 1), exactly zero over a window
/// of equal values. A single-bar window has no deviation and is all missing.
pub fn rolling_std(values: Expr, window: usize) -> Result<Expr> {
    check_window("rolling std", window)?;
    if window < 2 {
        return Ok(values * null_f64());
    }
    Ok(when(flat_window(&values, window))
        .then(lit(0.0))
        .otherwise(values.rolling_std(fixed_window(window))))
}

/// Running sum from the first bar. A missing input contributes nothing to
/// the total but its own output cell is missing.
pub fn cumulative_sum(values: Expr) -> Expr {
    when(values.clone().is_null())
        .then(null_f64())
        .otherwise(values.cum_sum(false))
}

/// Bar-to-bar change. The first bar has no predecessor and is missing.
pub fn diff(values: Expr) -> Expr {
    values.clone() - values.shift(lit(1))
}
