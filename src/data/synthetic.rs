use crate::config::Interval;
use crate::error::{Result, SignalDeskError};
use chrono::{DurationRound, NaiveDateTime, Utc};
use polars::df;
use polars::prelude::DataFrame;
use std::f64::consts::PI;

/// `n` evenly spaced points from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Deterministic OHLCV series used when no market data is available.
///
/// A linear drift from 20000 to 32000 with a sine swing on top; bars end at
/// `end` and are spaced by `interval`.
pub fn fallback_series(periods: usize, interval: Interval, end: NaiveDateTime) -> Result<DataFrame> {
    if periods == 0 {
        return Err(SignalDeskError::InvalidParameter(
            "periods must be a positive integer".to_string(),
        ));
    }

    let step = interval.duration();
    let out_of_range = || {
        SignalDeskError::InvalidParameter(format!(
            "{} {} bars ending {} reach past the supported date range",
            periods,
            interval.as_str(),
            end
        ))
    };
    let offset = |bars_before_end: usize| -> Result<NaiveDateTime> {
        let bars = i32::try_from(bars_before_end).map_err(|_| out_of_range())?;
        step
            .checked_mul(bars)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| out_of_range())
    };
    // Reject the earliest bar before allocating anything
    offset(periods - 1)?;
    let dates = (0..periods)
        .map(|i| offset(periods - 1 - i))
        .collect::<Result<Vec<NaiveDateTime>>>()?;

    let base = linspace(20_000.0, 32_000.0, periods);
    let swing = linspace(0.0, 10.0 * PI, periods);
    let drift = linspace(0.0, 5.0 * PI, periods);
    let cycle = linspace(0.0, 8.0 * PI, periods);

    let close: Vec<f64> = base
        .iter()
        .zip(&swing)
        .map(|(b, s)| b + 1500.0 * s.sin())
        .collect();
    let open: Vec<f64> = close
        .iter()
        .zip(&drift)
        .map(|(c, d)| c * (1.0 + 0.001 * d.sin()))
        .collect();
    let high: Vec<f64> = open.iter().zip(&close).map(|(o, c)| o.max(*c) + 200.0).collect();
    let low: Vec<f64> = open.iter().zip(&close).map(|(o, c)| o.min(*c) - 200.0).collect();
    let volume: Vec<f64> = cycle.iter().map(|x| 2000.0 + 400.0 * x.cos()).collect();

    let df = df! {
        "Date" => dates,
        "Open" => open,
        "High" => high,
        "Low" => low,
        "Close" => close,
        "Volume" => volume,
    }?;

    log::debug!(
        "Generated {} synthetic {} bars ending {}",
        periods,
        interval.as_str(),
        end
    );
    Ok(df)
}

/// Synthetic series ending at the current bar boundary
pub fn fallback_series_now(periods: usize, interval: Interval) -> Result<DataFrame> {
    let end = Utc::now()
        .naive_utc()
        .duration_trunc(interval.duration())
        .map_err(|e| SignalDeskError::InvalidParameter(format!("Cannot align timestamp: {}", e)))?;
    fallback_series(periods, interval, end)
}
