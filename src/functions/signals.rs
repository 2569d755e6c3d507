//! Signal rules turning indicator cells into Buy/Sell/Neutral.

use crate::types::Signal;

/// Level-triggered threshold rule: fires on every bar the condition holds.
/// Missing values are neutral.
pub fn threshold_signals(values: &[Option<f64>], buy_below: f64, sell_above: f64) -> Vec<Signal> {
    values
        .iter()
        .map(|value| match value {
            Some(v) if *v < buy_below => Signal::Buy,
            Some(v) if *v > sell_above => Signal::Sell,
            _ => Signal::Neutral,
        })
        .collect()
}

/// Binary comparison rule: Buy when `a > b`, otherwise Sell.
/// Neutral only where either side is missing.
pub fn comparison_signals(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Signal> {
    a.iter()
        .zip(b.iter())
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if a > b => Signal::Buy,
            (Some(_), Some(_)) => Signal::Sell,
            _ => Signal::Neutral,
        })
        .collect()
}

/// Edge-triggered crossover rule.
///
/// `above[t] = short[t] > long[t]` with missing treated as not above. Buy
/// fires on the false -> true transition, Sell on true -> false. Bar 0 has
/// no predecessor to compare against and never signals; it only seeds the
/// state.
pub fn crossover_signals(short: &[Option<f64>], long: &[Option<f64>]) -> Vec<Signal> {
    let mut prev_above: Option<bool> = None;
    short
        .iter()
        .zip(long.iter())
        .map(|(s, l)| {
            let above = matches!((s, l), (Some(s), Some(l)) if s > l);
            let signal = match (prev_above, above) {
                (Some(false), true) => Signal::Buy,
                (Some(true), false) => Signal::Sell,
                _ => Signal::Neutral,
            };
            prev_above = Some(above);
            signal
        })
        .collect()
}

/// Band touch rule: Buy at or below the lower band, Sell at or above the
/// upper band. Buy wins when both hold (zero-width bands).
pub fn band_signals(
    close: &[Option<f64>],
    lower: &[Option<f64>],
    upper: &[Option<f64>],
) -> Vec<Signal> {
    close
        .iter()
        .zip(lower.iter().zip(upper.iter()))
        .map(|(c, (l, u))| match (c, l, u) {
            (Some(c), Some(l), _) if c <= l => Signal::Buy,
            (Some(c), _, Some(u)) if c >= u => Signal::Sell,
            _ => Signal::Neutral,
        })
        .collect()
}
