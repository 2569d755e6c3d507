use crate::{
    engines::evaluation::Portfolio,
    error::Result,
    functions::frame::{ensure_column, float_values, signal_values},
    types::{BacktestResult, Signal},
};
use polars::prelude::*;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;

/// Replays one signal column against a price column.
pub struct Backtester {
    initial_capital: f64,
}

impl Backtester {
    pub fn new(initial_capital: f64) -> Self {
        Self { initial_capital }
    }

    pub fn run(&self, data: &DataFrame, signal_col: &str, price_col: &str) -> Result<BacktestResult> {
        ensure_column(data, signal_col)?;
        ensure_column(data, price_col)?;

        let signals = signal_values(data, signal_col)?;
        let prices = float_values(data, price_col)?;

        let mut portfolio = Portfolio::new(self.initial_capital);
        let mut last_price: Option<f64> = None;

        for (bar, (signal, price)) in signals.iter().zip(prices.iter()).enumerate() {
            // A bar without a price cannot be traded or marked
            let Some(price) = *price else {
                if *signal != Signal::Neutral {
                    log::warn!("Skipping {} on bar {}: no price", signal, bar);
                }
                continue;
            };
            portfolio.process_bar(bar, *signal, price)?;
            last_price = Some(price);
        }

        let final_value = match last_price {
            Some(price) => portfolio.total_value(price),
            None => portfolio.cash,
        };

        log::info!(
            "Backtest on {}: {} trades, final value {:.2}",
            signal_col,
            portfolio.get_trades().len(),
            final_value
        );

        Ok(BacktestResult {
            signal_column: signal_col.to_string(),
            initial_capital: self.initial_capital,
            trades: portfolio.get_trades().to_vec(),
            final_value,
            equity_curve: portfolio.get_equity_curve().to_vec(),
        })
    }
}

impl Default for Backtester {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CAPITAL)
    }
}

/// Buy with all cash on "Buy", sell the whole position on "Sell", starting
/// from 10 000 of cash. Final value is cash plus position at the last price.
pub fn backtest_signals(df: &DataFrame, signal_col: &str, price_col: &str) -> Result<BacktestResult> {
    Backtester::default().run(df, signal_col, price_col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignalDeskError;
    use crate::types::TradeAction;
    use polars::df;

    #[test]
    fn test_backtester_round_trip() {
        let df = df! {
            "Close" => &[100.0, 125.0, 90.0],
            "X_signal" => &[Some("Buy"), Some("Sell"), None],
        }
        .unwrap();

        let result = backtest_signals(&df, "X_signal", "Close").unwrap();
        assert_eq!(result.trades.len(), 2);
        assert_eq!(result.trades[0].action, TradeAction::Buy);
        assert_eq!(result.trades[1].action, TradeAction::Sell);
        assert_eq!(result.final_value, 12500.0);
        assert_eq!(result.return_pct(), 25.0);
    }

    #[test]
    fn test_open_position_marked_at_last_close() {
        let df = df! {
            "Close" => &[100.0, 110.0, 120.0],
            "X_signal" => &[Some("Buy"), None, None],
        }
        .unwrap();

        let result = backtest_signals(&df, "X_signal", "Close").unwrap();
        assert_eq!(result.final_value, 12000.0);
        assert_eq!(result.equity_curve, vec![10000.0, 11000.0, 12000.0]);
    }

    #[test]
    fn test_missing_signal_column() {
        let df = df! { "Close" => &[1.0] }.unwrap();
        assert!(matches!(
            backtest_signals(&df, "MA_signal", "Close"),
            Err(SignalDeskError::MissingColumn(ref c)) if c == "MA_signal"
        ));
    }

    #[test]
    fn test_empty_frame_keeps_capital() {
        let df = df! {
            "Close" => Vec::<f64>::new(),
            "X_signal" => Vec::<Option<&str>>::new(),
        }
        .unwrap();

        let result = Backtester::new(500.0).run(&df, "X_signal", "Close").unwrap();
        assert_eq!(result.final_value, 500.0);
        assert!(result.trades.is_empty());
    }
}
