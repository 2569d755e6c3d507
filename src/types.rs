use serde::{Deserialize, Serialize};
use std::fmt;

/// Value scale information, used by chart consumers to decide whether an
/// indicator overlays the candles or needs its own panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleType {
    Price,              // Follows price (SMA, EMA, BB, VWAP)
    Oscillator0_100,    // 0-100 bounded (RSI)
    OscillatorCentered, // Zero-centered (MACD)
}

impl ScaleType {
    pub fn is_overlay(&self) -> bool {
        matches!(self, ScaleType::Price)
    }
}

/// Discrete trading signal for one bar.
///
/// `Neutral` is stored as a null cell in signal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Signal {
    /// Cell value written to a signal column.
    pub fn as_cell(&self) -> Option<&'static str> {
        match self {
            Signal::Buy => Some("Buy"),
            Signal::Sell => Some("Sell"),
            Signal::Neutral => None,
        }
    }

    /// Inverse of [`Signal::as_cell`]. Anything other than Buy/Sell is neutral.
    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell {
            Some("Buy") => Signal::Buy,
            Some("Sell") => Signal::Sell,
            _ => Signal::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
            Signal::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of a backtest fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
}

/// Trade record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub action: TradeAction,
    pub bar: usize,
    pub price: f64,
    /// Quantity bought, or cash received when selling
    pub amount: f64,
}

/// Complete backtest result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub signal_column: String,
    pub initial_capital: f64,
    pub trades: Vec<Trade>,
    pub final_value: f64,
    pub equity_curve: Vec<f64>,
}

impl BacktestResult {
    pub fn return_pct(&self) -> f64 {
        (self.final_value - self.initial_capital) / self.initial_capital * 100.0
    }
}
