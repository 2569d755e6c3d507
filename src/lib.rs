pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;

pub use engines::{backtest_signals, Backtester, IndicatorPipeline, MarketSnapshot};
pub use error::{Result, SignalDeskError};
pub use functions::indicators::{
    add_bollinger_bands, add_ema_cross, add_ma_cross, add_macd, add_rsi, add_vwap,
};
pub use functions::{IndicatorRegistry, Transform};
pub use types::{BacktestResult, Signal, Trade, TradeAction};
