pub mod backtester;
pub mod portfolio;

pub use backtester::{backtest_signals, Backtester};
pub use portfolio::Portfolio;
