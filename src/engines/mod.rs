pub mod evaluation;
pub mod pipeline;
pub mod snapshot;

pub use evaluation::{backtest_signals, Backtester, Portfolio};
pub use pipeline::IndicatorPipeline;
pub use snapshot::{MarketSnapshot, RsiBias};
