pub mod backtesting;
pub mod data;
pub mod indicators;
pub mod manager;
pub mod traits;

pub use backtesting::BacktestingConfig;
pub use data::{DataConfig, Interval};
pub use indicators::{IndicatorConfig, IndicatorKind};
pub use manager::{AppConfig, ConfigManager};
pub use traits::ConfigSection;
