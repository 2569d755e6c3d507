use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalDeskError {
    #[error("Input error: missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Backtest error: {0}")]
    BacktestError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, SignalDeskError>;
