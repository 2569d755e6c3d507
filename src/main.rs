use anyhow::{Context, Result};
use signaldesk::config::{AppConfig, ConfigManager};
use signaldesk::data::{fallback_series_now, CsvConnector};
use signaldesk::engines::{Backtester, IndicatorPipeline, MarketSnapshot};
use std::path::PathBuf;

const TAPE_ROWS: usize = 25;

fn main() -> Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SIGNALDESK_CONFIG").ok())
        .map(PathBuf::from);

    let manager = ConfigManager::new();
    manager
        .load_layered(config_path.as_deref())
        .context("Failed to load configuration")?;
    let config = manager.get();

    let bars = load_bars(&config)?;
    let (df, registry) = IndicatorPipeline::from_config(&config.indicators)
        .run(&bars)
        .context("Failed to compute indicators")?;

    let snapshot = MarketSnapshot::from_frame(&df, &registry).context("Failed to summarise bars")?;
    println!("{} ({})", config.data.ticker, config.data.interval.as_str());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    std::env::set_var("POLARS_FMT_MAX_ROWS", TAPE_ROWS.to_string());
    let tape = registry
        .signal_tape(&df, TAPE_ROWS)
        .context("Failed to build signal tape")?;
    println!("{}", tape);

    let signal_column = &config.backtesting.signal_column;
    if !registry.signal_columns().contains(&signal_column.as_str()) {
        log::warn!(
            "Signal column '{}' was not produced by the enabled indicators; skipping backtest",
            signal_column
        );
        return Ok(());
    }

    let result = Backtester::new(config.backtesting.initial_capital)
        .run(&df, signal_column, &config.backtesting.price_column)
        .context("Backtest failed")?;
    println!(
        "Backtest on {}: {} trades, final value {:.2} ({:+.2}%)",
        result.signal_column,
        result.trades.len(),
        result.final_value,
        result.return_pct()
    );
    println!("{}", serde_json::to_string_pretty(&result.trades)?);

    Ok(())
}

fn load_bars(config: &AppConfig) -> Result<polars::prelude::DataFrame> {
    match &config.data.csv_path {
        Some(path) => CsvConnector::load_and_validate(path, config.data.min_rows)
            .with_context(|| format!("Failed to load {}", path.display())),
        None => {
            log::info!(
                "No CSV configured; using {} synthetic bars",
                config.data.periods
            );
            fallback_series_now(config.data.periods, config.data.interval)
                .context("Failed to generate synthetic bars")
        }
    }
}
