use crate::{
    data::connectors::RequiredColumn,
    error::{Result, SignalDeskError},
    functions::{
        frame::{float_values, require_values},
        indicators::momentum::RSI_COLUMN,
        IndicatorRegistry,
    },
    types::Signal,
};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiBias {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiBias {
    pub fn classify(rsi: Option<f64>) -> Self {
        match rsi {
            Some(v) if v > 70.0 => RsiBias::Overbought,
            Some(v) if v < 30.0 => RsiBias::Oversold,
            _ => RsiBias::Neutral,
        }
    }
}

/// Headline figures for the most recent bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub latest_close: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_pct: f64,
    pub rsi: Option<f64>,
    pub rsi_bias: RsiBias,
    pub signals: Vec<(String, Signal)>,
}

impl MarketSnapshot {
    pub fn from_frame(df: &DataFrame, registry: &IndicatorRegistry) -> Result<Self> {
        let closes: Vec<f64> = require_values(df, RequiredColumn::Close)?
            .into_iter()
            .flatten()
            .collect();

        let latest_close = *closes
            .last()
            .ok_or_else(|| SignalDeskError::InvalidSeries("no closing price to summarise".to_string()))?;
        let previous_close = if closes.len() > 1 {
            closes[closes.len() - 2]
        } else {
            latest_close
        };

        let change = latest_close - previous_close;
        let change_pct = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        let rsi = match registry.get("RSI") {
            Some(_) => float_values(df, RSI_COLUMN)?.last().copied().flatten(),
            None => None,
        };

        Ok(Self {
            latest_close,
            previous_close,
            change,
            change_pct,
            rsi,
            rsi_bias: RsiBias::classify(rsi),
            signals: registry.latest_signals(df)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::IndicatorPipeline;
    use crate::functions::indicators::RSI;
    use polars::df;

    #[test]
    fn test_snapshot_change() {
        let df = df! { "Close" => &[100.0, 110.0] }.unwrap();
        let snapshot = MarketSnapshot::from_frame(&df, &IndicatorRegistry::new()).unwrap();

        assert_eq!(snapshot.latest_close, 110.0);
        assert_eq!(snapshot.change, 10.0);
        assert_eq!(snapshot.change_pct, 10.0);
        assert_eq!(snapshot.rsi, None);
        assert_eq!(snapshot.rsi_bias, RsiBias::Neutral);
        assert!(snapshot.signals.is_empty());
    }

    #[test]
    fn test_single_bar_has_no_change() {
        let df = df! { "Close" => &[42.0] }.unwrap();
        let snapshot = MarketSnapshot::from_frame(&df, &IndicatorRegistry::new()).unwrap();
        assert_eq!(snapshot.change, 0.0);
        assert_eq!(snapshot.change_pct, 0.0);
    }

    #[test]
    fn test_snapshot_reads_registered_rsi() {
        let df = df! { "Close" => &[1.0, 2.0, 3.0, 4.0] }.unwrap();
        let (out, registry) = IndicatorPipeline::new().with(RSI::new(2)).run(&df).unwrap();

        let snapshot = MarketSnapshot::from_frame(&out, &registry).unwrap();
        assert_eq!(snapshot.rsi, Some(100.0));
        assert_eq!(snapshot.rsi_bias, RsiBias::Overbought);
        assert_eq!(snapshot.signals, vec![("RSI".to_string(), Signal::Sell)]);
    }

    #[test]
    fn test_empty_frame_is_an_error() {
        let df = df! { "Close" => Vec::<f64>::new() }.unwrap();
        assert!(MarketSnapshot::from_frame(&df, &IndicatorRegistry::new()).is_err());
    }
}
