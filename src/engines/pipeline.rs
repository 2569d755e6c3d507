use crate::{
    config::{IndicatorConfig, IndicatorKind},
    error::Result,
    functions::{
        indicators::{BollingerBands, EMACross, MACross, MACD, RSI, VWAP},
        IndicatorRegistry, Transform,
    },
};
use polars::prelude::DataFrame;

/// Ordered set of transforms applied to one price table.
#[derive(Default)]
pub struct IndicatorPipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl IndicatorPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.push(Box::new(transform));
        self
    }

    pub fn push(&mut self, transform: Box<dyn Transform>) {
        self.transforms.push(transform);
    }

    pub fn from_config(config: &IndicatorConfig) -> Self {
        let mut pipeline = Self::new();
        for kind in &config.enabled {
            pipeline.push(build_transform(*kind, config));
        }
        pipeline
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Applies every transform in order and records the columns each one
    /// produced.
    pub fn run(&self, df: &DataFrame) -> Result<(DataFrame, IndicatorRegistry)> {
        let mut registry = IndicatorRegistry::new();
        let mut current = df.clone();

        for transform in &self.transforms {
            log::debug!("Applying {}", transform.ui_name());
            current = transform.apply(&current)?;
            registry.register(transform.outputs());
        }

        log::info!(
            "Applied {} indicators to {} bars",
            registry.entries().len(),
            current.height()
        );
        Ok((current, registry))
    }
}

fn build_transform(kind: IndicatorKind, config: &IndicatorConfig) -> Box<dyn Transform> {
    match kind {
        IndicatorKind::Rsi => Box::new(
            RSI::new(config.rsi_length).with_thresholds(config.rsi_oversold, config.rsi_overbought),
        ),
        IndicatorKind::Macd => Box::new(MACD::new(
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
        )),
        IndicatorKind::MaCross => Box::new(MACross::new(config.sma_short, config.sma_long)),
        IndicatorKind::EmaCross => Box::new(EMACross::new(config.ema_short, config.ema_long)),
        IndicatorKind::Bollinger => Box::new(BollingerBands::new(config.bb_length, config.bb_std)),
        IndicatorKind::Vwap => Box::new(VWAP::new()),
    }
}
