use super::{
    frame::{ensure_column, resolve_datetime_column, signal_values},
    traits::IndicatorOutputs,
};
use crate::error::Result;
use crate::types::Signal;
use polars::prelude::*;

/// Describes which columns each applied indicator produced.
///
/// Built while composing transforms, so consumers look columns up by
/// indicator name instead of scanning the table.
#[derive(Debug, Clone, Default)]
pub struct IndicatorRegistry {
    entries: Vec<IndicatorOutputs>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any earlier entry with the same name.
    pub fn register(&mut self, outputs: IndicatorOutputs) {
        match self.entries.iter_mut().find(|e| e.name == outputs.name) {
            Some(existing) => *existing = outputs,
            None => self.entries.push(outputs),
        }
    }

    pub fn get(&self, name: &str) -> Option<&IndicatorOutputs> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entries(&self) -> &[IndicatorOutputs] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn signal_columns(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| e.signal_column.as_deref())
            .collect()
    }

    /// Indicator columns drawn on top of the price candles
    pub fn overlay_columns(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.scale.is_overlay())
            .flat_map(|e| e.indicator_columns.iter().map(String::as_str))
            .collect()
    }

    /// Indicator columns that need their own panel
    pub fn panel_columns(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.scale.is_overlay())
            .flat_map(|e| e.indicator_columns.iter().map(String::as_str))
            .collect()
    }

    /// Latest signal of every registered indicator that has one.
    pub fn latest_signals(&self, df: &DataFrame) -> Result<Vec<(String, Signal)>> {
        let mut latest = Vec::new();
        for entry in &self.entries {
            if let Some(column) = &entry.signal_column {
                ensure_column(df, column)?;
                let signal = signal_values(df, column)?
                    .last()
                    .copied()
                    .unwrap_or(Signal::Neutral);
                latest.push((entry.name.clone(), signal));
            }
        }
        Ok(latest)
    }

    /// The last `last_n` rows of every signal column, with the time column
    /// first when the table has one. Neutral cells read "Neutral".
    pub fn signal_tape(&self, df: &DataFrame, last_n: usize) -> Result<DataFrame> {
        let signal_columns = self.signal_columns();
        for column in &signal_columns {
            ensure_column(df, column)?;
        }

        let mut names: Vec<&str> = Vec::with_capacity(signal_columns.len() + 1);
        if let Some(time) = resolve_datetime_column(df) {
            names.push(time);
        }
        names.extend(signal_columns.iter().copied());

        let mut tape = df.tail(Some(last_n)).select(names)?;
        for column in signal_columns {
            let cells: Vec<&str> = signal_values(&tape, column)?
                .iter()
                .map(Signal::as_str)
                .collect();
            tape.with_column(Series::new(column.into(), cells))?;
        }
        Ok(tape)
    }
}
