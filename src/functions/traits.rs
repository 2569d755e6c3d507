use crate::error::Result;
use crate::types::ScaleType;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Columns an indicator transform appends to a price table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOutputs {
    /// Registry key, e.g. "RSI" or "MACD"
    pub name: String,
    pub indicator_columns: Vec<String>,
    pub signal_column: Option<String>,
    pub scale: ScaleType,
}

/// Base trait for all indicator transforms.
///
/// `apply` is pure: it returns a new table with the columns listed by
/// `outputs` appended (or overwritten) and leaves every other column as it
/// was.
pub trait Transform: Send + Sync {
    /// Registry key
    fn name(&self) -> &'static str;

    /// Display name
    fn ui_name(&self) -> &'static str;

    fn outputs(&self) -> IndicatorOutputs;

    fn apply(&self, df: &DataFrame) -> Result<DataFrame>;
}
