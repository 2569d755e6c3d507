//! Column access on price tables: alias resolution, price expressions,
//! extraction into nullable cells and appending derived columns.

use crate::data::connectors::{RequiredColumn, DATETIME_ALIASES};
use crate::error::{Result, SignalDeskError};
use crate::types::Signal;
use polars::prelude::*;

/// Name of the column in `df` that carries `required`, checking aliases.
pub fn resolve_column(df: &DataFrame, required: RequiredColumn) -> Option<&'static str> {
    let columns = df.get_column_names();
    required
        .aliases()
        .into_iter()
        .find(|alias| columns.iter().any(|col| col.as_str() == *alias))
}

/// Name of the time column in `df`, if it has one.
pub fn resolve_datetime_column(df: &DataFrame) -> Option<&'static str> {
    let columns = df.get_column_names();
    DATETIME_ALIASES
        .into_iter()
        .find(|alias| columns.iter().any(|col| col.as_str() == *alias))
}

/// Extracts a required OHLCV column, failing with `MissingColumn` when absent.
pub fn require_values(df: &DataFrame, required: RequiredColumn) -> Result<Vec<Option<f64>>> {
    let name = resolve_column(df, required)
        .ok_or_else(|| SignalDeskError::MissingColumn(required.as_str().to_string()))?;
    float_values(df, name)
}

/// A required OHLCV column as a Float64 expression, NaN read as missing.
pub fn ohlcv_expr(df: &DataFrame, required: RequiredColumn) -> Result<Expr> {
    let name = resolve_column(df, required)
        .ok_or_else(|| SignalDeskError::MissingColumn(required.as_str().to_string()))?;
    Ok(col(name).cast(DataType::Float64).fill_nan(lit(NULL)))
}

/// Evaluates `exprs` against `df`, appending (or overwriting) their outputs.
pub fn with_exprs(df: &DataFrame, exprs: Vec<Expr>) -> Result<DataFrame> {
    Ok(df.clone().lazy().with_columns(exprs).collect()?)
}

/// Fails with `MissingColumn` unless `df` has a column called `name`.
pub fn ensure_column(df: &DataFrame, name: &str) -> Result<()> {
    if df.get_column_names().iter().any(|col| col.as_str() == name) {
        Ok(())
    } else {
        Err(SignalDeskError::MissingColumn(name.to_string()))
    }
}

/// Reads any numeric column as nullable cells. NaN is read as missing.
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Reads a signal column. Null and unknown cells are neutral.
pub fn signal_values(df: &DataFrame, name: &str) -> Result<Vec<Signal>> {
    let column = df.column(name)?;
    let signals = column.str()?.into_iter().map(Signal::from_cell).collect();
    Ok(signals)
}

/// Appends (or overwrites) a nullable Float64 column.
pub fn set_float_column(df: &mut DataFrame, name: &str, values: Vec<Option<f64>>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

/// Appends (or overwrites) a signal column; neutral cells are written as null.
pub fn set_signal_column(df: &mut DataFrame, name: &str, signals: &[Signal]) -> Result<()> {
    let cells: Vec<Option<&str>> = signals.iter().map(Signal::as_cell).collect();
    df.with_column(Series::new(name.into(), cells))?;
    Ok(())
}
