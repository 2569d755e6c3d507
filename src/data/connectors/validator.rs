use super::types::RequiredColumn;
use crate::error::{Result, SignalDeskError};
use crate::functions::frame::{resolve_column, resolve_datetime_column};
use polars::prelude::*;
use std::collections::HashMap;

pub struct DataValidator;

impl DataValidator {
    /// Validate that DataFrame has the OHLC columns (and Volume when asked)
    pub fn validate_ohlcv(
        df: &DataFrame,
        require_volume: bool,
    ) -> Result<HashMap<RequiredColumn, String>> {
        let mut column_map = HashMap::new();

        for required in RequiredColumn::all() {
            match resolve_column(df, required) {
                Some(col_name) => {
                    column_map.insert(required, col_name.to_string());
                }
                None if required == RequiredColumn::Volume && !require_volume => {}
                None => {
                    return Err(SignalDeskError::MissingColumn(required.as_str().to_string()));
                }
            }
        }

        // Validate column types are numeric
        for (req_col, actual_name) in &column_map {
            let column = df.column(actual_name)?;
            if !matches!(
                column.dtype(),
                DataType::Float64
                    | DataType::Float32
                    | DataType::Int64
                    | DataType::Int32
                    | DataType::UInt64
                    | DataType::UInt32
            ) {
                return Err(SignalDeskError::InvalidSeries(format!(
                    "Column '{}' ({}) must be numeric, found {:?}",
                    actual_name,
                    req_col.as_str(),
                    column.dtype()
                )));
            }
        }

        Self::validate_ohlc_relationships(df, &column_map)?;

        Ok(column_map)
    }

    /// Validate OHLC relationships (high >= low, high >= open, high >= close, etc.)
    fn validate_ohlc_relationships(
        df: &DataFrame,
        column_map: &HashMap<RequiredColumn, String>,
    ) -> Result<()> {
        let lookup = |required: RequiredColumn| -> Result<Float64Chunked> {
            let name = column_map
                .get(&required)
                .ok_or_else(|| SignalDeskError::MissingColumn(required.as_str().to_string()))?;
            Ok(df.column(name)?.cast(&DataType::Float64)?.f64()?.clone())
        };

        let open = lookup(RequiredColumn::Open)?;
        let high = lookup(RequiredColumn::High)?;
        let low = lookup(RequiredColumn::Low)?;
        let close = lookup(RequiredColumn::Close)?;

        for i in 0..df.height() {
            if let (Some(h), Some(l), Some(o), Some(c)) =
                (high.get(i), low.get(i), open.get(i), close.get(i))
            {
                if h < l {
                    return Err(SignalDeskError::InvalidSeries(format!(
                        "Invalid data at row {}: high ({}) < low ({})",
                        i, h, l
                    )));
                }
                if h < o || h < c {
                    return Err(SignalDeskError::InvalidSeries(format!(
                        "Invalid data at row {}: high ({}) < open ({}) or close ({})",
                        i, h, o, c
                    )));
                }
                if l > o || l > c {
                    return Err(SignalDeskError::InvalidSeries(format!(
                        "Invalid data at row {}: low ({}) > open ({}) or close ({})",
                        i, l, o, c
                    )));
                }
            }
        }

        Ok(())
    }

    /// Timestamps, when present, must be unique and strictly increasing
    pub fn validate_time_index(df: &DataFrame) -> Result<()> {
        let Some(name) = resolve_datetime_column(df) else {
            return Ok(());
        };

        let column = df.column(name)?;
        if !matches!(
            column.dtype(),
            DataType::Date | DataType::Datetime(_, _) | DataType::Int64 | DataType::Int32
        ) {
            return Err(SignalDeskError::InvalidSeries(format!(
                "Time column '{}' must be a date or timestamp, found {:?}",
                name,
                column.dtype()
            )));
        }

        let ticks = column.cast(&DataType::Int64)?;
        let mut prev: Option<i64> = None;
        for (i, tick) in ticks.i64()?.into_iter().enumerate() {
            let tick = tick.ok_or_else(|| {
                SignalDeskError::InvalidSeries(format!("Missing timestamp at row {}", i))
            })?;
            if let Some(prev) = prev {
                if tick <= prev {
                    return Err(SignalDeskError::InvalidSeries(format!(
                        "Timestamps must be strictly increasing (row {})",
                        i
                    )));
                }
            }
            prev = Some(tick);
        }
        Ok(())
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(SignalDeskError::InvalidSeries(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Check for null values in critical columns
    pub fn check_nulls(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .filter(|column| column.null_count() > 0)
            .map(|column| (column.name().to_string(), column.null_count()))
            .collect()
    }
}
