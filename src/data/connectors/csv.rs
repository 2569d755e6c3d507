use super::{
    types::{DatasetMetadata, RequiredColumn},
    validator::DataValidator,
};
use crate::error::{Result, SignalDeskError};
use crate::functions::frame::{resolve_column, resolve_datetime_column};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame, parsing date-like columns as temporal
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .map_parse_options(|opts| opts.with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| SignalDeskError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load, normalise and validate a CSV file
    pub fn load_and_validate<P: AsRef<Path>>(path: P, min_rows: usize) -> Result<DataFrame> {
        let df = Self::load(&path)?;
        let df = Self::normalize_columns(df)?;

        DataValidator::validate_time_index(&df)?;
        DataValidator::validate_minimum_rows(&df, min_rows)?;

        // Warn about nulls but don't fail
        let null_report = DataValidator::check_nulls(&df);
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        log::info!(
            "Loaded {} bars from {}",
            df.height(),
            path.as_ref().display()
        );
        Ok(df)
    }

    /// Rename OHLCV aliases to their canonical names
    pub fn normalize_columns(mut df: DataFrame) -> Result<DataFrame> {
        let column_map = DataValidator::validate_ohlcv(&df, false)?;

        for (required, actual_name) in column_map {
            let standard_name = required.as_str();
            if actual_name != standard_name {
                df.rename(&actual_name, standard_name.into()).map_err(|e| {
                    SignalDeskError::DataLoading(format!("Failed to rename column: {}", e))
                })?;
            }
        }

        Ok(df)
    }

    /// Create metadata for a loaded DataFrame
    pub fn create_metadata(source: &str, df: &DataFrame) -> Result<DatasetMetadata> {
        let columns: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        let datetime_column = resolve_datetime_column(df);

        let price_range = Self::value_range(df, RequiredColumn::Close)?.unwrap_or((0.0, 0.0));
        let volume_range = Self::value_range(df, RequiredColumn::Volume)?;

        let date_range = match datetime_column {
            Some(name) => Self::time_bounds(df.column(name)?)?,
            None => None,
        };

        Ok(DatasetMetadata {
            source: source.to_string(),
            num_rows: df.height(),
            num_columns: df.width(),
            columns,
            datetime_column: datetime_column.map(str::to_string),
            date_range,
            price_range,
            volume_range,
        })
    }

    fn value_range(df: &DataFrame, required: RequiredColumn) -> Result<Option<(f64, f64)>> {
        let Some(name) = resolve_column(df, required) else {
            return Ok(None);
        };
        let values = df.column(name)?.cast(&DataType::Float64)?;
        let values = values.f64()?;
        Ok(values.min().zip(values.max()))
    }

    fn time_bounds(column: &Column) -> Result<Option<(NaiveDateTime, NaiveDateTime)>> {
        let to_millis: fn(i64) -> i64 = match column.dtype() {
            DataType::Datetime(TimeUnit::Milliseconds, _) => |v| v,
            DataType::Datetime(TimeUnit::Microseconds, _) => |v| v / 1_000,
            DataType::Datetime(TimeUnit::Nanoseconds, _) => |v| v / 1_000_000,
            DataType::Date => |v| v * 86_400_000,
            _ => return Ok(None),
        };

        let ticks = column.cast(&DataType::Int64)?;
        let ticks = ticks.i64()?;
        let (Some(first), Some(last)) = (ticks.min(), ticks.max()) else {
            return Ok(None);
        };

        let convert = |tick: i64| {
            DateTime::from_timestamp_millis(to_millis(tick))
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| {
                    SignalDeskError::InvalidSeries(format!("Timestamp {} is out of range", tick))
                })
        };
        Ok(Some((convert(first)?, convert(last)?)))
    }
}
