pub mod connectors;
pub mod synthetic;

pub use connectors::{CsvConnector, DataValidator, DatasetMetadata};
pub use synthetic::{fallback_series, fallback_series_now};
