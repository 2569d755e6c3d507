mod csv;
mod types;
mod validator;

pub use csv::CsvConnector;
pub use types::{DatasetMetadata, RequiredColumn, DATETIME_ALIASES};
pub use validator::DataValidator;
