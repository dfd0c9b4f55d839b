use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to fetch data, status code: {status}")]
    Status { status: http::StatusCode, body: String },
    #[error("Failed to deserialize export response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },
    #[error("Local time {value} does not exist in time zone {tz}")]
    NonexistentLocalTime { value: String, tz: String },
    #[error("Unknown time zone {0:?}")]
    UnknownTimeZone(String),
    #[error("Row {row} has {found} values but {expected} column names were declared")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("Column {0:?} not found")]
    MissingColumn(String),
}
