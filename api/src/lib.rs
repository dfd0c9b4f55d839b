#[macro_use]
extern crate log;

pub mod error;
pub mod models;
pub mod table;

use chrono_tz::Tz;
use http::{header::USER_AGENT, StatusCode};
pub use error::*;
pub use models::*;
pub use table::*;

pub const API_URL: &str = r#"https://api-baltic.transparency-dashboard.eu/api/v1/export"#;
const CRATE_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the export endpoint of the Baltic transparency dashboard.
pub struct DashboardClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl Default for DashboardClient {
    fn default() -> Self {
        DashboardClient::new(API_URL)
    }
}

impl DashboardClient {
    pub fn new(url: &str) -> Self {
        DashboardClient::with_client(reqwest::blocking::Client::new(), url)
    }

    pub fn with_client(http: reqwest::blocking::Client, url: &str) -> Self {
        DashboardClient {
            http,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches one series and spreads each record's `values` over `value_columns`.
    ///
    /// The returned table is keyed by the raw `_from` column. Any status other than
    /// 200 is logged and returned as [`ApiError::Status`].
    pub fn fetch_timeseries_data(&self, params: &TimeseriesRequest, value_columns: &[&str]) -> Result<TimeseriesTable, ApiError> {
        let tz = params.get_timezone()?;

        let res = self
            .http
            .get(&self.url)
            .query(params)
            .header(USER_AGENT, CRATE_USER_AGENT)
            .send()?;

        let status = res.status();

        let data_str = res.text()?;
        debug!("{}", data_str);

        if status != StatusCode::OK {
            error!("Failed to fetch data, status code: {} (series {})", status.as_u16(), params.id);
            return Err(ApiError::Status { status, body: data_str });
        }

        let data: ExportResponse = serde_json::from_str(&data_str)?;
        debug!("Series {} returned {} records", params.id, data.data.timeseries.len());

        build_table(&data.data.timeseries, value_columns, &tz)
    }
}

pub fn build_table(records: &[TimeseriesRecord], value_columns: &[&str], tz: &Tz) -> Result<TimeseriesTable, ApiError> {
    let mut timestamps = Vec::with_capacity(records.len());
    let mut columns: Vec<ValueColumn> = value_columns
        .iter()
        .map(|name| ValueColumn {
            name: name.to_string(),
            values: Vec::with_capacity(records.len()),
        })
        .collect();

    for (row, record) in records.iter().enumerate() {
        if record.values.len() != value_columns.len() {
            return Err(ApiError::ColumnCountMismatch {
                row,
                expected: value_columns.len(),
                found: record.values.len(),
            });
        }

        timestamps.push(record.get_timestamp(tz)?);
        for (column, value) in columns.iter_mut().zip(&record.values) {
            column.values.push(*value);
        }
    }

    Ok(TimeseriesTable::new(FROM_COLUMN, timestamps, columns))
}
