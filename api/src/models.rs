use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Query parameters of a single export call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeseriesRequest {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
    pub output_time_zone: String,
    pub output_format: String,
    pub json_header_groups: u8,
    pub download: u8,
}

impl TimeseriesRequest {
    /// JSON export of `id` between `start_date` and `end_date`, the way the dashboard's
    /// download button requests it.
    pub fn json(id: &str, start_date: &str, end_date: &str, output_time_zone: &str) -> Self {
        TimeseriesRequest {
            id: id.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            output_time_zone: output_time_zone.to_string(),
            output_format: "json".to_string(),
            json_header_groups: 1,
            download: 0,
        }
    }

    pub fn get_timezone(&self) -> Result<Tz, ApiError> {
        self.output_time_zone
            .parse()
            .map_err(|_| ApiError::UnknownTimeZone(self.output_time_zone.clone()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResponse {
    pub data: ExportData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub timeseries: Vec<TimeseriesRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeseriesRecord {
    #[serde(rename = "_from")]
    pub from: String,
    pub values: Vec<Option<f64>>,
}

impl TimeseriesRecord {
    /// Parses `_from`. Offsets sent by the API win; naive times are read as wall clock
    /// time in `tz`.
    pub fn get_timestamp(&self, tz: &Tz) -> Result<DateTime<FixedOffset>, ApiError> {
        parse_timestamp(&self.from, tz)
    }
}

pub fn parse_timestamp(raw: &str, tz: &Tz) -> Result<DateTime<FixedOffset>, ApiError> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(time);
    }
    if let Ok(time) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Ok(time);
    }

    let naive_time = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|source| ApiError::Timestamp {
            value: raw.to_string(),
            source,
        })?;

    // Ambiguous wall clock times during the autumn DST switch resolve to the earlier instant.
    match tz.from_local_datetime(&naive_time).earliest() {
        Some(time) => Ok(time.fixed_offset()),
        None => Err(ApiError::NonexistentLocalTime {
            value: raw.to_string(),
            tz: tz.name().to_string(),
        }),
    }
}
