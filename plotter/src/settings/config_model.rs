use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use transparency_api::{TimeseriesRequest, API_URL};

use super::time::parse_local_time;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    pub start_date: String,
    pub end_date: String,
    pub output_time_zone: String,
    pub output_format: String,
    pub json_header_groups: u8,
    pub download: u8,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            url: API_URL.to_string(),
            start_date: "2024-09-23T00:00".to_string(),
            end_date: "2024-09-29T00:00".to_string(),
            output_time_zone: "EET".to_string(),
            output_format: "json".to_string(),
            json_header_groups: 1,
            download: 0,
        }
    }
}

impl ApiConfig {
    pub fn request(&self, id: &str) -> TimeseriesRequest {
        TimeseriesRequest {
            id: id.to_string(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            output_time_zone: self.output_time_zone.clone(),
            output_format: self.output_format.clone(),
            json_header_groups: self.json_header_groups,
            download: self.download,
        }
    }

    pub fn get_timezone(&self) -> Option<Tz> {
        self.output_time_zone.parse().ok()
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.url.is_empty() {
            return Err("api.url is required");
        }

        let tz = self
            .get_timezone()
            .ok_or("api.output_time_zone is not a known time zone")?;

        let start = parse_local_time(&self.start_date, &tz).ok_or("api.start_date is not a valid local time")?;
        let end = parse_local_time(&self.end_date, &tz).ok_or("api.end_date is not a valid local time")?;
        if start > end {
            return Err("api.start_date is after api.end_date");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SeriesSpec {
    pub id: String,
    pub columns: Vec<String>,
}

impl SeriesSpec {
    pub fn column_refs(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    fn column(&self, index: usize) -> &str {
        self.columns.get(index).map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SeriesConfig {
    pub imbalance: SeriesSpec,
    pub activations: SeriesSpec,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        SeriesConfig {
            imbalance: SeriesSpec {
                id: "imbalance_volumes".to_string(),
                columns: vec!["Imbalance_Baltics".to_string()],
            },
            activations: SeriesSpec {
                id: "normal_activations_total".to_string(),
                columns: vec!["Upward_Baltics".to_string(), "Downward_Baltics".to_string()],
            },
        }
    }
}

impl SeriesConfig {
    pub fn imbalance_column(&self) -> &str {
        self.imbalance.column(0)
    }

    pub fn upward_column(&self) -> &str {
        self.activations.column(0)
    }

    pub fn downward_column(&self) -> &str {
        self.activations.column(1)
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.imbalance.id.is_empty() || self.activations.id.is_empty() {
            return Err("series ids are required");
        }

        if self.imbalance.columns.len() != 1 {
            return Err("series.imbalance needs exactly one column");
        }

        if self.activations.columns.len() != 2 {
            return Err("series.activations needs exactly two columns, upward first");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub output_file: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Draws upward activations below zero. The fetched data is never changed.
    pub negate_upward: bool,
    pub show: bool,
    pub font_path: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            title: "Imbalance and Adjustments for Baltics".to_string(),
            output_file: PathBuf::from("BalticRCC_task2.png"),
            width: 2000,
            height: 1200,
            negate_upward: true,
            show: true,
            font_path: None,
        }
    }
}

impl ChartConfig {
    fn validate(&self) -> Result<(), &'static str> {
        if self.width == 0 || self.height == 0 {
            return Err("chart.width and chart.height must be positive");
        }

        if self.output_file.as_os_str().is_empty() {
            return Err("chart.output_file is required");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SettingsConfig {
    pub api: ApiConfig,
    pub series: SeriesConfig,
    pub chart: ChartConfig,
}

impl SettingsConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        self.api.validate()?;
        self.series.validate()?;
        self.chart.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SettingsConfig::default();

        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.series.imbalance_column(), "Imbalance_Baltics");
        assert_eq!(settings.series.upward_column(), "Upward_Baltics");
        assert_eq!(settings.series.downward_column(), "Downward_Baltics");
        assert_eq!(settings.api.get_timezone(), Some(chrono_tz::EET));
    }

    #[test]
    fn test_request_from_config() {
        let settings = SettingsConfig::default();
        let request = settings.api.request(&settings.series.activations.id);

        assert_eq!(
            request,
            TimeseriesRequest::json("normal_activations_total", "2024-09-23T00:00", "2024-09-29T00:00", "EET")
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
api:
  start_date: "2024-10-01T00:00"
  end_date: "2024-10-03T00:00"
chart:
  negate_upward: false
"#;
        let settings: SettingsConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.api.start_date, "2024-10-01T00:00");
        assert_eq!(settings.api.output_time_zone, "EET");
        assert_eq!(settings.series, SeriesConfig::default());
        assert!(!settings.chart.negate_upward);
        assert_eq!(settings.chart.title, "Imbalance and Adjustments for Baltics");
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_reversed_range() {
        let mut settings = SettingsConfig::default();
        settings.api.start_date = "2024-09-30T00:00".to_string();

        assert_eq!(settings.validate(), Err("api.start_date is after api.end_date"));
    }

    #[test]
    fn test_validate_rejects_unknown_timezone() {
        let mut settings = SettingsConfig::default();
        settings.api.output_time_zone = "Baltic/Riga".to_string();

        assert_eq!(settings.validate(), Err("api.output_time_zone is not a known time zone"));
    }

    #[test]
    fn test_validate_rejects_wrong_column_count() {
        let mut settings = SettingsConfig::default();
        settings.series.activations.columns.pop();

        assert_eq!(settings.validate(), Err("series.activations needs exactly two columns, upward first"));
        assert_eq!(settings.series.downward_column(), "");
    }

    #[test]
    fn test_validate_rejects_empty_canvas() {
        let mut settings = SettingsConfig::default();
        settings.chart.height = 0;

        assert_eq!(settings.validate(), Err("chart.width and chart.height must be positive"));
    }
}
