use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::settings::config_model::SettingsConfig;

pub const DEFAULT_CONFIG_PATH: &str = "configs/plot.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to deserialize config.")]
    Serde(#[from] serde_yaml::Error),
    #[error("Failed to open config file")]
    Io(#[from] std::io::Error),
    #[error("Invalid value {value:?} for {key}")]
    Env { key: &'static str, value: String },
    #[error("Invalid settings: {0}")]
    Invalid(&'static str),
}

pub fn load_settings(path: impl AsRef<Path>) -> Result<SettingsConfig, ConfigError> {
    info!("Loading {}", path.as_ref().to_string_lossy());
    let mut file = File::open(path)?;
    let mut s = String::new();
    file.read_to_string(&mut s)?;
    let t: SettingsConfig = serde_yaml::from_str(&s)?;

    Ok(t)
}

/// Settings file if present, built-in defaults otherwise, then `.env`/environment overrides.
pub fn load_with_overrides(path: impl AsRef<Path>) -> Result<SettingsConfig, ConfigError> {
    let mut settings = if path.as_ref().exists() {
        load_settings(path)?
    } else {
        info!(
            "No settings file at {}, using defaults",
            path.as_ref().to_string_lossy()
        );
        SettingsConfig::default()
    };

    apply_overrides(&mut settings, |key| dotenv::var(key).ok())?;
    settings.validate().map_err(ConfigError::Invalid)?;

    Ok(settings)
}

pub fn apply_overrides<F>(settings: &mut SettingsConfig, var: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(start) = var("START") {
        settings.api.start_date = start;
    }

    if let Some(stop) = var("STOP") {
        settings.api.end_date = stop;
    }

    if let Some(output_file) = var("OUTPUT_FILE") {
        settings.chart.output_file = PathBuf::from(output_file);
    }

    if let Some(show) = var("SHOW_CHART") {
        settings.chart.show = show.parse::<bool>().map_err(|_| ConfigError::Env {
            key: "SHOW_CHART",
            value: show.clone(),
        })?;
    }

    Ok(())
}
