use std::path::PathBuf;

use anyhow::Context;
use transparency_api::{DashboardClient, TableError, TimeseriesTable, FROM_COLUMN};

use crate::{
    chart::{display::show_chart, render::render_chart, series::ChartData},
    settings::config_model::{ApiConfig, SeriesSpec, SettingsConfig},
};

pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Renames the raw `_from` column to `Timestamp`.
pub fn shape(mut table: TimeseriesTable) -> Result<TimeseriesTable, TableError> {
    table.rename_column(FROM_COLUMN, TIMESTAMP_COLUMN)?;
    Ok(table)
}

pub fn fetch_series(client: &DashboardClient, api: &ApiConfig, series: &SeriesSpec) -> Result<TimeseriesTable, anyhow::Error> {
    info!(
        "Fetching {} for interval {} - {} in time zone {}",
        &series.id, &api.start_date, &api.end_date, &api.output_time_zone
    );

    let request = api.request(&series.id);
    let table = client
        .fetch_timeseries_data(&request, &series.column_refs())
        .with_context(|| format!("Fetching series {} failed", series.id))?;

    info!("Fetched {} rows of {} from {}", table.row_count(), &series.id, client.url());

    shape(table).with_context(|| format!("Shaping series {} failed", series.id))
}

pub fn run(config: &SettingsConfig) -> Result<PathBuf, anyhow::Error> {
    run_with_client(&DashboardClient::new(&config.api.url), config)
}

/// Fetches both series in turn, renders the chart and returns the written path.
pub fn run_with_client(client: &DashboardClient, config: &SettingsConfig) -> Result<PathBuf, anyhow::Error> {
    let tz = config
        .api
        .get_timezone()
        .with_context(|| format!("Unknown time zone {}", config.api.output_time_zone))?;

    let imbalance = fetch_series(client, &config.api, &config.series.imbalance)?;
    let activations = fetch_series(client, &config.api, &config.series.activations)?;

    let data = ChartData::from_tables(&imbalance, &activations, &config.series, config.chart.negate_upward)
        .context("Fetched data is missing a configured column")?;

    render_chart(&data, &config.chart, &tz)
        .with_context(|| format!("Rendering {} failed", config.chart.output_file.display()))?;
    info!("Chart written to {}", config.chart.output_file.display());

    if config.chart.show {
        show_chart(&config.chart.output_file);
    }

    Ok(config.chart.output_file.clone())
}
