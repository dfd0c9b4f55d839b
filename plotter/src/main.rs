#[macro_use]
extern crate log;

use dotenv::dotenv;

use crate::settings::config::{load_with_overrides, DEFAULT_CONFIG_PATH};

mod app;
mod chart;
mod logging;
mod settings;

fn main() {
    dotenv().ok();

    logging::init_logging();

    info!("Balancing plotter starting");

    let config_path = dotenv::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_with_overrides(&config_path) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load settings from {}: {}", config_path, err);
            std::process::exit(1);
        }
    };

    info!("Using time zone: {}", config.api.output_time_zone);

    match app::run(&config) {
        Ok(path) => info!("Done, chart saved to {}", path.display()),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(1);
        }
    }
}
