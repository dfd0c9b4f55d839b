pub mod config;
pub mod config_model;
pub mod time;
