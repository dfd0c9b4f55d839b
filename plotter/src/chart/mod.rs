use std::path::PathBuf;

use thiserror::Error;

pub mod axis;
pub mod display;
pub mod font;
pub mod render;
pub mod series;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to plot, every series is empty")]
    NoData,
    #[error("No usable font found, set chart.font_path in the settings")]
    FontUnavailable,
    #[error("Failed to read font {}", .0.display())]
    FontIo(PathBuf, #[source] std::io::Error),
    #[error("Invalid font file {}", .0.display())]
    InvalidFont(PathBuf),
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}
