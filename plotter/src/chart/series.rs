use std::ops::Range;

use chrono::{DateTime, FixedOffset};
use transparency_api::{TableError, TimeseriesTable};

use crate::settings::config_model::SeriesConfig;

/// `(unix seconds, value)` in chart coordinates.
pub type Point = (f64, f64);

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    /// Line pieces, split wherever a value is missing.
    pub segments: Vec<Vec<Point>>,
    pub markers: Vec<Point>,
}

impl PlotSeries {
    /// `mask` selects the samples that also get a marker; missing values never do.
    pub fn new(
        label: &str,
        series: &[(DateTime<FixedOffset>, Option<f64>)],
        mask: Option<&[bool]>,
        sign: f64,
    ) -> Self {
        let mut segments = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for (time, value) in series {
            match value {
                Some(value) => current.push((to_x(time), sign * value)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        let markers = match mask {
            Some(mask) => series
                .iter()
                .zip(mask)
                .filter(|(_, selected)| **selected)
                .filter_map(|((time, value), _)| value.map(|value| (to_x(time), sign * value)))
                .collect(),
            None => Vec::new(),
        };

        PlotSeries {
            label: label.to_string(),
            segments,
            markers,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.segments.iter().flatten().chain(self.markers.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub imbalance: PlotSeries,
    pub upward: PlotSeries,
    pub downward: PlotSeries,
}

impl ChartData {
    pub fn from_tables(
        imbalance: &TimeseriesTable,
        activations: &TimeseriesTable,
        columns: &SeriesConfig,
        negate_upward: bool,
    ) -> Result<Self, TableError> {
        let upward_mask = activations.non_zero_mask(columns.upward_column())?;
        let downward_mask = activations.non_zero_mask(columns.downward_column())?;
        let upward_sign = if negate_upward { -1.0 } else { 1.0 };

        Ok(ChartData {
            imbalance: PlotSeries::new(
                "Imbalance",
                &imbalance.series(columns.imbalance_column())?,
                None,
                1.0,
            ),
            upward: PlotSeries::new(
                "Upward Activation",
                &activations.series(columns.upward_column())?,
                Some(&upward_mask),
                upward_sign,
            ),
            downward: PlotSeries::new(
                "Downward Activation",
                &activations.series(columns.downward_column())?,
                Some(&downward_mask),
                1.0,
            ),
        })
    }

    /// Data extent with 5% vertical headroom, or `None` when nothing can be drawn.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self
            .imbalance
            .points()
            .chain(self.upward.points())
            .chain(self.downward.points())
            .peekable();
        let first = **points.peek()?;

        let (x_min, x_max, y_min, y_max) = points.fold(
            (first.0, first.0, first.1, first.1),
            |(x_min, x_max, y_min, y_max), (x, y)| (x_min.min(*x), x_max.max(*x), y_min.min(*y), y_max.max(*y)),
        );

        let x = if x_max > x_min {
            x_min..x_max
        } else {
            (x_min - 1800.0)..(x_max + 1800.0)
        };

        let y_pad = if y_max > y_min { (y_max - y_min) * 0.05 } else { 1.0 };

        Some(Bounds {
            x,
            y: (y_min - y_pad)..(y_max + y_pad),
        })
    }
}

pub fn to_x(time: &DateTime<FixedOffset>) -> f64 {
    time.timestamp() as f64
}
