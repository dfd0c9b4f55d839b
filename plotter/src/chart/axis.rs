use std::ops::Range;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;

use crate::settings::time::{day_ticks, format_day};

/// Time axis in unix seconds whose key points are the local midnights of `tz`,
/// labeled as `%Y-%m-%d`.
pub struct DayAxis {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
    tz: Tz,
}

impl DayAxis {
    pub fn new(range: Range<f64>, tz: Tz) -> Self {
        let start = DateTime::<Utc>::from_timestamp(range.start.floor() as i64, 0);
        let end = DateTime::<Utc>::from_timestamp(range.end.ceil() as i64, 0);

        let ticks = match (start, end) {
            (Some(start), Some(end)) => day_ticks(start.fixed_offset(), end.fixed_offset(), &tz)
                .iter()
                .map(|tick| tick.timestamp() as f64)
                .collect(),
            _ => Vec::new(),
        };

        DayAxis {
            inner: range.into(),
            ticks,
            tz,
        }
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }
}

impl Ranged for DayAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        // Day lines are bold only
        if hint.weight().allow_light_points() {
            return Vec::new();
        }

        let max_points = hint.max_num_points().max(1);
        let step = (self.ticks.len() + max_points - 1) / max_points;
        self.ticks.iter().step_by(step.max(1)).copied().collect()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> Range<i32> {
        self.inner.axis_pixel_range(limit)
    }
}

impl ValueFormatter<f64> for DayAxis {
    fn format_ext(&self, value: &f64) -> String {
        format_day(*value, &self.tz)
    }
}

#[cfg(test)]
mod tests {
    use plotters::coord::ranged1d::{BoldPoints, LightPoints};

    use super::*;

    fn seconds(time: &str) -> f64 {
        DateTime::parse_from_rfc3339(time).unwrap().timestamp() as f64
    }

    fn week_axis() -> DayAxis {
        DayAxis::new(
            seconds("2024-09-23T00:00:00+03:00")..seconds("2024-09-28T23:45:00+03:00"),
            chrono_tz::EET,
        )
    }

    #[test]
    fn test_key_points_are_local_midnights() {
        let axis = week_axis();

        let points = axis.key_points(BoldPoints(10));

        let expected: Vec<f64> = [
            "2024-09-23T00:00:00+03:00",
            "2024-09-24T00:00:00+03:00",
            "2024-09-25T00:00:00+03:00",
            "2024-09-26T00:00:00+03:00",
            "2024-09-27T00:00:00+03:00",
            "2024-09-28T00:00:00+03:00",
        ]
        .iter()
        .map(|time| seconds(time))
        .collect();
        assert_eq!(points, expected);
        assert_eq!(axis.ticks(), expected.as_slice());
    }

    #[test]
    fn test_labels_are_iso_dates() {
        let axis = week_axis();

        let labels: Vec<String> = axis
            .key_points(BoldPoints(10))
            .iter()
            .map(|point| axis.format_ext(point))
            .collect();

        assert_eq!(
            labels,
            vec!["2024-09-23", "2024-09-24", "2024-09-25", "2024-09-26", "2024-09-27", "2024-09-28"]
        );
    }

    #[test]
    fn test_no_light_lines() {
        assert!(week_axis().key_points(LightPoints::new(10, 100)).is_empty());
    }

    #[test]
    fn test_midnights_across_dst_end() {
        // EEST ends on 2024-10-27, so that day lasts 25 hours
        let axis = DayAxis::new(
            seconds("2024-10-26T00:00:00+03:00")..seconds("2024-10-28T12:00:00+02:00"),
            chrono_tz::EET,
        );

        let points = axis.key_points(BoldPoints(10));

        assert_eq!(
            points,
            vec![
                seconds("2024-10-26T00:00:00+03:00"),
                seconds("2024-10-27T00:00:00+03:00"),
                seconds("2024-10-28T00:00:00+02:00"),
            ]
        );
        assert_eq!(points[2] - points[1], 25.0 * 3600.0);
    }

    #[test]
    fn test_long_ranges_are_thinned() {
        let axis = DayAxis::new(
            seconds("2024-09-01T00:00:00+03:00")..seconds("2024-09-30T00:00:00+03:00"),
            chrono_tz::EET,
        );

        let points = axis.key_points(BoldPoints(10));

        assert_eq!(axis.ticks().len(), 30);
        assert_eq!(points.len(), 10);
        assert_eq!(axis.format_ext(&points[0]), "2024-09-01");
        assert_eq!(axis.format_ext(&points[1]), "2024-09-04");
    }

    #[test]
    fn test_maps_like_a_plain_range() {
        let axis = week_axis();
        let range = axis.range();

        assert_eq!(axis.map(&range.start, (0, 1000)), 0);
        assert_eq!(axis.map(&range.end, (0, 1000)), 1000);
    }
}
