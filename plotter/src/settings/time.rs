use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parses the `YYYY-MM-DDTHH:MM[:SS]` dates used in the settings as wall clock time in `tz`.
pub fn parse_local_time(time: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let naive_time = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M"))
        .ok()?;

    tz.from_local_datetime(&naive_time).earliest()
}

/// Every local midnight of `tz` that falls within `start..=end`.
pub fn day_ticks(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>, tz: &Tz) -> Vec<DateTime<Tz>> {
    let mut ticks = Vec::new();
    let last_day = end.with_timezone(tz).date_naive();
    let mut day = start.with_timezone(tz).date_naive();

    while day <= last_day {
        // Skipped when a DST switch happens exactly at midnight.
        let midnight = day
            .and_hms_opt(0, 0, 0)
            .and_then(|time| tz.from_local_datetime(&time).earliest());

        if let Some(midnight) = midnight {
            if midnight >= start && midnight <= end {
                ticks.push(midnight);
            }
        }

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    ticks
}

/// Formats a unix timestamp (seconds) as the local calendar date in `tz`.
pub fn format_day(seconds: f64, tz: &Tz) -> String {
    match DateTime::<Utc>::from_timestamp(seconds.round() as i64, 0) {
        Some(time) => time.with_timezone(tz).format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eet(time: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(time).unwrap()
    }

    #[test]
    fn test_parse_local_time() {
        let time = parse_local_time("2024-09-23T00:00", &chrono_tz::EET).unwrap();
        assert_eq!(time.to_rfc3339(), "2024-09-23T00:00:00+03:00");

        let time = parse_local_time("2024-09-23T06:30:15", &chrono_tz::EET).unwrap();
        assert_eq!(time.to_rfc3339(), "2024-09-23T06:30:15+03:00");

        assert!(parse_local_time("23.09.2024", &chrono_tz::EET).is_none());
    }

    #[test]
    fn test_day_ticks_for_a_week() {
        let ticks = day_ticks(
            eet("2024-09-23T00:00:00+03:00"),
            eet("2024-09-28T23:45:00+03:00"),
            &chrono_tz::EET,
        );

        let labels: Vec<String> = ticks.iter().map(|tick| tick.format("%Y-%m-%d").to_string()).collect();
        assert_eq!(
            labels,
            vec!["2024-09-23", "2024-09-24", "2024-09-25", "2024-09-26", "2024-09-27", "2024-09-28"]
        );
    }

    #[test]
    fn test_day_ticks_skip_midnight_before_start() {
        let ticks = day_ticks(
            eet("2024-09-23T06:00:00+03:00"),
            eet("2024-09-24T06:00:00+03:00"),
            &chrono_tz::EET,
        );

        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].to_rfc3339(), "2024-09-24T00:00:00+03:00");
    }

    #[test]
    fn test_day_ticks_across_daylight_savings_end() {
        // EET falls back from +03:00 to +02:00 on 2024-10-27
        let ticks = day_ticks(
            eet("2024-10-26T00:00:00+03:00"),
            eet("2024-10-28T00:00:00+02:00"),
            &chrono_tz::EET,
        );

        let offsets: Vec<i32> = ticks.iter().map(|tick| tick.fixed_offset().offset().local_minus_utc()).collect();
        assert_eq!(offsets, vec![3 * 3600, 3 * 3600, 2 * 3600]);
    }

    #[test]
    fn test_day_ticks_in_other_timezone() {
        // The data keeps its own offset, ticks follow the requested zone
        let ticks = day_ticks(
            eet("2024-09-23T00:00:00+03:00"),
            eet("2024-09-24T03:00:00+03:00"),
            &chrono_tz::UTC,
        );

        let labels: Vec<String> = ticks.iter().map(|tick| tick.format("%Y-%m-%d %H:%M").to_string()).collect();
        assert_eq!(labels, vec!["2024-09-23 00:00", "2024-09-24 00:00"]);
    }

    #[test]
    fn test_format_day() {
        let midnight = eet("2024-09-25T00:00:00+03:00");

        assert_eq!(format_day(midnight.timestamp() as f64, &chrono_tz::EET), "2024-09-25");
        assert_eq!(format_day(midnight.timestamp() as f64, &chrono_tz::UTC), "2024-09-24");
    }
}
