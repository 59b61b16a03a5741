//! Timestamp and duration formatting

use std::time::Duration;

use chrono::{Local, NaiveTime, Timelike};

/// Current local time as `HH:MM:SS`
pub fn current_time() -> String {
    format_time(Local::now().time())
}

pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())
}

const UNITS: [(&str, u128); 6] = [
    ("h", 3_600_000_000_000),
    ("min", 60_000_000_000),
    ("s", 1_000_000_000),
    ("ms", 1_000_000),
    ("μs", 1_000),
    ("ns", 1),
];

/// Human readable duration in the largest fitting unit: `850 μs`, `12 ms`, `1.53 s`
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    let (unit, size) = UNITS
        .iter()
        .copied()
        .find(|(_, size)| nanos >= *size)
        .unwrap_or(("ns", 1));

    let value = nanos as f64 / size as f64;
    let rendered = if nanos == 0 {
        "0".to_string()
    } else if value >= 10.0 {
        format!("{}", value.round() as u64)
    } else {
        let rounded = format!("{value:.2}");
        rounded
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    };
    format!("{rendered} {unit}")
}
