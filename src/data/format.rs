//! Display formatting for timestamps, status labels and metrics.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use statuswatch_types::{Status, StatusSample};

/// Shown in tooltips for samples without a timestamp.
pub const UNKNOWN_TIME: &str = "unknown time";

/// Local-time layout for timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a backend timestamp in local time.
///
/// Accepts RFC 3339 and `YYYY-MM-DD HH:MM:SS` (read as local time). Anything
/// else is returned verbatim.
pub fn format_timestamp(timestamp: &str) -> String {
    let trimmed = timestamp.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT) {
        if let Some(local) = Local.from_local_datetime(&naive).earliest() {
            return local.format(TIMESTAMP_FORMAT).to_string();
        }
    }

    timestamp.to_string()
}

/// Heartbeat label: anything other than `up` counts as a fault.
pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Up => "normal",
        Status::Down | Status::Unknown => "fault",
    }
}

/// Tooltip for a heartbeat cell, e.g. `2024-05-01 10:00:00: normal`.
pub fn sample_tooltip(sample: &StatusSample) -> String {
    let time = sample
        .timestamp
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_else(|| UNKNOWN_TIME.to_string());
    format!("{}: {}", time, status_label(sample.status))
}

/// Format an uptime percentage (e.g. 99.5 -> "99.5%", 100.0 -> "100%").
pub fn format_uptime(uptime: f64) -> String {
    let text = format!("{:.2}", uptime);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", text)
}

/// Format an optional percentage with one decimal, "-" when absent.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "-".to_string(),
    }
}

/// Format a byte count with binary units (e.g. 1536 -> "1.5 KB").
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = "B";
    for &next in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{:.1} {}", value, unit)
}

/// Format elapsed time coarsely (e.g. "12s ago", "3m ago", "2h ago").
pub fn format_ago(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}
