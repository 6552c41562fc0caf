//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use ratatui::prelude::Color;

/// Color used for a worker's log lines.
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::LabelRefresher => Color::Cyan,
        Worker::DataRefresher => Color::Green,
        Worker::Navigator => Color::Yellow,
    }
}

/// Shorten a "YYYY-MM-DD HH:MM:SS" timestamp to "MM-DD HH:MM:SS".
pub fn format_compact_timestamp(timestamp: &str) -> String {
    let mut parts = timestamp.splitn(2, ' ');
    match (parts.next().and_then(|date| date.get(5..10)), parts.next()) {
        (Some(month_day), Some(time)) => format!("{} {}", month_day, time),
        _ => timestamp.to_string(),
    }
}

/// Collapse verbose transport errors into one short line.
pub fn clean_http_error_message(msg: &str) -> String {
    if !msg.contains("error sending request") && !msg.contains("reqwest::Error") {
        return msg.to_string();
    }
    let prefix = msg.split(':').next().unwrap_or(msg);
    if msg.contains("timed out") || msg.contains("TimedOut") {
        format!("{}: request timed out", prefix)
    } else {
        format!("{}: data source unreachable", prefix)
    }
}
