//! Event System
//!
//! Types for controller events: activity log entries and rendered frames.

use crate::controller::RenderFrame;
use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Worker {
    /// Periodic discovery of field labels and box identifiers.
    LabelRefresher,
    /// Periodic fetch and render of the current field's readings.
    DataRefresher,
    /// User-driven field cycling.
    Navigator,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
    /// Carries a rendered frame for the surface; never shown in the log.
    Render,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Frame to draw, only set on render events
    pub frame: Option<RenderFrame>,
}

impl Event {
    pub fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            frame: None,
        }
    }

    pub fn render(frame: RenderFrame) -> Self {
        Self {
            worker: Worker::DataRefresher,
            msg: format!("Rendered field {}", frame.field),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type: EventType::Render,
            log_level: LogLevel::Debug,
            frame: Some(frame),
        }
    }

    pub fn labels(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::LabelRefresher, msg, event_type, log_level)
    }

    pub fn data(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::DataRefresher, msg, event_type, log_level)
    }

    pub fn navigation(msg: String, log_level: LogLevel) -> Self {
        Self::new(Worker::Navigator, msg, EventType::Refresh, log_level)
    }

    pub fn should_display(&self) -> bool {
        if self.event_type == EventType::Render {
            return false;
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.worker, self.msg
        )
    }
}
