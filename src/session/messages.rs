//! Unified messaging system for session operations

use crate::controller::RenderFrame;
use crate::endpoints::Endpoints;

// ANSI Color Codes for session messages
pub const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
pub const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
pub const COLOR_ALERT: &str = "\x1b[1;31m"; // Bold Red
pub const COLOR_RESET: &str = "\x1b[0m";

/// Session-specific message types
#[derive(Debug, Clone)]
pub enum SessionMessage {
    /// Normal session start/shutdown messages
    Info(String),
    /// Success messages for completed operations
    Success(String),
}

impl SessionMessage {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    /// Print the message with appropriate formatting
    pub fn print(&self) {
        match self {
            Self::Info(msg) => {
                println!("{}[INFO]{} {}", COLOR_INFO, COLOR_RESET, msg);
            }
            Self::Success(msg) => {
                println!("{}[SUCCESS]{} {}", COLOR_SUCCESS, COLOR_RESET, msg);
            }
        }
    }
}

pub fn print_session_starting(mode: &str, endpoints: &Endpoints) {
    SessionMessage::info(format!("Starting {} mode polling {}", mode, endpoints)).print();
}

pub fn print_session_shutdown() {
    SessionMessage::info("Shutting down...").print();
}

pub fn print_session_exit_success() {
    SessionMessage::success("Quadrant dash exited successfully").print();
}

/// One console line per quadrant the frame updated, alerting ones in red.
pub fn frame_lines(frame: &RenderFrame) -> Vec<String> {
    let mut lines = vec![format!(
        "Field {} of {}: {}",
        frame.field_index + 1,
        frame.field_count,
        frame.field
    )];
    for (slot, view) in frame.quadrants.iter().enumerate() {
        let Some(view) = view else {
            continue;
        };
        let mut line = format!("  Q{} {} | {}", slot + 1, view.title, view.parameter);
        if let Some(status) = &view.status {
            line.push_str(&format!(" | {}", status));
        }
        line.push_str(&format!(" | {}", view.staleness));
        if view.alert {
            line = format!("{}{} [STALE]{}", COLOR_ALERT, line, COLOR_RESET);
        }
        lines.push(line);
    }
    lines
}
