//! Console output for the one-shot commands
//!
//! `labels` and `snapshot` drive a controller directly, without the
//! scheduler, and print to stdout as results arrive.

use super::messages::frame_lines;
use crate::controller::{DashboardSink, RenderFrame};
use crate::events::{Event, EventType};

/// Prints frames and displayable events to stdout, counting errors.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    frames: usize,
    errors: usize,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn errors(&self) -> usize {
        self.errors
    }
}

impl DashboardSink for ConsoleSink {
    fn render(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        for line in frame_lines(frame) {
            println!("{}", line);
        }
    }

    fn report(&mut self, event: Event) {
        if event.event_type == EventType::Error {
            self.errors += 1;
            eprintln!("{}", event);
        } else if event.should_display() {
            println!("{}", event);
        }
    }
}
