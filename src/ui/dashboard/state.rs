//! Dashboard state management
//!
//! Holds what the surface currently shows: the last rendered view of each
//! quadrant, the active field and the activity log.

use crate::consts::cli_consts::{MAX_ACTIVITY_LOGS, QUADRANT_COUNT};
use crate::controller::QuadrantView;
use crate::endpoints::Endpoints;
use crate::events::Event as WorkerEvent;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// Last rendering of one quadrant slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadrantPanel {
    /// `None` until the first successful render of this slot.
    pub view: Option<QuadrantView>,
    /// Timestamp of the refresh that produced `view`.
    pub updated_at: Option<String>,
}

#[derive(Debug)]
pub struct DashboardState {
    /// The data source being polled.
    pub endpoints: Endpoints,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Field the quadrants were last rendered for.
    pub current_field: Option<String>,
    /// Position of `current_field` in the field list.
    pub field_index: usize,
    /// Length of the field list at the last render.
    pub field_count: usize,
    pub quadrants: [QuadrantPanel; QUADRANT_COUNT],
    /// Timestamp of the last successful render
    pub last_refresh: Option<String>,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(endpoints: Endpoints, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            endpoints,
            start_time,
            current_field: None,
            field_index: 0,
            field_count: 0,
            quadrants: Default::default(),
            last_refresh: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    pub fn alert_count(&self) -> usize {
        self.quadrants
            .iter()
            .filter_map(|panel| panel.view.as_ref())
            .filter(|view| view.alert)
            .count()
    }
}
