//! Dashboard Controller
//!
//! Owns the field list, the box list and the current field index, and turns
//! discovery and data responses into rendered quadrant frames.
//!
//! Every refresh is split in two: a fetch that needs no controller state, and
//! an `apply_*` step that takes `&mut self`. The scheduler keeps several
//! fetches in flight and applies them as they complete; the `refresh_*`
//! methods chain both halves for one-shot use.

pub mod error;
pub mod view;

pub use error::DashboardError;
pub use view::{QuadrantView, RenderFrame, is_alert};

use crate::consts::cli_consts::QUADRANT_COUNT;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::model::{BoxId, Discovery, parse_readings};
use crate::source::DataSource;
use crate::source::error::SourceError;
use serde_json::Value;

/// Where rendered frames and activity events go.
pub trait DashboardSink: Send {
    /// Draw the quadrants present in `frame`; absent slots keep their old content.
    fn render(&mut self, frame: &RenderFrame);

    /// Record an activity/diagnostic event.
    fn report(&mut self, event: Event);
}

/// Issued when a data refresh starts; handed back with the fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTicket {
    /// Sequence token, increasing with every refresh started.
    pub seq: u64,
    pub field: String,
    pub field_index: usize,
    pub field_count: usize,
}

pub struct DashboardController<S: DashboardSink> {
    field_index: usize,
    fields: Vec<String>,
    box_ids: Vec<BoxId>,
    alert_threshold_minutes: i64,
    next_seq: u64,
    last_rendered_seq: Option<u64>,
    classifier: ErrorClassifier,
    sink: S,
}

impl<S: DashboardSink> DashboardController<S> {
    pub fn new(sink: S, alert_threshold_minutes: i64) -> Self {
        Self {
            field_index: 0,
            fields: Vec::new(),
            box_ids: Vec::new(),
            alert_threshold_minutes,
            next_seq: 0,
            last_rendered_seq: None,
            classifier: ErrorClassifier::new(),
            sink,
        }
    }

    pub fn field_index(&self) -> usize {
        self.field_index
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn box_ids(&self) -> &[BoxId] {
        &self.box_ids
    }

    pub fn current_field(&self) -> Option<&str> {
        self.fields.get(self.field_index).map(String::as_str)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // =========================================================================
    // LABEL DISCOVERY
    // =========================================================================

    /// Fetch and install the field labels and box ids.
    pub async fn refresh_labels(&mut self, source: &dyn DataSource) -> bool {
        let result = source.fetch_discovery().await;
        self.apply_discovery(result)
    }

    /// Install a discovery response. Both lists are replaced together or not
    /// at all; on failure the previous lists stay in place.
    pub fn apply_discovery(&mut self, result: Result<Value, SourceError>) -> bool {
        let discovery = match result
            .map_err(DashboardError::discovery)
            .and_then(|body| {
                Discovery::from_json(body)
                    .map_err(|e| DashboardError::DiscoveryParse(e.to_string()))
            }) {
            Ok(discovery) => discovery,
            Err(e) => {
                self.report_error(Event::labels, e);
                return false;
            }
        };

        let Discovery {
            scroll_labels,
            box_ids,
        } = discovery;
        self.fields = scroll_labels;
        self.box_ids = box_ids;
        if self.field_index >= self.fields.len() {
            self.field_index = 0;
        }

        self.sink.report(Event::labels(
            format!(
                "Discovered {} fields across {} boxes",
                self.fields.len(),
                self.box_ids.len()
            ),
            EventType::Success,
            LogLevel::Info,
        ));
        true
    }

    // =========================================================================
    // DATA REFRESH
    // =========================================================================

    /// Fetch and render the current field's readings.
    pub async fn refresh_data(&mut self, source: &dyn DataSource) -> bool {
        let Some(ticket) = self.begin_data_refresh() else {
            return false;
        };
        let result = source.fetch_readings(&ticket.field).await;
        self.apply_data(ticket, result)
    }

    /// Start a data refresh, or `None` while labels or boxes are unknown.
    pub fn begin_data_refresh(&mut self) -> Option<DataTicket> {
        if self.fields.is_empty() || self.box_ids.is_empty() {
            self.sink.report(Event::data(
                "Waiting for field labels".to_string(),
                EventType::Waiting,
                LogLevel::Debug,
            ));
            return None;
        }

        let ticket = DataTicket {
            seq: self.next_seq,
            field: self.fields[self.field_index].clone(),
            field_index: self.field_index,
            field_count: self.fields.len(),
        };
        self.next_seq += 1;
        Some(ticket)
    }

    /// Render a data response for `ticket`. Returns whether anything was drawn.
    pub fn apply_data(
        &mut self,
        ticket: DataTicket,
        result: Result<Value, SourceError>,
    ) -> bool {
        if self
            .last_rendered_seq
            .is_some_and(|rendered| ticket.seq < rendered)
        {
            self.sink.report(Event::data(
                format!("Discarded out-of-order readings for {}", ticket.field),
                EventType::Refresh,
                LogLevel::Debug,
            ));
            return false;
        }

        let body = match result {
            Ok(body) => body,
            Err(e) => {
                self.report_error(Event::data, DashboardError::data(&ticket.field, e));
                return false;
            }
        };
        let readings = match parse_readings(&body) {
            Ok(readings) => readings,
            Err(e) => {
                self.report_error(Event::data, DashboardError::payload_shape(&ticket.field, e));
                return false;
            }
        };

        let mut frame = RenderFrame::new(
            ticket.field.clone(),
            ticket.field_index,
            ticket.field_count,
        );
        for (slot, reading) in readings.into_iter().enumerate().take(QUADRANT_COUNT) {
            let Some(box_id) = self.box_ids.get(slot) else {
                self.report_error(
                    Event::data,
                    DashboardError::MissingQuadrantTarget { quadrant: slot },
                );
                continue;
            };
            match reading {
                Ok(reading) => {
                    frame.quadrants[slot] = Some(QuadrantView::compose(
                        box_id,
                        &ticket.field,
                        &reading,
                        self.alert_threshold_minutes,
                    ));
                }
                Err(e) => {
                    let error = DashboardError::quadrant(&ticket.field, slot, e);
                    self.report_error(Event::data, error);
                }
            }
        }

        if frame.updated_count() == 0 {
            return false;
        }

        self.last_rendered_seq = Some(ticket.seq);
        self.sink.render(&frame);
        self.sink.report(Event::data(
            format!(
                "Refreshed {}: {} quadrants, {} in alert",
                frame.field,
                frame.updated_count(),
                frame.alert_count()
            ),
            EventType::Refresh,
            LogLevel::Debug,
        ));
        true
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Move to the next field, wrapping. No-op without fields.
    pub fn advance_field(&mut self) -> bool {
        let count = self.fields.len();
        if count == 0 {
            return false;
        }
        self.field_index = (self.field_index + 1) % count;
        self.report_navigation();
        true
    }

    /// Move to the previous field, wrapping. No-op without fields.
    pub fn retreat_field(&mut self) -> bool {
        let count = self.fields.len();
        if count == 0 {
            return false;
        }
        self.field_index = (self.field_index + count - 1) % count;
        self.report_navigation();
        true
    }

    /// Jump to a field by label. Unknown labels leave the index unchanged.
    pub fn select_field(&mut self, label: &str) -> bool {
        let Some(index) = self.fields.iter().position(|f| f == label) else {
            return false;
        };
        self.field_index = index;
        self.report_navigation();
        true
    }

    /// Advance, then refresh the quadrants for the new field.
    pub async fn next_field(&mut self, source: &dyn DataSource) -> bool {
        self.advance_field() && self.refresh_data(source).await
    }

    /// Retreat, then refresh the quadrants for the new field.
    pub async fn previous_field(&mut self, source: &dyn DataSource) -> bool {
        self.retreat_field() && self.refresh_data(source).await
    }

    fn report_navigation(&mut self) {
        let msg = format!(
            "Field {} of {}: {}",
            self.field_index + 1,
            self.fields.len(),
            self.fields[self.field_index]
        );
        self.sink.report(Event::navigation(msg, LogLevel::Info));
    }

    fn report_error(
        &mut self,
        make_event: fn(String, EventType, LogLevel) -> Event,
        error: DashboardError,
    ) {
        let level = self.classifier.classify(&error);
        self.sink
            .report(make_event(error.to_string(), EventType::Error, level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockDataSource;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Sink that keeps everything it is given.
    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<RenderFrame>,
        events: Vec<Event>,
    }

    impl DashboardSink for RecordingSink {
        fn render(&mut self, frame: &RenderFrame) {
            self.frames.push(frame.clone());
        }

        fn report(&mut self, event: Event) {
            self.events.push(event);
        }
    }

    impl RecordingSink {
        fn errors(&self) -> Vec<&Event> {
            self.events
                .iter()
                .filter(|e| e.event_type == EventType::Error)
                .collect()
        }
    }

    fn controller() -> DashboardController<RecordingSink> {
        DashboardController::new(RecordingSink::default(), 5)
    }

    fn discovered(labels: &[&str]) -> DashboardController<RecordingSink> {
        let mut controller = controller();
        assert!(controller.apply_discovery(Ok(json!({
            "scroll_labels": labels,
            "box_ids": ["A1", "A2", "A3", "A4"]
        }))));
        controller
    }

    fn network_error() -> SourceError {
        SourceError::Http {
            status: 503,
            message: "unavailable".to_string(),
        }
    }

    fn mixed_payload() -> Value {
        json!({
            "box1": {"value": 21.5, "time_diff": 3},
            "box2": {"value": 22.1, "time_diff": 9},
            "box3": {"value": 20.0, "status": "ok", "time_diff": 5},
            "box4": {"value": 19.8, "time_diff": 6}
        })
    }

    #[test]
    fn starts_empty_at_index_zero() {
        let controller = controller();
        assert_eq!(controller.field_index(), 0);
        assert!(controller.fields().is_empty());
        assert!(controller.box_ids().is_empty());
        assert_eq!(controller.current_field(), None);
    }

    #[test]
    fn advancing_len_times_returns_to_start() {
        for n in 1..=6 {
            let labels: Vec<String> = (0..n).map(|i| format!("f{}", i)).collect();
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            let mut controller = discovered(&labels);
            for start in 0..n {
                while controller.field_index() != start {
                    controller.advance_field();
                }
                for _ in 0..n {
                    assert!(controller.advance_field());
                }
                assert_eq!(controller.field_index(), start);
                for _ in 0..n {
                    assert!(controller.retreat_field());
                }
                assert_eq!(controller.field_index(), start);
            }
        }
    }

    #[test]
    fn advance_then_retreat_is_identity() {
        let mut controller = discovered(&["a", "b", "c"]);
        for start in 0..3 {
            while controller.field_index() != start {
                controller.advance_field();
            }
            controller.advance_field();
            controller.retreat_field();
            assert_eq!(controller.field_index(), start);
            controller.retreat_field();
            controller.advance_field();
            assert_eq!(controller.field_index(), start);
        }
    }

    #[test]
    fn retreat_from_zero_wraps_to_last() {
        let mut controller = discovered(&["a", "b", "c"]);
        assert!(controller.retreat_field());
        assert_eq!(controller.field_index(), 2);
        assert_eq!(controller.current_field(), Some("c"));
    }

    #[test]
    fn navigation_without_fields_is_a_no_op() {
        let mut controller = controller();
        assert!(!controller.advance_field());
        assert!(!controller.retreat_field());
        assert_eq!(controller.field_index(), 0);
        assert!(controller.sink().events.is_empty());
    }

    #[test]
    fn select_field_jumps_by_label() {
        let mut controller = discovered(&["temp", "humidity", "CO2"]);
        assert!(controller.select_field("CO2"));
        assert_eq!(controller.field_index(), 2);
        assert!(!controller.select_field("pressure"));
        assert_eq!(controller.field_index(), 2);
    }

    #[test]
    fn discovery_installs_lists_and_first_refresh_uses_index_zero() {
        let mut controller = controller();
        assert!(controller.apply_discovery(Ok(json!({
            "scroll_labels": ["temp", "humidity"],
            "box_ids": ["A1", "A2", "A3", "A4"]
        }))));
        assert_eq!(controller.fields(), ["temp", "humidity"]);
        let ids: Vec<&str> = controller.box_ids().iter().map(BoxId::as_str).collect();
        assert_eq!(ids, ["A1", "A2", "A3", "A4"]);

        let ticket = controller.begin_data_refresh().unwrap();
        assert_eq!(ticket.field, "temp");
        assert_eq!(ticket.field_index, 0);
    }

    #[test]
    fn failed_discovery_keeps_previous_lists() {
        let mut controller = controller();
        assert!(!controller.apply_discovery(Err(network_error())));
        assert!(controller.fields().is_empty());
        assert!(controller.box_ids().is_empty());

        let mut controller = discovered(&["temp", "humidity"]);
        assert!(!controller.apply_discovery(Err(network_error())));
        assert!(!controller.apply_discovery(Ok(json!({"scroll_labels": ["x"]}))));
        assert_eq!(controller.fields(), ["temp", "humidity"]);
        assert_eq!(controller.box_ids().len(), 4);
        assert_eq!(controller.sink().errors().len(), 2);
    }

    #[test]
    fn shrinking_discovery_clamps_the_index() {
        let mut controller = discovered(&["a", "b", "c"]);
        controller.retreat_field();
        assert_eq!(controller.field_index(), 2);

        controller.apply_discovery(Ok(json!({
            "scroll_labels": ["a"],
            "box_ids": ["A1", "A2", "A3", "A4"]
        })));
        assert_eq!(controller.field_index(), 0);
        assert_eq!(controller.current_field(), Some("a"));
    }

    #[test]
    fn data_refresh_is_guarded_until_labels_arrive() {
        let mut controller = controller();
        assert_eq!(controller.begin_data_refresh(), None);

        controller.apply_discovery(Ok(json!({"scroll_labels": ["temp"], "box_ids": []})));
        assert_eq!(controller.begin_data_refresh(), None);
        assert!(controller.sink().frames.is_empty());
    }

    #[test]
    fn mixed_ages_render_with_and_without_alert() {
        let mut controller = discovered(&["temp", "humidity"]);
        let ticket = controller.begin_data_refresh().unwrap();
        assert!(controller.apply_data(ticket, Ok(mixed_payload())));

        let frame = &controller.sink().frames[0];
        let views: Vec<&QuadrantView> = frame.quadrants.iter().flatten().collect();
        assert_eq!(views.len(), 4);
        assert_eq!(views[0].title, "Box A1");
        assert_eq!(views[0].parameter, "temp: 21.5");
        assert!(!views[0].alert);
        assert!(views[1].alert);
        // exactly five minutes is not stale yet
        assert!(!views[2].alert);
        assert_eq!(views[2].status.as_deref(), Some("status: ok"));
        assert!(views[3].alert);
    }

    #[test]
    fn routine_refresh_summary_stays_at_debug() {
        let mut controller = discovered(&["temp"]);
        let ticket = controller.begin_data_refresh().unwrap();
        assert!(controller.apply_data(ticket, Ok(mixed_payload())));

        let summary = controller
            .sink()
            .events
            .iter()
            .find(|e| e.msg.starts_with("Refreshed temp"))
            .unwrap();
        assert_eq!(summary.event_type, EventType::Refresh);
        assert_eq!(summary.log_level, LogLevel::Debug);
    }

    #[test]
    fn failed_data_fetch_changes_nothing() {
        let mut controller = discovered(&["temp", "humidity"]);
        let ticket = controller.begin_data_refresh().unwrap();
        controller.apply_data(ticket, Ok(mixed_payload()));
        controller.advance_field();

        let ticket = controller.begin_data_refresh().unwrap();
        assert!(!controller.apply_data(ticket, Err(network_error())));
        assert_eq!(controller.sink().frames.len(), 1);
        assert_eq!(controller.field_index(), 1);
        assert_eq!(controller.fields(), ["temp", "humidity"]);
    }

    #[test]
    fn malformed_quadrants_are_skipped_individually() {
        let mut controller = discovered(&["temp"]);
        let ticket = controller.begin_data_refresh().unwrap();
        let payload = json!({
            "box1": {"value": 21.5, "time_diff": 3},
            "box2": {"time_diff": 9},
            "box3": [1, 2],
            "box4": "Error"
        });
        assert!(controller.apply_data(ticket, Ok(payload)));

        let frame = &controller.sink().frames[0];
        assert!(frame.quadrants[0].is_some());
        assert!(frame.quadrants[1].is_none());
        assert!(frame.quadrants[2].is_none());
        assert_eq!(
            frame.quadrants[3].as_ref().map(|v| v.parameter.as_str()),
            Some("temp: Error")
        );
        assert_eq!(controller.sink().errors().len(), 2);
    }

    #[test]
    fn non_object_payload_renders_nothing() {
        let mut controller = discovered(&["temp"]);
        let ticket = controller.begin_data_refresh().unwrap();
        assert!(!controller.apply_data(ticket, Ok(json!("oops"))));
        assert!(controller.sink().frames.is_empty());
        assert_eq!(controller.sink().errors().len(), 1);
    }

    #[test]
    fn short_box_list_skips_unbound_quadrants() {
        let mut controller = controller();
        controller.apply_discovery(Ok(json!({
            "scroll_labels": ["temp"],
            "box_ids": [1, 2]
        })));
        let ticket = controller.begin_data_refresh().unwrap();
        assert!(controller.apply_data(ticket, Ok(mixed_payload())));

        let frame = &controller.sink().frames[0];
        assert_eq!(frame.updated_count(), 2);
        assert_eq!(frame.quadrants[1].as_ref().unwrap().title, "Box 2");
        let warnings: Vec<&Event> = controller
            .sink()
            .errors()
            .into_iter()
            .filter(|e| e.log_level == LogLevel::Warn)
            .collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].msg.contains("Quadrant 3"));
    }

    #[test]
    fn stale_completion_does_not_overwrite_newer_render() {
        let mut controller = discovered(&["temp", "humidity"]);
        let older = controller.begin_data_refresh().unwrap();
        controller.advance_field();
        let newer = controller.begin_data_refresh().unwrap();
        assert!(newer.seq > older.seq);

        assert!(controller.apply_data(newer, Ok(mixed_payload())));
        assert!(!controller.apply_data(older, Ok(mixed_payload())));
        let frames = &controller.sink().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].field, "humidity");
    }

    #[tokio::test]
    async fn startup_sequence_discovers_then_refreshes() {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let seen = requested.clone();

        let mut source = MockDataSource::new();
        source.expect_fetch_discovery().times(1).returning(|| {
            Ok(json!({
                "scroll_labels": ["temp", "humidity"],
                "box_ids": ["A1", "A2", "A3", "A4"]
            }))
        });
        source.expect_fetch_readings().returning(move |field| {
            seen.lock().unwrap().push(field.to_string());
            Ok(json!({
                "box1": {"value": 21.5, "time_diff": 3},
                "box2": {"value": 22.1, "time_diff": 9},
                "box3": 20.0,
                "box4": 19.0
            }))
        });

        let mut controller = controller();
        assert!(controller.refresh_labels(&source).await);
        assert!(controller.refresh_data(&source).await);
        assert!(controller.next_field(&source).await);
        assert!(controller.previous_field(&source).await);

        assert_eq!(*requested.lock().unwrap(), ["temp", "humidity", "temp"]);
        assert_eq!(controller.sink().frames.len(), 3);
    }

    #[tokio::test]
    async fn refresh_after_failed_discovery_makes_no_request() {
        let mut source = MockDataSource::new();
        source.expect_fetch_discovery().returning(|| {
            Err(SourceError::Http {
                status: 500,
                message: String::new(),
            })
        });
        source.expect_fetch_readings().never();

        let mut controller = controller();
        assert!(!controller.refresh_labels(&source).await);
        assert!(!controller.refresh_data(&source).await);
        assert!(!controller.next_field(&source).await);
        assert_eq!(controller.field_index(), 0);
    }
}
