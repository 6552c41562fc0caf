//! Dashboard state update logic
//!
//! Applies queued controller events to the dashboard state.

use super::state::DashboardState;

use crate::controller::RenderFrame;
use crate::events::Event as WorkerEvent;

impl DashboardState {
    /// Advance the animation tick and apply every queued event.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: WorkerEvent) {
        if let Some(frame) = event.frame.as_ref() {
            self.apply_frame(frame, event.timestamp.clone());
            return;
        }
        if event.should_display() {
            self.add_to_activity_log(event);
        }
    }

    /// Replace the quadrants the frame carries and leave the others as they were.
    pub fn apply_frame(&mut self, frame: &RenderFrame, timestamp: String) {
        self.current_field = Some(frame.field.clone());
        self.field_index = frame.field_index;
        self.field_count = frame.field_count;

        for (panel, view) in self.quadrants.iter_mut().zip(frame.quadrants.iter()) {
            if let Some(view) = view {
                panel.view = Some(view.clone());
                panel.updated_at = Some(timestamp.clone());
            }
        }
        self.last_refresh = Some(timestamp);
    }
}

#[cfg(test)]
mod tests {
    use crate::controller::{QuadrantView, RenderFrame};
    use crate::endpoints::{DiscoveryMode, Endpoints};
    use crate::events::{Event, EventType};
    use crate::logging::LogLevel;
    use crate::ui::app::UIConfig;
    use crate::ui::dashboard::DashboardState;
    use std::time::Instant;

    fn state() -> DashboardState {
        DashboardState::new(
            Endpoints::new("http://localhost:5000", DiscoveryMode::Root, "/get_data"),
            Instant::now(),
            UIConfig::new(false),
        )
    }

    fn view(title: &str, alert: bool) -> QuadrantView {
        QuadrantView {
            title: title.to_string(),
            parameter: "temp: 1".to_string(),
            status: None,
            staleness: "last meas: 1 min ago".to_string(),
            alert,
        }
    }

    #[test]
    fn partial_frames_leave_other_quadrants_untouched() {
        let mut state = state();
        let mut full = RenderFrame::new("temp".into(), 0, 2);
        full.quadrants = [
            Some(view("Box A1", false)),
            Some(view("Box A2", true)),
            Some(view("Box A3", false)),
            Some(view("Box A4", false)),
        ];
        state.add_event(Event::render(full));
        state.update();
        assert_eq!(state.alert_count(), 1);

        let mut partial = RenderFrame::new("humidity".into(), 1, 2);
        partial.quadrants[1] = Some(view("Box A2", false));
        state.add_event(Event::render(partial));
        state.update();

        assert_eq!(state.current_field.as_deref(), Some("humidity"));
        assert_eq!(state.field_index, 1);
        assert_eq!(state.alert_count(), 0);
        let titles: Vec<&str> = state
            .quadrants
            .iter()
            .map(|p| p.view.as_ref().unwrap().title.as_str())
            .collect();
        assert_eq!(titles, ["Box A1", "Box A2", "Box A3", "Box A4"]);
    }

    #[test]
    fn render_events_stay_out_of_the_activity_log() {
        let mut state = state();
        state.add_event(Event::render(RenderFrame::new("temp".into(), 0, 1)));
        state.add_event(Event::labels(
            "Discovered 1 fields across 4 boxes".into(),
            EventType::Success,
            LogLevel::Info,
        ));
        state.update();
        assert_eq!(state.activity_logs.len(), 1);
        assert_eq!(state.tick, 1);
    }
}
