//! Quadrant presentation
//!
//! Pure functions from (box, field, reading) to what a quadrant shows.

use crate::consts::cli_consts::QUADRANT_COUNT;
use crate::model::{BoxId, QuadrantReading};

/// Alert policy: a reading is stale when it is strictly older than
/// `threshold_minutes`. Readings of unknown age never alert.
pub fn is_alert(time_diff_minutes: Option<i64>, threshold_minutes: i64) -> bool {
    matches!(time_diff_minutes, Some(minutes) if minutes > threshold_minutes)
}

/// Everything one quadrant displays after a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadrantView {
    pub title: String,
    pub parameter: String,
    pub status: Option<String>,
    pub staleness: String,
    pub alert: bool,
}

impl QuadrantView {
    pub fn compose(
        box_id: &BoxId,
        field: &str,
        reading: &QuadrantReading,
        threshold_minutes: i64,
    ) -> Self {
        let staleness = match reading.time_diff_minutes {
            Some(minutes) => format!("last meas: {} min ago", minutes),
            None => "last meas: unknown".to_string(),
        };
        Self {
            title: format!("Box {}", box_id),
            parameter: format!("{}: {}", field, reading.display_value()),
            status: reading.status.as_ref().map(|s| format!("status: {}", s)),
            staleness,
            alert: is_alert(reading.time_diff_minutes, threshold_minutes),
        }
    }
}

/// One refresh's worth of quadrant updates.
///
/// A `None` slot was not refreshed this cycle and keeps whatever the surface
/// showed before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub field: String,
    pub field_index: usize,
    pub field_count: usize,
    pub quadrants: [Option<QuadrantView>; QUADRANT_COUNT],
}

impl RenderFrame {
    pub fn new(field: String, field_index: usize, field_count: usize) -> Self {
        Self {
            field,
            field_index,
            field_count,
            quadrants: Default::default(),
        }
    }

    /// Number of quadrants this frame actually updates.
    pub fn updated_count(&self) -> usize {
        self.quadrants.iter().filter(|q| q.is_some()).count()
    }

    pub fn alert_count(&self) -> usize {
        self.quadrants
            .iter()
            .flatten()
            .filter(|view| view.alert)
            .count()
    }
}
