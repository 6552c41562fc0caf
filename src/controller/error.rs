//! Errors raised by the refresh operations
//!
//! None of these escape the controller: each is reported as an event and the
//! operation that produced it simply ends.

use crate::model::{PayloadShapeError, QuadrantParseError};
use crate::source::error::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The discovery endpoint could not be reached or answered with an error.
    #[error("Discovery fetch failed: {0}")]
    DiscoveryFetch(SourceError),

    /// The discovery body was not the expected `{ scroll_labels, box_ids }`.
    #[error("Discovery payload malformed: {0}")]
    DiscoveryParse(String),

    /// The data endpoint could not be reached or answered with an error.
    #[error("Data fetch for '{field}' failed: {source}")]
    DataFetch { field: String, source: SourceError },

    /// The data body, or one quadrant's entry in it, was malformed.
    #[error("{}", describe_parse(.field, .quadrant, .reason))]
    DataParse {
        field: String,
        quadrant: Option<usize>,
        reason: String,
    },

    /// No box identifier is bound to this quadrant slot.
    #[error("Quadrant {} has no box id, skipping", .quadrant + 1)]
    MissingQuadrantTarget { quadrant: usize },
}

fn describe_parse(field: &str, quadrant: &Option<usize>, reason: &str) -> String {
    match *quadrant {
        Some(slot) => format!("Data for '{}' in quadrant {}: {}", field, slot + 1, reason),
        None => format!("Data payload for '{}' malformed: {}", field, reason),
    }
}

impl DashboardError {
    pub fn discovery(error: SourceError) -> Self {
        match error {
            SourceError::Decode(e) => DashboardError::DiscoveryParse(e.to_string()),
            other => DashboardError::DiscoveryFetch(other),
        }
    }

    pub fn data(field: &str, error: SourceError) -> Self {
        match error {
            SourceError::Decode(e) => DashboardError::DataParse {
                field: field.to_string(),
                quadrant: None,
                reason: e.to_string(),
            },
            other => DashboardError::DataFetch {
                field: field.to_string(),
                source: other,
            },
        }
    }

    pub fn payload_shape(field: &str, error: PayloadShapeError) -> Self {
        DashboardError::DataParse {
            field: field.to_string(),
            quadrant: None,
            reason: error.to_string(),
        }
    }

    pub fn quadrant(field: &str, slot: usize, error: QuadrantParseError) -> Self {
        DashboardError::DataParse {
            field: field.to_string(),
            quadrant: Some(slot),
            reason: error.to_string(),
        }
    }
}
