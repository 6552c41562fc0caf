//! Payload normalization
//!
//! Shapes the raw JSON bodies of the discovery and data endpoints into typed
//! values. The data endpoint is known to answer in two shapes per box, a bare
//! value or `{ value, status?, time_diff? }`; both normalize to
//! [`QuadrantReading`].

use crate::consts::cli_consts::QUADRANT_COUNT;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Display label of a physical box. Sent as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawBoxId")]
pub struct BoxId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBoxId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawBoxId> for BoxId {
    fn from(raw: RawBoxId) -> Self {
        match raw {
            RawBoxId::Text(text) => BoxId::new(text),
            RawBoxId::Number(number) => BoxId::new(number.to_string()),
        }
    }
}

impl BoxId {
    pub fn new(id: impl Into<String>) -> Self {
        BoxId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BoxId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of the discovery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Discovery {
    pub scroll_labels: Vec<String>,
    pub box_ids: Vec<BoxId>,
}

impl Discovery {
    pub fn from_json(body: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(body)
    }
}

/// One box's latest measurement of the current field.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadrantReading {
    pub value: Value,
    pub status: Option<String>,
    /// Minutes since the measurement; unknown for the bare-value shape.
    pub time_diff_minutes: Option<i64>,
}

impl QuadrantReading {
    /// Value as shown on screen: strings unquoted, `null` as `n/a`.
    pub fn display_value(&self) -> String {
        scalar_text(&self.value).unwrap_or_else(|| self.value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadrantParseError {
    #[error("key '{0}' is missing")]
    MissingKey(String),

    #[error("object has no 'value'")]
    MissingValue,

    #[error("time_diff {0} is not a number of minutes")]
    InvalidTimeDiff(Value),

    #[error("unsupported reading shape: {0}")]
    UnsupportedShape(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("readings payload is not a JSON object")]
pub struct PayloadShapeError;

/// Per-slot outcome of parsing a data payload.
pub type QuadrantResult = Result<QuadrantReading, QuadrantParseError>;

/// Key of a quadrant slot in the data payload: slot 0 is `box1`.
pub fn quadrant_key(slot: usize) -> String {
    format!("box{}", slot + 1)
}

/// Splits a data payload into the four quadrant readings.
///
/// Fails as a whole only when the body is not an object; otherwise every
/// slot is parsed independently so one bad box never hides the others.
pub fn parse_readings(
    body: &Value,
) -> Result<[QuadrantResult; QUADRANT_COUNT], PayloadShapeError> {
    let object = body.as_object().ok_or(PayloadShapeError)?;
    Ok(std::array::from_fn(|slot| {
        let key = quadrant_key(slot);
        match object.get(&key) {
            Some(entry) => parse_reading(entry),
            None => Err(QuadrantParseError::MissingKey(key)),
        }
    }))
}

/// Normalizes one `boxN` entry.
pub fn parse_reading(entry: &Value) -> QuadrantResult {
    match entry {
        Value::Object(fields) => {
            let value = fields
                .get("value")
                .cloned()
                .ok_or(QuadrantParseError::MissingValue)?;
            if value.is_object() || value.is_array() {
                return Err(QuadrantParseError::UnsupportedShape("nested value"));
            }
            let status = fields.get("status").and_then(scalar_text_opt);
            let time_diff_minutes = match fields.get("time_diff") {
                None | Some(Value::Null) => None,
                Some(raw) => Some(parse_minutes(raw)?),
            };
            Ok(QuadrantReading {
                value,
                status,
                time_diff_minutes,
            })
        }
        Value::Array(_) => Err(QuadrantParseError::UnsupportedShape("array")),
        Value::Null => Err(QuadrantParseError::UnsupportedShape("null")),
        scalar => Ok(QuadrantReading {
            value: scalar.clone(),
            status: None,
            time_diff_minutes: None,
        }),
    }
}

fn parse_minutes(raw: &Value) -> Result<i64, QuadrantParseError> {
    let minutes = match raw {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|m| m.is_finite()).map(|m| m.ceil() as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    minutes.ok_or_else(|| QuadrantParseError::InvalidTimeDiff(raw.clone()))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some("n/a".to_string()),
        _ => None,
    }
}

// Status text drops nulls entirely instead of rendering "n/a".
fn scalar_text_opt(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => scalar_text(other),
    }
}
