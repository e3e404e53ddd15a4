use serde::{Deserialize, Serialize};

use crate::explore::ExploreSettings;
use crate::gnss::Position;
use crate::heading::SensorReading;

/// One newline-delimited JSON command from the UI layer.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Orientation(SensorReading),
    AbsoluteOrientation(SensorReading),
    /// Raw text as typed, validated by the heading model.
    Manual { value: serde_json::Value },
    Click { dx: f64, dy: f64 },
    Position(Position),
    Settings(ExploreSettings),
    Explore,
    Status,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Manual entries may arrive as numbers or strings.
/// Whole-number floats such as `90.0` count as integers.
pub fn manual_value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
