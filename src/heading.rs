//! Heading state fed by orientation sensors, manual entry and compass clicks.
//!
//! [`HeadingModel`] owns the single current [`Bearing`]. Every input path
//! normalizes into `[0, 360)` before the value is stored; missing sensor data
//! leaves the last known heading untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bearing::Bearing;
use crate::error::HeadingError;
use crate::sector::{classify_sector, DirectionSector};

/// Raw device orientation sample.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorReading {
    /// in degrees, counter-clockwise device convention, any range
    #[serde(default)]
    pub alpha: Option<f64>,
    /// in degrees clockwise from north, only reported by some platforms
    #[serde(default)]
    pub compass_heading: Option<f64>,
    /// set by sensors that report against the earth frame
    #[serde(default)]
    pub absolute: Option<bool>,
}

impl SensorReading {
    pub fn from_alpha(alpha: f64) -> Self {
        SensorReading {
            alpha: Some(alpha),
            ..Default::default()
        }
    }

    pub fn from_compass_heading(compass_heading: f64) -> Self {
        SensorReading {
            compass_heading: Some(compass_heading),
            ..Default::default()
        }
    }
}

/// The two orientation event streams a device may emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationEventKind {
    Relative,
    /// Only accepted when the reading is flagged `absolute` and carries `alpha`.
    Absolute,
}

/// Where the current heading came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingSource {
    Orientation,
    CompassHeading,
    Manual,
    Click,
}

/// Inputs a UI layer forwards to the heading state.
pub trait HeadingEvents {
    fn on_orientation_event(&mut self, reading: &SensorReading) -> Bearing;
    fn on_manual_submit(&mut self, value: &str) -> Result<Bearing, HeadingError>;
    fn on_click(&mut self, dx: f64, dy: f64) -> Bearing;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeadingModel {
    current: Bearing,
    source: Option<HeadingSource>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl HeadingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bearing(&self) -> Bearing {
        self.current
    }

    /// Source of the last accepted update, `None` until a heading arrived.
    pub fn source(&self) -> Option<HeadingSource> {
        self.source
    }

    /// Distinguishes a real 0° heading from "nothing received yet".
    pub fn has_reading(&self) -> bool {
        self.source.is_some()
    }

    pub fn sector(&self) -> DirectionSector {
        classify_sector(self.current.degrees())
    }

    pub fn sector_label(&self) -> &'static str {
        self.sector().label()
    }

    fn set(&mut self, bearing: Bearing, source: HeadingSource) -> Bearing {
        self.current = bearing;
        self.source = Some(source);
        trace!(heading = bearing.degrees(), ?source, "heading stored");
        bearing
    }

    pub fn ingest_orientation_event(&mut self, reading: &SensorReading) -> Bearing {
        self.ingest_event(OrientationEventKind::Relative, reading)
    }

    /// Prefers a non-zero platform compass heading, otherwise flips `alpha`.
    /// A reading without usable data is ignored.
    pub fn ingest_event(&mut self, kind: OrientationEventKind, reading: &SensorReading) -> Bearing {
        self.try_ingest_event(kind, reading).unwrap_or(self.current)
    }

    /// Like [`ingest_event`](Self::ingest_event), `None` when the reading was ignored.
    pub fn try_ingest_event(
        &mut self,
        kind: OrientationEventKind,
        reading: &SensorReading,
    ) -> Option<Bearing> {
        if kind == OrientationEventKind::Absolute
            && (reading.absolute != Some(true) || finite(reading.alpha).is_none())
        {
            debug!("ignoring reading on the absolute stream without absolute alpha");
            return None;
        }

        if let Some(heading) = finite(reading.compass_heading).filter(|h| *h != 0.0) {
            return Some(self.set(Bearing::new(heading), HeadingSource::CompassHeading));
        }
        let Some(alpha) = finite(reading.alpha) else {
            debug!("orientation event without data");
            return None;
        };
        Some(self.set(Bearing::from_alpha(alpha), HeadingSource::Orientation))
    }

    pub fn ingest_manual_heading(&mut self, value: i64) -> Result<Bearing, HeadingError> {
        if !(0..=359).contains(&value) {
            return Err(HeadingError::InvalidHeadingInput(value.to_string()));
        }
        Ok(self.set(Bearing::new(value as f64), HeadingSource::Manual))
    }

    pub fn ingest_manual_text(&mut self, text: &str) -> Result<Bearing, HeadingError> {
        let value = text
            .trim()
            .parse::<i64>()
            .map_err(|_| HeadingError::InvalidHeadingInput(text.to_owned()))?;
        self.ingest_manual_heading(value)
    }

    /// `dx`, `dy` are pixel offsets of the pointer from the compass center.
    pub fn ingest_click_angle(&mut self, dx: f64, dy: f64) -> Bearing {
        self.set(Bearing::from_offset(dx, dy), HeadingSource::Click)
    }
}

impl HeadingEvents for HeadingModel {
    fn on_orientation_event(&mut self, reading: &SensorReading) -> Bearing {
        self.ingest_orientation_event(reading)
    }

    fn on_manual_submit(&mut self, value: &str) -> Result<Bearing, HeadingError> {
        self.ingest_manual_text(value)
    }

    fn on_click(&mut self, dx: f64, dy: f64) -> Bearing {
        self.ingest_click_angle(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_north_without_reading() {
        let model = HeadingModel::new();
        assert_eq!(model.bearing().degrees(), 0.0);
        assert!(!model.has_reading());
        assert_eq!(model.sector(), DirectionSector::North);
    }

    #[test]
    fn test_alpha_is_flipped() {
        let mut model = HeadingModel::new();
        assert_eq!(model.ingest_orientation_event(&SensorReading::from_alpha(45.0)).degrees(), 315.0);
        assert_eq!(model.sector(), DirectionSector::NorthWest);
        assert_eq!(model.source(), Some(HeadingSource::Orientation));

        assert_eq!(model.ingest_orientation_event(&SensorReading::from_alpha(0.0)).degrees(), 0.0);
        assert_eq!(model.sector(), DirectionSector::North);
        assert!(model.has_reading());
    }

    #[test]
    fn test_compass_heading_preferred_and_not_flipped() {
        let mut model = HeadingModel::new();
        let reading = SensorReading {
            alpha: Some(10.0),
            compass_heading: Some(100.0),
            absolute: None,
        };
        assert_eq!(model.ingest_orientation_event(&reading).degrees(), 100.0);
        assert_eq!(model.source(), Some(HeadingSource::CompassHeading));
    }

    #[test]
    fn test_zero_compass_heading_falls_back_to_alpha() {
        let mut model = HeadingModel::new();
        let reading = SensorReading {
            alpha: Some(90.0),
            compass_heading: Some(0.0),
            absolute: None,
        };
        assert_eq!(model.ingest_orientation_event(&reading).degrees(), 270.0);
    }

    #[test]
    fn test_compass_heading_is_wrapped() {
        let mut model = HeadingModel::new();
        let bearing = model.ingest_orientation_event(&SensorReading::from_compass_heading(370.0));
        assert_eq!(bearing.degrees(), 10.0);
    }

    #[test]
    fn test_missing_data_keeps_last_heading() {
        let mut model = HeadingModel::new();
        model.ingest_manual_heading(120).unwrap();
        let before = model.bearing();
        let after = model.ingest_orientation_event(&SensorReading::default());
        assert_eq!(before, after);
        assert_eq!(model.bearing(), before);
        assert_eq!(model.source(), Some(HeadingSource::Manual));
    }

    #[test]
    fn test_non_finite_alpha_is_ignored() {
        let mut model = HeadingModel::new();
        model.ingest_orientation_event(&SensorReading::from_alpha(f64::NAN));
        assert!(!model.has_reading());
        model.ingest_orientation_event(&SensorReading::from_alpha(f64::INFINITY));
        assert_eq!(model.bearing().degrees(), 0.0);
    }

    #[test]
    fn test_absolute_stream_requires_flag() {
        let mut model = HeadingModel::new();
        model.ingest_event(OrientationEventKind::Absolute, &SensorReading::from_alpha(90.0));
        assert!(!model.has_reading());

        let reading = SensorReading {
            alpha: Some(90.0),
            absolute: Some(true),
            ..Default::default()
        };
        assert_eq!(model.ingest_event(OrientationEventKind::Absolute, &reading).degrees(), 270.0);

        let no_alpha = SensorReading {
            alpha: None,
            compass_heading: Some(100.0),
            absolute: Some(true),
        };
        assert_eq!(model.try_ingest_event(OrientationEventKind::Absolute, &no_alpha), None);
        assert_eq!(model.bearing().degrees(), 270.0);
        assert_eq!(model.source(), Some(HeadingSource::Orientation));
    }

    #[test]
    fn test_try_ingest_reports_ignored_readings() {
        let mut model = HeadingModel::new();
        let kind = OrientationEventKind::Relative;
        assert_eq!(model.try_ingest_event(kind, &SensorReading::default()), None);
        let bearing = model.try_ingest_event(kind, &SensorReading::from_alpha(180.0));
        assert_eq!(bearing.map(|b| b.degrees()), Some(180.0));
    }

    #[test]
    fn test_manual_heading_range() {
        let mut model = HeadingModel::new();
        assert_eq!(model.ingest_manual_heading(0).unwrap().degrees(), 0.0);
        assert_eq!(model.ingest_manual_heading(359).unwrap().degrees(), 359.0);

        assert_eq!(
            model.ingest_manual_heading(360),
            Err(HeadingError::InvalidHeadingInput("360".to_owned()))
        );
        assert!(model.ingest_manual_heading(-1).is_err());
        assert_eq!(model.bearing().degrees(), 359.0);
    }

    #[test]
    fn test_manual_text() {
        let mut model = HeadingModel::new();
        assert_eq!(model.ingest_manual_text(" 90 ").unwrap().degrees(), 90.0);
        assert!(model.ingest_manual_text("east").is_err());
        assert!(model.ingest_manual_text("").is_err());
        assert!(model.ingest_manual_text("12.5").is_err());
        assert_eq!(model.bearing().degrees(), 90.0);
    }

    #[test]
    fn test_click_angle() {
        let mut model = HeadingModel::new();
        assert_eq!(model.ingest_click_angle(0.0, -100.0).degrees(), 0.0);
        assert_eq!(model.ingest_click_angle(100.0, 0.0).degrees(), 90.0);
        assert_eq!(model.source(), Some(HeadingSource::Click));
        assert_eq!(model.ingest_click_angle(0.0, 0.0).degrees(), 0.0);
    }

    #[test]
    fn test_events_trait_dispatch() {
        let mut model = HeadingModel::new();
        let events: &mut dyn HeadingEvents = &mut model;
        events.on_orientation_event(&SensorReading::from_alpha(180.0));
        assert!(events.on_manual_submit("400").is_err());
        events.on_click(-100.0, 0.0);
        assert_eq!(model.bearing().degrees(), 270.0);
        assert_eq!(model.sector_label(), "West");
    }
}
