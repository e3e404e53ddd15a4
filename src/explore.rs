//! Payload for the "explore along a heading" backend.

use serde::{Deserialize, Serialize};

use crate::error::ExploreError;
use crate::gnss::Position;
use crate::heading::HeadingModel;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    #[default]
    Present,
    Past,
    Future,
}

impl TimeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Past => "past",
            Self::Future => "future",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => "modern",
            Self::Past => "historical",
            Self::Future => "future",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreSettings {
    /// in km
    pub segment_distance: u32,
    pub time_mode: TimeMode,
    /// in km/h
    pub speed: u32,
}

impl Default for ExploreSettings {
    fn default() -> Self {
        ExploreSettings {
            segment_distance: 10,
            time_mode: TimeMode::Present,
            speed: 120,
        }
    }
}

impl ExploreSettings {
    pub fn validate(&self) -> Result<(), ExploreError> {
        if self.segment_distance == 0 {
            return Err(ExploreError::InvalidSettings(
                "segment_distance must be positive".to_owned(),
            ));
        }
        if self.speed == 0 {
            return Err(ExploreError::InvalidSettings("speed must be positive".to_owned()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExploreRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// unrounded bearing in `[0, 360)`
    pub heading: f64,
    pub segment_distance: u32,
    pub time_mode: TimeMode,
    pub speed: u32,
}

impl ExploreRequest {
    pub fn build(
        position: Option<&Position>,
        heading: &HeadingModel,
        settings: &ExploreSettings,
    ) -> Result<ExploreRequest, ExploreError> {
        let position = position.ok_or(ExploreError::PositionUnavailable)?;
        settings.validate()?;
        Ok(ExploreRequest {
            latitude: position.latitude,
            longitude: position.longitude,
            heading: heading.bearing().degrees(),
            segment_distance: settings.segment_distance,
            time_mode: settings.time_mode,
            speed: settings.speed,
        })
    }
}
