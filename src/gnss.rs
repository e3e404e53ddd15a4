use gpsd_proto::UnifiedResponse;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// in meters
    #[serde(default)]
    pub altitude: f32,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct GnssData {
    pub position: Option<Position>,
    pub mode: Mode,
    /// course over ground, degrees clockwise from true north
    pub track: Option<f32>,
    /// in m/s
    pub speed: Option<f32>,
}

#[derive(Clone, Default, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    NoFix,
    Fix2d,
    Fix3d,
}

impl Mode {
    /// Label reported in status output.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::NoFix => "NO_FIX",
            Self::Fix2d => "FIX_2D",
            Self::Fix3d => "FIX_3D",
        }
    }

    pub fn has_fix(&self) -> bool {
        *self != Mode::NoFix
    }
}

impl From<gpsd_proto::Mode> for Mode {
    fn from(value: gpsd_proto::Mode) -> Self {
        match value {
            gpsd_proto::Mode::NoFix => Mode::NoFix,
            gpsd_proto::Mode::Fix2d => Mode::Fix2d,
            gpsd_proto::Mode::Fix3d => Mode::Fix3d,
        }
    }
}

impl GnssData {
    /// Position set by hand, e.g. when no receiver is attached.
    pub fn set_position(&mut self, position: Position) {
        self.position = Some(position);
        if !self.mode.has_fix() {
            self.mode = Mode::Fix2d;
        }
    }

    /// Speed in km/h, rounded for display.
    pub fn speed_kmh(&self) -> Option<u32> {
        self.speed.map(|s| (s * 3.6).round().max(0.0) as u32)
    }

    /// Applies one gpsd JSON report. Returns true when the position changed.
    pub fn update_gpsd(&mut self, line: &str) -> Result<bool, serde_json::Error> {
        match serde_json::from_str(line)? {
            UnifiedResponse::Tpv(t) => {
                self.mode = t.mode.into();
                if !self.mode.has_fix() {
                    return Ok(false);
                }
                self.track = t.track;
                self.speed = t.speed;
                match (t.lat, t.lon) {
                    (Some(latitude), Some(longitude)) => {
                        self.position = Some(Position {
                            latitude,
                            longitude,
                            altitude: t.alt.unwrap_or_default(),
                        });
                        Ok(true)
                    }
                    _ => Ok(false),
                }
            }
            _ => Ok(false),
        }
    }
}
