use serde::Serialize;

/// Wraps any angle into `[0, 360)`. Non-finite input maps to 0.
pub fn wrap_360(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Flips a counter-clockwise device `alpha` into a clockwise compass bearing.
pub fn normalize_from_alpha(alpha: f64) -> f64 {
    wrap_360(360.0 - alpha)
}

/// Compass heading in degrees clockwise from north, always in `[0, 360)`.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Bearing(f64);

impl Bearing {
    pub const NORTH: Bearing = Bearing(0.0);

    pub fn new(degrees: f64) -> Self {
        Bearing(wrap_360(degrees))
    }

    pub fn from_alpha(alpha: f64) -> Self {
        Bearing(normalize_from_alpha(alpha))
    }

    /// Bearing of a point relative to a widget center, screen coordinates
    /// (y grows downwards). Straight up is north, rounded to whole degrees.
    pub fn from_offset(dx: f64, dy: f64) -> Self {
        if dx == 0.0 && dy == 0.0 {
            return Bearing::NORTH;
        }
        let mut angle = dx.atan2(-dy).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        Bearing::new(angle.round())
    }

    /// in degrees, unrounded
    pub fn degrees(&self) -> f64 {
        self.0
    }

    /// Nearest whole degree for display, 359.6 shows as 0.
    pub fn rounded(&self) -> u16 {
        (self.0.round() as u16) % 360
    }

    /// True-north bearing for a magnetic bearing and a declination (east positive).
    pub fn corrected(&self, declination: f64) -> Bearing {
        Bearing::new(self.0 + declination)
    }
}

impl From<Bearing> for f64 {
    fn from(value: Bearing) -> Self {
        value.0
    }
}

impl std::fmt::Display for Bearing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.rounded())
    }
}
