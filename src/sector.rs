use serde::{Deserialize, Serialize};

use crate::bearing::wrap_360;

/// One of the eight 45° compass sectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionSector {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Classification table, first match wins on `[min, max)`.
/// North owns both ends of the circle.
pub const SECTOR_TABLE: [(DirectionSector, f64, f64); 9] = [
    (DirectionSector::North, 0.0, 22.5),
    (DirectionSector::NorthEast, 22.5, 67.5),
    (DirectionSector::East, 67.5, 112.5),
    (DirectionSector::SouthEast, 112.5, 157.5),
    (DirectionSector::South, 157.5, 202.5),
    (DirectionSector::SouthWest, 202.5, 247.5),
    (DirectionSector::West, 247.5, 292.5),
    (DirectionSector::NorthWest, 292.5, 337.5),
    (DirectionSector::North, 337.5, 360.0),
];

/// Sector containing `degrees`, wrapped into `[0, 360)` first.
pub fn classify_sector(degrees: f64) -> DirectionSector {
    let degrees = wrap_360(degrees);
    SECTOR_TABLE
        .iter()
        .find(|(_, min, max)| degrees >= *min && degrees < *max)
        .map(|(sector, _, _)| *sector)
        .unwrap_or(DirectionSector::North)
}

impl DirectionSector {
    pub fn label(&self) -> &'static str {
        match self {
            Self::North => "North",
            Self::NorthEast => "Northeast",
            Self::East => "East",
            Self::SouthEast => "Southeast",
            Self::South => "South",
            Self::SouthWest => "Southwest",
            Self::West => "West",
            Self::NorthWest => "Northwest",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }

    /// Labels shown by the Chinese UI.
    pub fn label_zh(&self) -> &'static str {
        match self {
            Self::North => "北",
            Self::NorthEast => "东北",
            Self::East => "东",
            Self::SouthEast => "东南",
            Self::South => "南",
            Self::SouthWest => "西南",
            Self::West => "西",
            Self::NorthWest => "西北",
        }
    }
}

impl std::fmt::Display for DirectionSector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_sector(0.0), DirectionSector::North);
        assert_eq!(classify_sector(22.4), DirectionSector::North);
        assert_eq!(classify_sector(22.5), DirectionSector::NorthEast);
        assert_eq!(classify_sector(67.5), DirectionSector::East);
        assert_eq!(classify_sector(180.0), DirectionSector::South);
        assert_eq!(classify_sector(247.5), DirectionSector::West);
        assert_eq!(classify_sector(337.4), DirectionSector::NorthWest);
        assert_eq!(classify_sector(337.5), DirectionSector::North);
        assert_eq!(classify_sector(359.9), DirectionSector::North);
    }

    #[test]
    fn test_classify_wraps_out_of_range_input() {
        assert_eq!(classify_sector(360.0), DirectionSector::North);
        assert_eq!(classify_sector(-45.0), DirectionSector::NorthWest);
        assert_eq!(classify_sector(450.0), DirectionSector::East);
    }

    #[test]
    fn test_sector_centers() {
        let expected = [
            DirectionSector::North,
            DirectionSector::NorthEast,
            DirectionSector::East,
            DirectionSector::SouthEast,
            DirectionSector::South,
            DirectionSector::SouthWest,
            DirectionSector::West,
            DirectionSector::NorthWest,
        ];
        for (i, sector) in expected.iter().enumerate() {
            assert_eq!(classify_sector(i as f64 * 45.0), *sector);
        }
    }

    #[test]
    fn test_table_covers_full_circle() {
        for pair in SECTOR_TABLE.windows(2) {
            assert_eq!(pair[0].2, pair[1].1);
        }
        assert_eq!(SECTOR_TABLE[0].1, 0.0);
        assert_eq!(SECTOR_TABLE[SECTOR_TABLE.len() - 1].2, 360.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DirectionSector::NorthEast.label(), "Northeast");
        assert_eq!(DirectionSector::NorthEast.short_label(), "NE");
        assert_eq!(DirectionSector::SouthWest.label_zh(), "西南");
        assert_eq!(DirectionSector::West.to_string(), "West");
    }
}
