pub mod bearing;
pub mod command;
pub mod config;
pub mod error;
pub mod explore;
pub mod gnss;
pub mod heading;
pub mod logging;
pub mod magnetic;
pub mod sector;

pub use bearing::{normalize_from_alpha, wrap_360, Bearing};
pub use error::{ExploreError, HeadingError};
pub use heading::{HeadingEvents, HeadingModel, HeadingSource, OrientationEventKind, SensorReading};
pub use sector::{classify_sector, DirectionSector};
