use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use world_magnetic_model::{
    time::Date,
    uom::si::{
        angle::{degree, Angle},
        f32::Length,
        length::meter,
        magnetic_flux_density::microtesla,
    },
    GeomagneticField,
};

use crate::gnss::Position;

#[derive(Deserialize, Serialize, Clone, Copy, Default, Debug, PartialEq)]
pub struct MagneticData {
    /// in degrees, east positive
    pub declination: f32,
    /// in degrees
    pub inclination: f32,
    /// in µT
    pub magnetic_flux_density: f32,
}

impl MagneticData {
    /// World Magnetic Model field at `position` on `date`.
    /// `None` when the model rejects the inputs (e.g. a date outside its epoch).
    pub fn at(position: &Position, date: NaiveDate) -> Option<MagneticData> {
        let date = Date::from_ordinal_date(date.year(), date.ordinal() as u16).ok()?;
        let field = GeomagneticField::new(
            Length::new::<meter>(position.altitude),
            Angle::new::<degree>(position.latitude as f32),
            Angle::new::<degree>(position.longitude as f32),
            date,
        )
        .ok()?;
        Some(MagneticData {
            declination: field.declination().get::<degree>(),
            inclination: field.inclination().get::<degree>(),
            magnetic_flux_density: field.f().get::<microtesla>(),
        })
    }

    pub fn today(position: &Position) -> Option<MagneticData> {
        Self::at(position, chrono::Utc::now().date_naive())
    }
}
