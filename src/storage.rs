use heading_explorer::{
    bearing::Bearing,
    command::{manual_value_text, Command},
    config::Config,
    explore::ExploreRequest,
    gnss::{GnssData, Position},
    magnetic::MagneticData,
    HeadingModel, OrientationEventKind, SensorReading,
};
use tracing::{debug, info, warn};

/// All session state, owned by the main loop.
pub(crate) struct Storage {
    pub(crate) config: Config,
    pub(crate) heading: HeadingModel,
    pub(crate) gnss_data: GnssData,
    pub(crate) magnetic_data: Option<MagneticData>,
}

impl Storage {
    pub fn new(config: Config) -> Self {
        Storage {
            config,
            heading: HeadingModel::new(),
            gnss_data: GnssData::default(),
            magnetic_data: None,
        }
    }

    fn log_heading(&self, bearing: Bearing) {
        match self.true_bearing() {
            Some(true_bearing) => info!(
                "heading updated: {} ({}), true {}",
                bearing,
                self.heading.sector_label(),
                true_bearing
            ),
            None => info!("heading updated: {} ({})", bearing, self.heading.sector_label()),
        }
    }

    pub fn true_bearing(&self) -> Option<Bearing> {
        if !self.config.apply_declination {
            return None;
        }
        self.magnetic_data
            .map(|mag| self.heading.bearing().corrected(mag.declination as f64))
    }

    pub fn update_gpsd(&mut self, line: &str) {
        match self.gnss_data.update_gpsd(line) {
            Ok(true) => {
                if let Some(speed) = self.gnss_data.speed_kmh() {
                    debug!("speed: {speed} km/h");
                }
                self.update_magnetic();
            }
            Ok(false) => {}
            Err(e) => warn!("error decoding gpsd report: {e}"),
        }
    }

    fn set_position(&mut self, position: Position) {
        self.gnss_data.set_position(position);
        info!(
            "position: ({:.4}, {:.4})",
            position.latitude, position.longitude
        );
        self.update_magnetic();
    }

    fn update_magnetic(&mut self) {
        if let Some(pos) = self.gnss_data.position {
            self.magnetic_data = MagneticData::today(&pos);
        }
    }

    fn ingest(&mut self, kind: OrientationEventKind, reading: &SensorReading) {
        match self.heading.try_ingest_event(kind, reading) {
            Some(bearing) => self.log_heading(bearing),
            None if kind == OrientationEventKind::Relative => {
                warn!("orientation event without data")
            }
            None => {}
        }
    }

    /// Applies one command. Returns a line for stdout when the command produces output.
    pub fn apply(&mut self, command: Command) -> anyhow::Result<Option<String>> {
        match command {
            Command::Orientation(reading) => {
                debug!(?reading, "orientation event");
                self.ingest(OrientationEventKind::Relative, &reading);
            }
            Command::AbsoluteOrientation(reading) => {
                debug!(?reading, "absolute orientation event");
                self.ingest(OrientationEventKind::Absolute, &reading);
            }
            Command::Manual { value } => {
                match self.heading.ingest_manual_text(&manual_value_text(&value)) {
                    Ok(bearing) => self.log_heading(bearing),
                    Err(e) => warn!("{e}"),
                }
            }
            Command::Click { dx, dy } => {
                let bearing = self.heading.ingest_click_angle(dx, dy);
                self.log_heading(bearing);
            }
            Command::Position(position) => self.set_position(position),
            Command::Settings(settings) => match settings.validate() {
                Ok(()) => {
                    self.config.explore = settings;
                    info!(
                        "settings updated: {} km, {} mode, {} km/h",
                        settings.segment_distance,
                        settings.time_mode.label(),
                        settings.speed
                    );
                }
                Err(e) => warn!("{e}"),
            },
            Command::Explore => {
                if !self.heading.has_reading() {
                    warn!("cannot explore: no heading received yet, manual heading input is available");
                    return Ok(None);
                }
                let request = match ExploreRequest::build(
                    self.gnss_data.position.as_ref(),
                    &self.heading,
                    &self.config.explore,
                ) {
                    Ok(request) => request,
                    Err(e) => {
                        warn!("cannot explore: {e}");
                        return Ok(None);
                    }
                };
                info!(
                    "explore: ({:.4}, {:.4}) heading {} ({}), {} km, {} mode, {} km/h",
                    request.latitude,
                    request.longitude,
                    self.heading.bearing(),
                    self.heading.sector_label(),
                    request.segment_distance,
                    request.time_mode.label(),
                    request.speed
                );
                return Ok(Some(serde_json::to_string(&request)?));
            }
            Command::Status => {
                let status = serde_json::json!({
                    "heading": self.heading.bearing(),
                    "heading_rounded": self.heading.bearing().rounded(),
                    "sector": self.heading.sector().short_label(),
                    "source": self.heading.source(),
                    "true_heading": self.true_bearing(),
                    "position": self.gnss_data.position,
                    "fix": self.gnss_data.mode.as_str_name(),
                    "magnetic": self.magnetic_data,
                    "settings": self.config.explore,
                });
                return Ok(Some(status.to_string()));
            }
        }
        Ok(None)
    }
}
