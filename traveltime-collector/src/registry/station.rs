//! Station model.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{StationCode, StationKind};
use crate::ns::StationNames;

/// One railway station as loaded into the registry.
///
/// Stations are immutable. Per-query travel times live in a separate
/// [`crate::store::TravelTimes`] map keyed by station code, never on the
/// station itself, so results from one run cannot leak into another.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    code: StationCode,
    names: StationNames,
    country: String,
    lat: f64,
    lon: f64,
    kind: StationKind,
}

impl Station {
    /// Create a new station.
    pub fn new(
        code: StationCode,
        names: StationNames,
        country: impl Into<String>,
        lat: f64,
        lon: f64,
        kind: StationKind,
    ) -> Self {
        Self {
            code,
            names,
            country: country.into(),
            lat,
            lon,
            kind,
        }
    }

    /// The stable station code.
    pub fn code(&self) -> &StationCode {
        &self.code
    }

    /// The long-form display name.
    pub fn name(&self) -> &str {
        &self.names.long
    }

    /// All name variants.
    pub fn names(&self) -> &StationNames {
        &self.names
    }

    /// Two-letter country code.
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// The station classification.
    pub fn kind(&self) -> StationKind {
        self.kind
    }

    /// Path of this station's travel-time file under `data_dir`.
    pub fn travel_time_filepath(&self, data_dir: &Path) -> PathBuf {
        data_dir
            .join("traveltimes")
            .join(format!("traveltimes_from_{}.json", self.code))
    }

    /// Path of this station's contour geometry file under `data_dir`.
    ///
    /// The contour builder writes these; this crate only checks for their
    /// existence when exporting the station summary.
    pub fn contour_filepath(&self, data_dir: &Path) -> PathBuf {
        data_dir
            .join("contours")
            .join(format!("{}.geojson", self.code))
    }

    /// Whether a travel-time file exists for this station.
    ///
    /// A cheap existence check, not a content validation.
    pub fn has_travel_time_data(&self, data_dir: &Path) -> bool {
        self.travel_time_filepath(data_dir).exists()
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.names.long, self.code)
    }
}
