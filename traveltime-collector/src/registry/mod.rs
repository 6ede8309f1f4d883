//! Station registry.
//!
//! Loads the full station listing from a [`StationSource`], filters it to
//! the target country and exposes lookup by name, code and classification.
//! Name lookups return `Option` because absence is an expected, common case:
//! trip responses carry free-form destination names that do not always match
//! the listing exactly.

mod station;
mod summary;

use std::collections::HashSet;

use tracing::warn;

use crate::domain::{StationCode, StationKind};
use crate::ns::{NsError, StationRecord};

pub use station::Station;
pub use summary::SummaryError;

/// Source of the raw station listing.
///
/// This abstraction allows the registry to be loaded from the live NS
/// listing endpoint or from mock data in tests.
pub trait StationSource {
    /// Fetch all station rows, unfiltered.
    fn fetch_stations(&self) -> impl Future<Output = Result<Vec<StationRecord>, NsError>>;
}

/// Configuration for registry loading.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Country code to keep; everything else is dropped.
    pub country: String,
    /// Truncate the listing to a small prefix for fast deterministic runs.
    pub test_mode: bool,
    /// How many listing rows to keep in test mode.
    pub test_prefix: usize,
    /// Station retained in test mode regardless of its listing position.
    pub anchor: StationCode,
}

impl RegistryConfig {
    /// Enable test-mode truncation.
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Set the test-mode anchor station.
    pub fn with_anchor(mut self, anchor: StationCode) -> Self {
        self.anchor = anchor;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            country: "NL".to_string(),
            test_mode: false,
            test_prefix: 6,
            // Utrecht Centraal, the default map origin
            anchor: StationCode::parse("UT").expect("valid code literal"),
        }
    }
}

/// The full set of known stations, in listing order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    stations: Vec<Station>,
}

impl Registry {
    /// Load the registry from a station source.
    ///
    /// Rows outside the configured country are dropped. Rows with a
    /// malformed code, coordinates or class name are skipped with a warning
    /// rather than failing the whole load; the listing has historically
    /// carried a few such rows. In test mode the listing is truncated to
    /// the first `test_prefix` rows, but the anchor station is kept
    /// wherever it appears.
    pub async fn load<S: StationSource>(
        source: &S,
        config: &RegistryConfig,
    ) -> Result<Self, NsError> {
        let records = source.fetch_stations().await?;

        let mut stations: Vec<Station> = Vec::new();
        let mut seen: HashSet<StationCode> = HashSet::new();

        for (i, record) in records.into_iter().enumerate() {
            if config.test_mode
                && i >= config.test_prefix
                && record.code != config.anchor.as_str()
            {
                continue;
            }
            if record.country != config.country {
                continue;
            }

            let Some(station) = convert_record(&record) else {
                continue;
            };

            // Codes are unique within a registry
            if !seen.insert(station.code().clone()) {
                warn!(code = %station.code(), "duplicate station code in listing, keeping first");
                continue;
            }

            stations.push(station);
        }

        Ok(Self { stations })
    }

    /// Build a registry directly from stations (test helper and summary
    /// tooling entry point). Keeps the first station per code.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        let mut seen = HashSet::new();
        let stations = stations
            .into_iter()
            .filter(|s| seen.insert(s.code().clone()))
            .collect();
        Self { stations }
    }

    /// Find a station by exact long name.
    pub fn find_by_name(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name() == name)
    }

    /// Find a station code by exact long name.
    pub fn find_code_by_name(&self, name: &str) -> Option<&StationCode> {
        self.find_by_name(name).map(Station::code)
    }

    /// Find a station by code.
    pub fn find_by_code(&self, code: &StationCode) -> Option<&Station> {
        self.stations.iter().find(|s| s.code() == code)
    }

    /// Stations whose classification is in `kinds`, in listing order.
    pub fn filter_by_kind(&self, kinds: &HashSet<StationKind>) -> Vec<&Station> {
        self.stations
            .iter()
            .filter(|s| kinds.contains(&s.kind()))
            .collect()
    }

    /// Iterate stations in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

/// Convert a wire row into a validated station, or `None` if the row is
/// malformed.
fn convert_record(record: &StationRecord) -> Option<Station> {
    let code = match StationCode::parse(&record.code) {
        Ok(code) => code,
        Err(e) => {
            warn!(code = %record.code, error = %e, "skipping station with malformed code");
            return None;
        }
    };

    let (Ok(lat), Ok(lon)) = (record.lat.parse::<f64>(), record.lon.parse::<f64>()) else {
        warn!(code = %code, "skipping station with malformed coordinates");
        return None;
    };

    let kind = match StationKind::parse(&record.station_type) {
        Ok(kind) => kind,
        Err(e) => {
            warn!(code = %code, error = %e, "skipping station with unknown class");
            return None;
        }
    };

    Some(Station::new(
        code,
        record.names.clone(),
        record.country.clone(),
        lat,
        lon,
        kind,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ns::{MockStationSource, StationNames};

    fn record(code: &str, name: &str, country: &str, kind: &str) -> StationRecord {
        StationRecord {
            code: code.to_string(),
            names: StationNames::long_only(name),
            country: country.to_string(),
            lat: "52.0".to_string(),
            lon: "5.1".to_string(),
            station_type: kind.to_string(),
        }
    }

    fn dutch_listing() -> Vec<StationRecord> {
        vec![
            record("ASD", "Amsterdam Centraal", "NL", "megastation"),
            record("RTD", "Rotterdam Centraal", "NL", "megastation"),
            record("GVC", "Den Haag Centraal", "NL", "megastation"),
            record("AH", "Arnhem Centraal", "NL", "knooppuntIntercitystation"),
            record("EHV", "Eindhoven Centraal", "NL", "intercitystation"),
            record("ZL", "Zwolle", "NL", "knooppuntIntercitystation"),
            record("GN", "Groningen", "NL", "intercitystation"),
            record("MT", "Maastricht", "NL", "intercitystation"),
            record("UT", "Utrecht Centraal", "NL", "megastation"),
        ]
    }

    #[tokio::test]
    async fn load_filters_country() {
        let mut records = dutch_listing();
        records.push(record("FANTW", "Antwerpen-Centraal", "B", "megastation"));
        let source = MockStationSource::new(records);

        let registry = Registry::load(&source, &RegistryConfig::default())
            .await
            .unwrap();

        assert_eq!(registry.len(), 9);
        assert!(registry.find_by_name("Antwerpen-Centraal").is_none());
    }

    #[tokio::test]
    async fn test_mode_truncates_but_keeps_anchor() {
        let source = MockStationSource::new(dutch_listing());
        let config = RegistryConfig::default().with_test_mode(true);

        let registry = Registry::load(&source, &config).await.unwrap();

        // First 6 rows plus the anchor, which sits at position 9
        assert_eq!(registry.len(), 7);
        assert!(registry.find_by_name("Utrecht Centraal").is_some());
        assert!(registry.find_by_name("Groningen").is_none());
    }

    #[tokio::test]
    async fn test_mode_with_many_stations_stays_small() {
        let mut records: Vec<StationRecord> = Vec::new();
        for i in 0..50 {
            let code = format!("{}{}", char::from(b'A' + (i / 26) as u8), char::from(b'A' + (i % 26) as u8));
            records.push(record(&code, &format!("Station {i}"), "NL", "stoptreinstation"));
        }
        records.push(record("UT", "Utrecht Centraal", "NL", "megastation"));
        let source = MockStationSource::new(records);
        let config = RegistryConfig::default().with_test_mode(true);

        let registry = Registry::load(&source, &config).await.unwrap();

        assert_eq!(registry.len(), 7);
        assert!(registry.find_by_name("Utrecht Centraal").is_some());
    }

    #[tokio::test]
    async fn malformed_rows_are_skipped() {
        let mut records = dutch_listing();
        records.push(record("x1", "Bad Code", "NL", "megastation"));
        records.push(record("HDE", "Bad Class", "NL", "spacestation"));
        let mut bad_coords = record("HDR", "Den Helder", "NL", "intercitystation");
        bad_coords.lat = "not-a-number".to_string();
        records.push(bad_coords);
        let source = MockStationSource::new(records);

        let registry = Registry::load(&source, &RegistryConfig::default())
            .await
            .unwrap();

        assert_eq!(registry.len(), 9);
    }

    #[tokio::test]
    async fn duplicate_codes_keep_first() {
        let mut records = dutch_listing();
        records.push(record("UT", "Utrecht Centraal (dup)", "NL", "megastation"));
        let source = MockStationSource::new(records);

        let registry = Registry::load(&source, &RegistryConfig::default())
            .await
            .unwrap();

        assert_eq!(registry.len(), 9);
        let ut = StationCode::parse("UT").unwrap();
        assert_eq!(registry.find_by_code(&ut).unwrap().name(), "Utrecht Centraal");
    }

    #[tokio::test]
    async fn find_by_name_is_exact() {
        let source = MockStationSource::new(dutch_listing());
        let registry = Registry::load(&source, &RegistryConfig::default())
            .await
            .unwrap();

        assert!(registry.find_by_name("Utrecht Centraal").is_some());
        assert!(registry.find_by_name("Utrecht").is_none());
        assert!(registry.find_by_name("utrecht centraal").is_none());

        assert_eq!(
            registry.find_code_by_name("Zwolle").unwrap().as_str(),
            "ZL"
        );
        assert!(registry.find_code_by_name("Nergenshuizen").is_none());
    }

    #[tokio::test]
    async fn filter_by_kind_keeps_listing_order() {
        let source = MockStationSource::new(dutch_listing());
        let registry = Registry::load(&source, &RegistryConfig::default())
            .await
            .unwrap();

        let kinds: HashSet<StationKind> =
            [StationKind::Mega, StationKind::InterchangeIntercity].into();
        let selected = registry.filter_by_kind(&kinds);

        let names: Vec<&str> = selected.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "Amsterdam Centraal",
                "Rotterdam Centraal",
                "Den Haag Centraal",
                "Arnhem Centraal",
                "Zwolle",
                "Utrecht Centraal",
            ]
        );
    }
}
