//! Travel-time persistence.
//!
//! One JSON file per origin station, `traveltimes_from_<CODE>.json`, holding
//! the shortest travel time to every destination the fetch run resolved.
//! First-time creation never overwrites an existing file: collected data may
//! be irreproducible (the timetable moves on), so stale results are only
//! ever amended through the reconciliation merge path.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::StationCode;
use crate::registry::{Registry, Station};

/// Errors from travel-time file I/O.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed travel-time file {path}: {message}")]
    Json { path: PathBuf, message: String },
}

/// One resolved destination in a travel-time dataset.
///
/// `id` is `None` when the provider's destination name had no exact match
/// in the registry. Field order is the sorted key order, so serialized
/// output is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimeEntry {
    pub id: Option<StationCode>,
    pub name: String,
    pub travel_time_min: u32,
    pub travel_time_planned: String,
}

/// A per-origin travel-time dataset, in fetch order.
///
/// The first entry is always the origin itself with zero travel time.
/// Destinations that errored or returned no trips are simply absent; that
/// gap is what reconciliation detects later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelTimeSet {
    pub stations: Vec<TravelTimeEntry>,
}

impl TravelTimeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TravelTimeEntry) {
        self.stations.push(entry);
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TravelTimeEntry> {
        self.stations.iter()
    }

    /// Whether an entry with this destination name is present.
    pub fn contains_name(&self, name: &str) -> bool {
        self.stations.iter().any(|e| e.name == name)
    }

    /// Merge a fresh fetch into a prior dataset.
    ///
    /// Fresh entries win; prior entries whose destination the fresh run
    /// again failed to resolve are kept rather than discarded. Order is
    /// fresh order followed by the surviving prior entries.
    pub fn merged_with(prior: &TravelTimeSet, fresh: &TravelTimeSet) -> TravelTimeSet {
        let mut merged = fresh.clone();
        for entry in &prior.stations {
            if !merged.contains_name(&entry.name) {
                merged.push(entry.clone());
            }
        }
        merged
    }
}

/// Per-invocation travel-time lookup.
///
/// Keyed by station code rather than written onto the shared registry, so
/// one reconciliation scan cannot leak results into the next.
#[derive(Debug, Clone, Default)]
pub struct TravelTimes {
    by_code: HashMap<StationCode, u32>,
}

impl TravelTimes {
    /// Build the lookup from a dataset, matching entries to registry
    /// stations by exact name. Entries whose name has no registry match are
    /// silently ignored.
    pub fn from_set(set: &TravelTimeSet, registry: &Registry) -> Self {
        let mut by_code = HashMap::new();
        for entry in set.iter() {
            if let Some(station) = registry.find_by_name(&entry.name) {
                by_code.insert(station.code().clone(), entry.travel_time_min);
            }
        }
        Self { by_code }
    }

    /// Travel time in minutes to the given station, if resolved.
    pub fn get(&self, code: &StationCode) -> Option<u32> {
        self.by_code.get(code).copied()
    }

    /// Registry stations with no travel time in this lookup, in registry
    /// order.
    pub fn missing_destinations<'r>(&self, registry: &'r Registry) -> Vec<&'r Station> {
        registry
            .iter()
            .filter(|s| !self.by_code.contains_key(s.code()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Reads and writes per-origin travel-time files under a data directory.
#[derive(Debug, Clone)]
pub struct TravelTimeStore {
    data_dir: PathBuf,
}

impl TravelTimeStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }

    /// Whether a travel-time file exists for this origin.
    pub fn exists(&self, origin: &Station) -> bool {
        origin.has_travel_time_data(&self.data_dir)
    }

    /// Write the dataset unless a file already exists for this origin.
    ///
    /// Returns whether a write happened. An existing file is left untouched
    /// and logged as a warning.
    pub fn write_if_absent(
        &self,
        origin: &Station,
        set: &TravelTimeSet,
    ) -> Result<bool, StoreError> {
        let path = origin.travel_time_filepath(&self.data_dir);
        if path.exists() {
            warn!(path = %path.display(), "travel-time file already exists, not overwriting");
            return Ok(false);
        }
        self.write(origin, set)?;
        Ok(true)
    }

    /// Write the dataset unconditionally (reconciliation merge path).
    ///
    /// The whole file is written in a single operation; an interrupted run
    /// never leaves a partial dataset behind.
    pub fn write(&self, origin: &Station, set: &TravelTimeSet) -> Result<(), StoreError> {
        let path = origin.travel_time_filepath(&self.data_dir);

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(set).map_err(|e| StoreError::Json {
            path: path.clone(),
            message: e.to_string(),
        })?;

        std::fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
    }

    /// Load the dataset for this origin.
    pub fn load(&self, origin: &Station) -> Result<TravelTimeSet, StoreError> {
        let path = origin.travel_time_filepath(&self.data_dir);
        let contents = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|e| StoreError::Json {
            path,
            message: e.to_string(),
        })
    }
}
