//! Station summary export.
//!
//! Writes the aggregate `stations.json` the website build consumes: one row
//! per station with coordinates, classification and a readiness flag that is
//! true only when both the travel-time file and the contour file exist.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{StationCode, StationKind};
use crate::ns::StationNames;

use super::Registry;

/// Errors from summary export.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize summary: {message}")]
    Json { message: String },
}

/// Field order is the sorted key order, so the output is deterministic.
#[derive(Serialize)]
struct SummaryEntry<'a> {
    id: &'a StationCode,
    lat: f64,
    lon: f64,
    names: &'a StationNames,
    travel_times_available: bool,
    #[serde(rename = "type")]
    kind: StationKind,
}

#[derive(Serialize)]
struct Summary<'a> {
    stations: Vec<SummaryEntry<'a>>,
}

impl Registry {
    /// Write the station summary document to `out_path`.
    ///
    /// `data_dir` is where travel-time and contour files are looked up.
    /// Output is deterministic: sorted keys, fixed indentation, non-ASCII
    /// names preserved verbatim.
    pub fn export_summary(&self, data_dir: &Path, out_path: &Path) -> Result<(), SummaryError> {
        let summary = Summary {
            stations: self
                .iter()
                .map(|station| SummaryEntry {
                    id: station.code(),
                    lat: station.lat(),
                    lon: station.lon(),
                    names: station.names(),
                    travel_times_available: station.has_travel_time_data(data_dir)
                        && station.contour_filepath(data_dir).exists(),
                    kind: station.kind(),
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&summary).map_err(|e| SummaryError::Json {
            message: e.to_string(),
        })?;

        std::fs::write(out_path, json).map_err(|source| SummaryError::Io {
            path: out_path.to_path_buf(),
            source,
        })
    }
}
