//! Reconciliation of incomplete travel-time files.
//!
//! A fetch run leaves gaps wherever a destination errored or returned no
//! trips. Reconciliation walks every origin that already has a travel-time
//! file, computes which destinations are absent, drops the ones on the
//! ignore list, and re-fetches the rest. Fresh results are merged into the
//! stored dataset rather than replacing it, so successes from earlier runs
//! are never discarded.

use std::collections::HashSet;

use tracing::{Instrument, info, info_span};

use crate::config::{JobConfig, Throttle};
use crate::domain::{DepartureTime, StationCode};
use crate::fetch::{TripProvider, fetch_travel_times};
use crate::ns::NsError;
use crate::registry::Registry;
use crate::store::{StoreError, TravelTimeSet, TravelTimeStore, TravelTimes};

/// Errors from a reconciliation run.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Ns(#[from] NsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of reconciling one origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// The origin whose file was examined.
    pub origin: StationCode,
    /// Actionable missing destinations (gaps not on the ignore list).
    pub missing: Vec<StationCode>,
    /// Gaps that were excused by the ignore list.
    pub ignored: usize,
    /// Whether the file was re-fetched and rewritten.
    pub rewritten: bool,
}

/// Detects and backfills missing destinations in stored travel-time files.
#[derive(Debug)]
pub struct Reconciler<'a> {
    registry: &'a Registry,
    store: &'a TravelTimeStore,
    ignore: HashSet<StationCode>,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(registry: &'a Registry, store: &'a TravelTimeStore, config: &JobConfig) -> Self {
        Self {
            registry,
            store,
            ignore: config.ignore.clone(),
            dry_run: config.dry_run,
        }
    }

    /// Reconcile every origin that has a travel-time file.
    ///
    /// In dry-run mode gaps are only logged and reported; no fetches beyond
    /// the file reads happen and nothing is written.
    pub async fn run<P: TripProvider>(
        &self,
        provider: &P,
        departure: &DepartureTime,
        throttle: &Throttle,
    ) -> Result<Vec<ReconcileReport>, ReconcileError> {
        let mut reports = Vec::new();

        for origin in self.registry.iter() {
            if !self.store.exists(origin) {
                continue;
            }

            let span = info_span!("reconcile", origin = %origin.code());
            let report = async {
                let stored = self.store.load(origin)?;
                let times = TravelTimes::from_set(&stored, self.registry);
                let gaps = times.missing_destinations(self.registry);

                let mut missing = Vec::new();
                let mut ignored = 0;
                for gap in gaps {
                    if self.ignore.contains(gap.code()) {
                        ignored += 1;
                        continue;
                    }
                    info!(destination = %gap.name(), "missing destination");
                    missing.push(gap.code().clone());
                }

                if missing.is_empty() {
                    info!(ignored, "no actionable missing destinations");
                    return Ok(ReconcileReport {
                        origin: origin.code().clone(),
                        missing,
                        ignored,
                        rewritten: false,
                    });
                }

                if self.dry_run {
                    info!(count = missing.len(), "dry run, leaving gaps in place");
                    return Ok(ReconcileReport {
                        origin: origin.code().clone(),
                        missing,
                        ignored,
                        rewritten: false,
                    });
                }

                let fresh =
                    fetch_travel_times(provider, self.registry, origin, departure, throttle)
                        .await?;
                let merged = TravelTimeSet::merged_with(&stored, &fresh);
                self.store.write(origin, &merged)?;
                info!(count = missing.len(), "re-fetched and merged travel times");

                Ok::<ReconcileReport, ReconcileError>(ReconcileReport {
                    origin: origin.code().clone(),
                    missing,
                    ignored,
                    rewritten: true,
                })
            }
            .instrument(span)
            .await?;

            reports.push(report);
        }

        Ok(reports)
    }
}
