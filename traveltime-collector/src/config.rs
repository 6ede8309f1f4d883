//! Job configuration.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::StationCode;

/// Inter-call delay policy for the fetch loop.
///
/// The trip endpoint rate-limits aggressive clients, so the fetcher pauses
/// between destination queries. The delay is injected rather than hard-coded
/// so tests and well-behaved environments can disable it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Throttle {
    delay: Option<Duration>,
}

impl Throttle {
    /// No delay between calls.
    pub fn none() -> Self {
        Self { delay: None }
    }

    /// A fixed delay between calls.
    pub fn fixed(delay: Duration) -> Self {
        Self { delay: Some(delay) }
    }

    /// Wait out the configured delay, if any.
    pub async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Station codes whose trip queries are known to fail permanently
/// (decommissioned stations, or stations the trip endpoint answers 500 for).
/// Reconciliation treats gaps for these as expected rather than actionable.
pub fn default_ignore_list() -> HashSet<StationCode> {
    ["HRY", "WTM", "KRW", "VMW", "RTST", "WIJ", "SPV", "SPH"]
        .iter()
        .map(|code| StationCode::parse(code).expect("valid code literal"))
        .collect()
}

/// Configuration for a collection/reconciliation run.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Directory holding `traveltimes/`, `contours/` and the summary file.
    pub data_dir: PathBuf,
    /// Codes excluded from reconciliation's actionable-missing set.
    pub ignore: HashSet<StationCode>,
    /// Delay policy between destination queries.
    pub throttle: Throttle,
    /// Report gaps without fetching or writing.
    pub dry_run: bool,
}

impl JobConfig {
    /// Create a config for the given data directory with the default
    /// ignore list, no throttle and dry-run off.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ignore: default_ignore_list(),
            throttle: Throttle::none(),
            dry_run: false,
        }
    }

    /// Replace the ignore list.
    pub fn with_ignore(mut self, ignore: HashSet<StationCode>) -> Self {
        self.ignore = ignore;
        self
    }

    /// Set the inter-call delay policy.
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Enable or disable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
