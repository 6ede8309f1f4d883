//! Mock providers for testing without API access.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{DepartureTime, StationCode};
use crate::fetch::{Trip, TripProvider};
use crate::registry::StationSource;

use super::error::NsError;
use super::types::StationRecord;

/// Mock station source serving a fixed listing.
#[derive(Debug, Clone)]
pub struct MockStationSource {
    records: Vec<StationRecord>,
}

impl MockStationSource {
    pub fn new(records: Vec<StationRecord>) -> Self {
        Self { records }
    }
}

impl StationSource for MockStationSource {
    async fn fetch_stations(&self) -> Result<Vec<StationRecord>, NsError> {
        Ok(self.records.clone())
    }
}

/// Scripted response for one origin/destination pair.
///
/// Errors are stored in a reconstructible form because [`NsError`] is not
/// `Clone` (it can wrap a `reqwest::Error`).
#[derive(Debug, Clone)]
enum Scripted {
    Trips(Vec<Trip>),
    Api { status: u16, message: String },
    Json { message: String },
    Unauthorized,
}

impl Scripted {
    fn from_error(error: NsError) -> Self {
        match error {
            NsError::Api { status, message } => Scripted::Api { status, message },
            NsError::Json { message } => Scripted::Json { message },
            NsError::Unauthorized => Scripted::Unauthorized,
            // Network errors cannot be rebuilt; surface them as status 0
            NsError::Http(e) => Scripted::Api {
                status: 0,
                message: e.to_string(),
            },
        }
    }

    fn to_result(&self) -> Result<Vec<Trip>, NsError> {
        match self {
            Scripted::Trips(trips) => Ok(trips.clone()),
            Scripted::Api { status, message } => Err(NsError::Api {
                status: *status,
                message: message.clone(),
            }),
            Scripted::Json { message } => Err(NsError::Json {
                message: message.clone(),
            }),
            Scripted::Unauthorized => Err(NsError::Unauthorized),
        }
    }
}

/// Mock trip provider scripted per origin/destination pair.
///
/// Unscripted pairs return no trips. Tracks the number of `trips` calls for
/// idempotency assertions.
#[derive(Debug, Clone, Default)]
pub struct MockTripProvider {
    responses: HashMap<(StationCode, StationCode), Scripted>,
    calls: Arc<AtomicUsize>,
}

impl MockTripProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the trip options for a pair.
    pub fn with_trips(mut self, from: &str, to: &str, trips: Vec<Trip>) -> Self {
        self.responses.insert(pair(from, to), Scripted::Trips(trips));
        self
    }

    /// Script an error for a pair. The error repeats on every query.
    pub fn with_error(mut self, from: &str, to: &str, error: NsError) -> Self {
        self.responses
            .insert(pair(from, to), Scripted::from_error(error));
        self
    }

    /// Number of `trips` calls made against this mock.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn pair(from: &str, to: &str) -> (StationCode, StationCode) {
    (
        StationCode::parse(from).expect("valid code literal"),
        StationCode::parse(to).expect("valid code literal"),
    )
}

impl TripProvider for MockTripProvider {
    async fn trips(
        &self,
        _departure: &DepartureTime,
        from: &StationCode,
        _via: Option<&StationCode>,
        to: &StationCode,
    ) -> Result<Vec<Trip>, NsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.responses.get(&(from.clone(), to.clone())) {
            None => Ok(Vec::new()),
            Some(scripted) => scripted.to_result(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departure() -> DepartureTime {
        DepartureTime::parse("14-04-2026 08:30").unwrap()
    }

    #[tokio::test]
    async fn unscripted_pair_returns_no_trips() {
        let provider = MockTripProvider::new();
        let (from, to) = pair("UT", "ASD");

        let trips = provider.trips(&departure(), &from, None, &to).await.unwrap();
        assert!(trips.is_empty());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn scripted_trips_repeat() {
        let provider = MockTripProvider::new().with_trips(
            "UT",
            "ASD",
            vec![Trip {
                destination: "Amsterdam Centraal".to_string(),
                travel_time_planned: "0:27".to_string(),
            }],
        );
        let (from, to) = pair("UT", "ASD");

        for _ in 0..2 {
            let trips = provider.trips(&departure(), &from, None, &to).await.unwrap();
            assert_eq!(trips.len(), 1);
        }
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn scripted_error_repeats() {
        let provider = MockTripProvider::new().with_error(
            "UT",
            "ASD",
            NsError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            },
        );
        let (from, to) = pair("UT", "ASD");

        for _ in 0..2 {
            let err = provider.trips(&departure(), &from, None, &to).await.unwrap_err();
            assert!(matches!(err, NsError::Api { status: 500, .. }));
        }
    }
}
