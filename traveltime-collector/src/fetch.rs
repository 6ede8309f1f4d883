//! Trip fetching and per-origin dataset assembly.
//!
//! For one origin station, queries the trip provider once per destination
//! in registry order, keeps the shortest trip per destination and assembles
//! the travel-time dataset that gets persisted. Per-destination failures are
//! expected (the provider's empty-result defect, permanent 500s for a few
//! stations) and never abort the origin's run.

use tracing::{Instrument, error, info, info_span, warn};

use crate::config::Throttle;
use crate::domain::{DepartureTime, StationCode, format_planned_minutes, parse_planned_minutes};
use crate::ns::NsError;
use crate::registry::{Registry, Station};
use crate::store::{StoreError, TravelTimeEntry, TravelTimeSet, TravelTimeStore};

/// One trip option between an origin and a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    /// Destination name as the provider reports it.
    pub destination: String,
    /// Planned duration in "H:MM" format.
    pub travel_time_planned: String,
}

/// Trait for querying trips between two stations.
///
/// This abstraction allows the fetcher to be tested with mock data.
pub trait TripProvider {
    /// All trip options from `from` to `to` departing around `departure`,
    /// optionally routed via a third station.
    ///
    /// No results must be an empty vector; the known provider defect
    /// surfaces as [`NsError::Json`] instead and is treated as empty by
    /// callers.
    fn trips(
        &self,
        departure: &DepartureTime,
        from: &StationCode,
        via: Option<&StationCode>,
        to: &StationCode,
    ) -> impl Future<Output = Result<Vec<Trip>, NsError>>;
}

/// Errors from the collection loop.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Ns(#[from] NsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Build the travel-time dataset for one origin.
///
/// Seeds the dataset with the origin itself at zero minutes, then queries
/// every other registry station in order. Recoverable provider errors and
/// empty results skip the destination; fatal errors abort the run.
pub async fn fetch_travel_times<P: TripProvider>(
    provider: &P,
    registry: &Registry,
    origin: &Station,
    departure: &DepartureTime,
    throttle: &Throttle,
) -> Result<TravelTimeSet, NsError> {
    let span = info_span!("fetch_travel_times", origin = %origin.code());
    async move {
        let mut set = TravelTimeSet::new();
        set.push(TravelTimeEntry {
            id: Some(origin.code().clone()),
            name: origin.name().to_string(),
            travel_time_min: 0,
            travel_time_planned: format_planned_minutes(0),
        });

        let mut first = true;
        for destination in registry.iter() {
            if destination.code() == origin.code() {
                continue;
            }
            if !first {
                throttle.pause().await;
            }
            first = false;

            if let Some(entry) =
                fetch_destination(provider, registry, origin, destination, departure).await?
            {
                set.push(entry);
            }
        }

        Ok(set)
    }
    .instrument(span)
    .await
}

/// Query one destination and reduce the trip options to the shortest.
///
/// Returns `Ok(None)` when the destination yields no usable trip: empty
/// results, recoverable provider errors, or nothing but malformed durations.
async fn fetch_destination<P: TripProvider>(
    provider: &P,
    registry: &Registry,
    origin: &Station,
    destination: &Station,
    departure: &DepartureTime,
) -> Result<Option<TravelTimeEntry>, NsError> {
    let trips = match provider
        .trips(departure, origin.code(), None, destination.code())
        .await
    {
        Ok(trips) => trips,
        Err(e) if e.is_recoverable() => {
            error!(
                destination = %destination.name(),
                error = %e,
                "failed to fetch trips, skipping destination"
            );
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    // Shortest trip wins; ties keep the first in response order
    let mut shortest: Option<(u32, &Trip)> = None;
    for trip in &trips {
        let minutes = match parse_planned_minutes(&trip.travel_time_planned) {
            Ok(minutes) => minutes,
            Err(e) => {
                warn!(
                    destination = %trip.destination,
                    planned = %trip.travel_time_planned,
                    error = %e,
                    "skipping trip with malformed planned duration"
                );
                continue;
            }
        };
        if shortest.is_none_or(|(best, _)| minutes < best) {
            shortest = Some((minutes, trip));
        }
    }

    let Some((minutes, trip)) = shortest else {
        return Ok(None);
    };

    info!(
        destination = %trip.destination,
        minutes,
        planned = %trip.travel_time_planned,
        "resolved shortest trip"
    );

    Ok(Some(TravelTimeEntry {
        id: registry.find_code_by_name(&trip.destination).cloned(),
        name: trip.destination.clone(),
        travel_time_min: minutes,
        travel_time_planned: trip.travel_time_planned.clone(),
    }))
}

/// Collect travel-time files for several origins, skipping origins that
/// already have one.
///
/// The existence check runs before any network traffic for the origin, so
/// re-running a partially completed batch only fetches what is still
/// missing.
pub async fn collect_travel_times<P: TripProvider>(
    provider: &P,
    registry: &Registry,
    store: &TravelTimeStore,
    origins: &[&Station],
    departure: &DepartureTime,
    throttle: &Throttle,
) -> Result<(), CollectError> {
    for &origin in origins {
        if store.exists(origin) {
            warn!(
                origin = %origin.code(),
                "travel-time file already exists, skipping origin"
            );
            continue;
        }

        let set = fetch_travel_times(provider, registry, origin, departure, throttle).await?;
        store.write_if_absent(origin, &set)?;
    }

    Ok(())
}
