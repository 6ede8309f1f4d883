//! NS travel API client.
//!
//! This module provides an HTTP client for the NS (Dutch Railways) travel
//! API: the station listing endpoint and the trip endpoint.
//!
//! Key characteristics of the API:
//! - Authentication is HTTP basic with the account username and API key
//! - Trip departure times go over the wire as "DD-MM-YYYY hh:mm"
//! - Planned durations come back as "H:MM" strings
//! - "No trips" is supposed to be an empty list, but a known defect makes
//!   the endpoint answer with a mistyped body instead; callers treat the
//!   resulting parse error as an empty result
//! - A few stations make the trip endpoint answer 500 permanently

mod client;
mod error;
#[cfg(test)]
mod mock;
mod types;

pub use client::{NsClient, NsConfig};
pub use error::NsError;
#[cfg(test)]
pub use mock::{MockStationSource, MockTripProvider};
pub use types::{StationNames, StationRecord, StationsResponse, TripRecord, TripsResponse};
