//! NS travel API HTTP client.
//!
//! Implements [`StationSource`] against the station listing endpoint and
//! [`TripProvider`] against the trip endpoint. Authentication is HTTP basic
//! with the account username and API key.

use crate::domain::{DepartureTime, StationCode};
use crate::fetch::{Trip, TripProvider};
use crate::registry::StationSource;

use super::error::NsError;
use super::types::{StationRecord, StationsResponse, TripsResponse};

/// Default base URL for the NS travel API.
const DEFAULT_BASE_URL: &str = "https://webservices.ns.nl/api/v2";

/// Configuration for the NS client.
#[derive(Debug, Clone)]
pub struct NsConfig {
    /// Account username for basic auth.
    pub username: String,
    /// API key used as the basic-auth password.
    pub api_key: String,
    /// Base URL for the API (defaults to production).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl NsConfig {
    /// Create a new config with the given credentials.
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// NS travel API client.
#[derive(Debug, Clone)]
pub struct NsClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    api_key: String,
}

impl NsClient {
    /// Create a new NS client with the given configuration.
    pub fn new(config: NsConfig) -> Result<Self, NsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            username: config.username,
            api_key: config.api_key,
        })
    }

    /// Issue an authenticated GET and map error statuses to the taxonomy.
    async fn get_body(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, NsError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .basic_auth(&self.username, Some(&self.api_key))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(NsError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

impl StationSource for NsClient {
    /// Fetch the full station listing, all countries included.
    async fn fetch_stations(&self) -> Result<Vec<StationRecord>, NsError> {
        let url = format!("{}/stations", self.base_url);
        let body = self.get_body(&url, &[]).await?;

        let response: StationsResponse =
            serde_json::from_str(&body).map_err(|e| NsError::Json {
                message: e.to_string(),
            })?;

        Ok(response.stations)
    }
}

impl TripProvider for NsClient {
    /// Fetch all trip options for an origin/destination pair.
    ///
    /// When there are no results the endpoint is supposed to answer with an
    /// empty trip list, but is known to answer with a mistyped body
    /// instead; that surfaces here as [`NsError::Json`] and the fetch loop
    /// treats it as empty.
    async fn trips(
        &self,
        departure: &DepartureTime,
        from: &StationCode,
        via: Option<&StationCode>,
        to: &StationCode,
    ) -> Result<Vec<Trip>, NsError> {
        let url = format!("{}/trips", self.base_url);
        let body = self
            .get_body(
                &url,
                &[
                    ("dateTime", departure.as_str()),
                    ("fromStation", from.as_str()),
                    ("viaStation", via.map_or("", StationCode::as_str)),
                    ("toStation", to.as_str()),
                ],
            )
            .await?;

        let response: TripsResponse = serde_json::from_str(&body).map_err(|e| NsError::Json {
            message: e.to_string(),
        })?;

        Ok(response
            .trips
            .into_iter()
            .map(|record| Trip {
                destination: record.destination,
                travel_time_planned: record.travel_time_planned,
            })
            .collect())
    }
}
