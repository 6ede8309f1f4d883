//! Wire DTOs for the NS travel API.

use serde::{Deserialize, Serialize};

/// Wrapper for the station listing response.
#[derive(Debug, Deserialize)]
pub struct StationsResponse {
    pub stations: Vec<StationRecord>,
}

/// The name variants the station listing carries per station.
///
/// The long form is the display name used everywhere in this crate; the
/// short and middle forms are kept because the station summary file exposes
/// all three to the website.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StationNames {
    pub long: String,
    pub middle: Option<String>,
    pub short: Option<String>,
}

impl StationNames {
    /// Convenience constructor with only the long name set.
    pub fn long_only(long: impl Into<String>) -> Self {
        Self {
            long: long.into(),
            middle: None,
            short: None,
        }
    }
}

/// One station row from the listing endpoint.
///
/// Latitude and longitude arrive as numeric strings and the station class
/// as its wire name; conversion to validated domain types happens at
/// registry load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub code: String,
    pub names: StationNames,
    pub country: String,
    pub lat: String,
    pub lon: String,
    pub station_type: String,
}

/// Wrapper for the trip listing response.
#[derive(Debug, Deserialize)]
pub struct TripsResponse {
    pub trips: Vec<TripRecord>,
}

/// One trip option for an origin/destination pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub destination: String,
    /// Planned duration in "H:MM" format.
    pub travel_time_planned: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_record_from_wire_json() {
        let json = r#"{
            "code": "UT",
            "names": {"long": "Utrecht Centraal", "middle": "Utrecht C.", "short": "Utrecht"},
            "country": "NL",
            "lat": "52.089444",
            "lon": "5.110278",
            "stationType": "megastation"
        }"#;

        let record: StationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.code, "UT");
        assert_eq!(record.names.long, "Utrecht Centraal");
        assert_eq!(record.lat, "52.089444");
        assert_eq!(record.station_type, "megastation");
    }

    #[test]
    fn trips_response_from_wire_json() {
        let json = r#"{
            "trips": [
                {"destination": "Amsterdam Centraal", "travelTimePlanned": "0:27"},
                {"destination": "Amsterdam Centraal", "travelTimePlanned": "0:34"}
            ]
        }"#;

        let response: TripsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.trips.len(), 2);
        assert_eq!(response.trips[0].travel_time_planned, "0:27");
    }

    #[test]
    fn mistyped_empty_trips_is_a_parse_error() {
        // The known provider defect: no results arrive as a null trips
        // field rather than an empty array.
        let json = r#"{"trips": null}"#;
        assert!(serde_json::from_str::<TripsResponse>(json).is_err());
    }
}
