//! Station classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown station class name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station kind: {name}")]
pub struct UnknownStationKind {
    name: String,
}

/// The NS station classification.
///
/// Serde names match the wire strings the station listing uses verbatim
/// ("knooppunt" marks interchange stations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    #[serde(rename = "stoptreinstation")]
    StopTrain,
    #[serde(rename = "megastation")]
    Mega,
    #[serde(rename = "knooppuntIntercitystation")]
    InterchangeIntercity,
    #[serde(rename = "sneltreinstation")]
    FastTrain,
    #[serde(rename = "intercitystation")]
    Intercity,
    #[serde(rename = "knooppuntStoptreinstation")]
    InterchangeStopTrain,
    #[serde(rename = "facultatiefStation")]
    Optional,
    #[serde(rename = "knooppuntSneltreinstation")]
    InterchangeFastTrain,
}

impl StationKind {
    /// Parse a station kind from its wire name.
    pub fn parse(name: &str) -> Result<Self, UnknownStationKind> {
        match name {
            "stoptreinstation" => Ok(Self::StopTrain),
            "megastation" => Ok(Self::Mega),
            "knooppuntIntercitystation" => Ok(Self::InterchangeIntercity),
            "sneltreinstation" => Ok(Self::FastTrain),
            "intercitystation" => Ok(Self::Intercity),
            "knooppuntStoptreinstation" => Ok(Self::InterchangeStopTrain),
            "facultatiefStation" => Ok(Self::Optional),
            "knooppuntSneltreinstation" => Ok(Self::InterchangeFastTrain),
            other => Err(UnknownStationKind {
                name: other.to_string(),
            }),
        }
    }

    /// Returns the wire name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StopTrain => "stoptreinstation",
            Self::Mega => "megastation",
            Self::InterchangeIntercity => "knooppuntIntercitystation",
            Self::FastTrain => "sneltreinstation",
            Self::Intercity => "intercitystation",
            Self::InterchangeStopTrain => "knooppuntStoptreinstation",
            Self::Optional => "facultatiefStation",
            Self::InterchangeFastTrain => "knooppuntSneltreinstation",
        }
    }
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_wire_names() {
        for name in [
            "stoptreinstation",
            "megastation",
            "knooppuntIntercitystation",
            "sneltreinstation",
            "intercitystation",
            "knooppuntStoptreinstation",
            "facultatiefStation",
            "knooppuntSneltreinstation",
        ] {
            let kind = StationKind::parse(name).unwrap();
            assert_eq!(kind.as_str(), name);
        }
    }

    #[test]
    fn unknown_name_is_error() {
        let err = StationKind::parse("tramstation").unwrap_err();
        assert!(err.to_string().contains("tramstation"));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&StationKind::InterchangeIntercity).unwrap();
        assert_eq!(json, "\"knooppuntIntercitystation\"");
        let back: StationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StationKind::InterchangeIntercity);
    }
}
