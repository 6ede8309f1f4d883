//! Domain types for the travel-time collector.
//!
//! This module contains the core domain model types that represent
//! validated rail data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod duration;
mod kind;
mod station_code;
mod timestamp;

pub use duration::{DurationError, format_planned_minutes, parse_planned_minutes};
pub use kind::{StationKind, UnknownStationKind};
pub use station_code::{InvalidStationCode, StationCode};
pub use timestamp::{DepartureTime, InvalidDepartureTime};
