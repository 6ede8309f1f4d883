//! Travel-time collection pipeline for railway contour maps.
//!
//! Fetches trip times from the NS travel API, persists one travel-time
//! JSON file per origin station, reconciles gaps left by provider
//! failures, and exports the station summary the contour-map website
//! consumes.

pub mod config;
pub mod domain;
pub mod fetch;
pub mod ns;
pub mod reconcile;
pub mod registry;
pub mod store;
