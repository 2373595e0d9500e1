//! Train Tracker arrivals proxy.
//!
//! HTTP client for the CTA Train Tracker `ttarrivals` endpoint, which
//! returns predicted arrivals for a station.
//!
//! Key characteristics of the upstream:
//! - Stations are addressed by **map id**, not by platform (stop) id
//! - The API key travels as a query parameter, so request URLs are secret
//! - Application errors (bad key, unknown station) come back as HTTP 200
//!   with a non-zero `errCd` inside the body

mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub(crate) use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use client::{TrainTrackerClient, TrainTrackerConfig};
pub use error::TrackerError;
pub use types::{ArrivalRecord, ArrivalsPayload, TrainTrackerResponse};
