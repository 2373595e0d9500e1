//! Station catalog.
//!
//! Loads per-stop rows from a configurable source (bundled file, in-memory
//! batch, or the City of Chicago open-data portal) and collapses them into
//! one record per station with the set of lines serving it.

mod client;
mod error;
mod normalize;
mod source;
mod types;

pub(crate) use client::DEFAULT_CATALOG_URL;
pub use client::{StationClient, StationClientConfig};
pub use error::StationError;
pub use normalize::{Normalized, normalize_stations, normalize_stations_report};
pub use source::{StationCatalog, StationSource};
pub use types::{LINE_FLAGS, Location, RawStopRecord};
