//! Domain types for the transit backend.
//!
//! Lines and stations are validated at construction time, so code that
//! receives these types can trust their contents.

mod line;
mod station;

pub use line::{Line, UnknownLine};
pub use station::{InvalidMapId, MapId, StationRecord};
