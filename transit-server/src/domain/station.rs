//! Station identifier and normalized station record.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Line;

/// Error returned when parsing an invalid station map id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid map id: {reason}")]
pub struct InvalidMapId {
    reason: &'static str,
}

/// Canonical identifier of a physical station ("map id").
///
/// Shared by every stop and line at the same location, unlike a stop id
/// which names one directional platform. Never blank.
///
/// # Examples
///
/// ```
/// use transit_server::domain::MapId;
///
/// let clark_lake = MapId::parse(" 40380 ").unwrap();
/// assert_eq!(clark_lake.as_str(), "40380");
///
/// assert!(MapId::parse("").is_err());
/// assert!(MapId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MapId(String);

impl MapId {
    /// Parse a map id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidMapId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidMapId {
                reason: "must not be blank",
            });
        }
        Ok(MapId(trimmed.to_string()))
    }

    /// Returns the map id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MapId {
    type Error = InvalidMapId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MapId::parse(&value)
    }
}

impl From<MapId> for String {
    fn from(id: MapId) -> Self {
        id.0
    }
}

impl fmt::Debug for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapId({})", self.0)
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One physical station with every line that serves it.
///
/// Built from one or more raw stop records sharing a [`MapId`]. Scalar
/// fields come from the first contributing record; `lines` is the union
/// over all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    pub map_id: MapId,
    pub station_name: String,
    pub station_descriptive_name: String,
    /// Decimal degrees, as delivered upstream.
    pub latitude: String,
    /// Decimal degrees, as delivered upstream.
    pub longitude: String,
    /// Step-free access.
    pub ada: bool,
    pub lines: BTreeSet<Line>,
}

impl StationRecord {
    /// Whether the given line calls here.
    pub fn is_served_by(&self, line: Line) -> bool {
        self.lines.contains(&line)
    }
}
