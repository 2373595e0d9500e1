//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Line;

/// Query string for the arrivals endpoints.
#[derive(Debug, Deserialize)]
pub struct ArrivalsQuery {
    /// Station map id, passed to the upstream as-is
    pub mapid: String,
}

/// A line in the colour legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInfo {
    /// Route code, as used in station and arrival payloads
    pub code: String,

    /// Display name
    pub name: String,

    /// Brand colour (`#RRGGBB`)
    pub hex: String,
}

impl From<Line> for LineInfo {
    fn from(line: Line) -> Self {
        Self {
            code: line.code().to_string(),
            name: line.name().to_string(),
            hex: line.hex().to_string(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
