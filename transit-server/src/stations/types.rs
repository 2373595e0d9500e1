//! Raw stop records as published by the station catalog.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Line, MapId};
use crate::lenient;

/// Raw-record flag key for each line, in catalog column order.
///
/// Normalization consults this table rather than naming lines one by one,
/// so adding a line only touches this list and [`Line`].
pub const LINE_FLAGS: [(&str, Line); 9] = [
    ("red", Line::Red),
    ("blue", Line::Blue),
    ("g", Line::Green),
    ("brn", Line::Brown),
    ("p", Line::Purple),
    ("pexp", Line::PurpleExpress),
    ("y", Line::Yellow),
    ("pnk", Line::Pink),
    ("o", Line::Orange),
];

/// One row of the catalog: a single directional stop and the lines
/// calling at it.
///
/// Several rows share a `map_id` when a station has more than one
/// platform or line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStopRecord {
    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub stop_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub direction_id: Option<String>,

    #[serde(default)]
    pub stop_name: String,

    #[serde(default)]
    pub station_name: String,

    #[serde(default)]
    pub station_descriptive_name: String,

    /// Station id shared by every stop at the same location.
    #[serde(default, deserialize_with = "lenient::opt_string_or_number")]
    pub map_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub ada: bool,

    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub location: Location,

    /// Remaining columns, including the per-line flags.
    #[serde(flatten)]
    pub flags: Map<String, Value>,
}

impl RawStopRecord {
    /// The station this stop belongs to, if the row names one.
    pub fn station_id(&self) -> Option<MapId> {
        self.map_id.as_deref().and_then(|id| MapId::parse(id).ok())
    }

    /// Lines whose flag is set on this row, in [`LINE_FLAGS`] order.
    ///
    /// Missing or malformed flags count as unset.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        LINE_FLAGS
            .iter()
            .filter(|(key, _)| lenient::is_truthy(self.flags.get(*key)))
            .map(|(_, line)| *line)
    }

    /// Set a line flag. Used to build records by hand.
    pub fn with_line(mut self, line: Line) -> Self {
        if let Some((key, _)) = LINE_FLAGS.iter().find(|(_, l)| *l == line) {
            self.flags.insert((*key).to_string(), Value::Bool(true));
        }
        self
    }
}

/// Geographic position of a stop.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub latitude: String,

    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub longitude: String,

    /// Unparsed address blob.
    #[serde(default)]
    pub human_address: Option<Value>,
}
