//! Collapse per-stop catalog rows into one record per station.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::domain::{MapId, StationRecord};

use super::types::RawStopRecord;

/// Result of a normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// One record per distinct map id, in order of first appearance.
    pub stations: Vec<StationRecord>,
    /// Rows dropped because they carried no map id.
    pub skipped: usize,
}

/// Build station records from raw stop rows.
///
/// The first row seen for a map id supplies the scalar fields; later
/// rows for the same id only add to its line set. Rows without a map id
/// are skipped with a warning.
pub fn normalize_stations(records: &[RawStopRecord]) -> Vec<StationRecord> {
    normalize_stations_report(records).stations
}

/// Like [`normalize_stations`], also reporting how many rows were skipped.
pub fn normalize_stations_report(records: &[RawStopRecord]) -> Normalized {
    let mut stations: Vec<StationRecord> = Vec::new();
    let mut index: HashMap<MapId, usize> = HashMap::new();
    let mut skipped = 0;

    for record in records {
        let Some(map_id) = record.station_id() else {
            warn!(
                stop_id = record.stop_id.as_deref().unwrap_or(""),
                stop_name = %record.stop_name,
                "skipping stop record without a map id"
            );
            skipped += 1;
            continue;
        };

        match index.get(&map_id) {
            Some(&i) => stations[i].lines.extend(record.lines()),
            None => {
                index.insert(map_id.clone(), stations.len());
                stations.push(StationRecord {
                    map_id,
                    station_name: record.station_name.clone(),
                    station_descriptive_name: record.station_descriptive_name.clone(),
                    latitude: record.location.latitude.clone(),
                    longitude: record.location.longitude.clone(),
                    ada: record.ada,
                    lines: record.lines().collect::<BTreeSet<_>>(),
                });
            }
        }
    }

    Normalized { stations, skipped }
}
