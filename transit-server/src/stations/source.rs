//! Where raw stop rows come from, and the catalog built on top.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::StationRecord;

use super::client::StationClient;
use super::error::StationError;
use super::normalize::normalize_stations_report;
use super::types::RawStopRecord;

/// Supplier of raw stop rows.
///
/// Every variant is read afresh on each [`load`](Self::load); nothing is
/// cached between calls.
#[derive(Debug, Clone)]
pub enum StationSource {
    /// A batch held in memory.
    Static(Arc<[RawStopRecord]>),
    /// A JSON array of rows on disk.
    File(PathBuf),
    /// The remote open-data catalog.
    Remote(StationClient),
}

impl StationSource {
    /// Fetch the current batch of rows.
    pub async fn load(&self) -> Result<Vec<RawStopRecord>, StationError> {
        match self {
            StationSource::Static(records) => Ok(records.to_vec()),
            StationSource::File(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| StationError::Io {
                        path: path.clone(),
                        source,
                    })?;
                serde_json::from_str(&json).map_err(|e| StationError::Json {
                    message: format!("{}: {e}", path.display()),
                })
            }
            StationSource::Remote(client) => client.fetch_all().await,
        }
    }
}

impl From<Vec<RawStopRecord>> for StationSource {
    fn from(records: Vec<RawStopRecord>) -> Self {
        StationSource::Static(records.into())
    }
}

/// Normalized station list backed by a [`StationSource`].
#[derive(Debug, Clone)]
pub struct StationCatalog {
    source: StationSource,
}

impl StationCatalog {
    pub fn new(source: StationSource) -> Self {
        Self { source }
    }

    /// Load the rows and collapse them into one record per station.
    ///
    /// A failed load fails the whole call; there are no partial results.
    pub async fn get_stations(&self) -> Result<Vec<StationRecord>, StationError> {
        let records = self.source.load().await?;
        let normalized = normalize_stations_report(&records);

        debug!(rows = records.len(), "loaded stop rows");
        if normalized.skipped > 0 {
            info!(
                skipped = normalized.skipped,
                "dropped stop rows without a map id"
            );
        }

        Ok(normalized.stations)
    }
}
