//! Application state for the web layer.

use std::sync::Arc;

use crate::stations::StationCatalog;
use crate::tracker::TrainTrackerClient;

/// Shared application state.
///
/// Holds only immutable clients; every request does its own fetching.
#[derive(Clone)]
pub struct AppState {
    /// Train Tracker arrivals client
    pub tracker: Arc<TrainTrackerClient>,

    /// Station catalog
    pub stations: Arc<StationCatalog>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(tracker: TrainTrackerClient, stations: StationCatalog) -> Self {
        Self {
            tracker: Arc::new(tracker),
            stations: Arc::new(stations),
        }
    }
}
