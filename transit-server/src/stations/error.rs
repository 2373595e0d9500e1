//! Station catalog error types.

use std::path::PathBuf;

/// Errors that can occur when loading the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse catalog JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a bundled catalog file
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
