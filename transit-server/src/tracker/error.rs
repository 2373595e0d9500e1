//! Train Tracker client error types.

use std::fmt;

/// Errors from the Train Tracker HTTP client.
///
/// Application-level errors reported inside a well-formed response body
/// (a non-zero `errCd`) are not errors here; they arrive as data.
#[derive(Debug)]
pub enum TrackerError {
    /// HTTP request failed (network error, timeout, etc.)
    ///
    /// The request URL is stripped because it carries the API key.
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned a non-success status code
    ApiError { status: u16, message: String },

    /// Invalid API key or unauthorized
    Unauthorized,

    /// Client could not be built from its configuration
    InvalidConfig(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::Http(e) => write!(f, "HTTP error: {e}"),
            TrackerError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TrackerError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            TrackerError::Unauthorized => write!(f, "unauthorized: check TRAIN_API_KEY"),
            TrackerError::InvalidConfig(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        TrackerError::Http(err.without_url())
    }
}
