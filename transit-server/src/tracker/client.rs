//! Train Tracker HTTP client.
//!
//! Provides async methods for querying the arrivals endpoint. Every call
//! goes straight to the network: no caching, no retries.

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::error::TrackerError;
use super::types::{ArrivalsPayload, TrainTrackerResponse};

/// Default base URL for the Train Tracker API.
pub(crate) const DEFAULT_BASE_URL: &str = "https://lapi.transitchicago.com/api/1.0";

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How much of an unparseable or error body to keep in the error.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the Train Tracker client.
#[derive(Clone)]
pub struct TrainTrackerConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TrainTrackerConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl fmt::Debug for TrainTrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainTrackerConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Train Tracker arrivals client.
#[derive(Clone)]
pub struct TrainTrackerClient {
    http: reqwest::Client,
    arrivals_url: String,
    api_key: String,
}

impl TrainTrackerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TrainTrackerConfig) -> Result<Self, TrackerError> {
        if config.timeout_secs == 0 {
            return Err(TrackerError::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            arrivals_url: format!(
                "{}/ttarrivals.aspx",
                config.base_url.trim_end_matches('/')
            ),
            api_key: config.api_key,
        })
    }

    /// Get predicted arrivals for a station, unwrapped from the envelope.
    ///
    /// `map_id` is passed through as-is; unknown ids are reported by the
    /// upstream as an application error inside a successful payload (see
    /// [`ArrivalsPayload::is_error`]), not as an `Err`.
    pub async fn get_arrivals(&self, map_id: &str) -> Result<ArrivalsPayload, TrackerError> {
        let body = self.fetch(map_id).await?;

        let response: TrainTrackerResponse =
            serde_json::from_str(&body).map_err(|e| json_error(e, &body))?;
        let payload = response.payload;

        if payload.is_error() {
            warn!(
                map_id,
                err_cd = %payload.err_cd,
                err_nm = payload.err_nm.as_deref().unwrap_or(""),
                "upstream reported an application error"
            );
        } else {
            debug!(map_id, arrivals = payload.eta.len(), "fetched arrivals");
        }

        Ok(payload)
    }

    /// Get the raw upstream response, envelope included.
    pub async fn get_arrivals_raw(&self, map_id: &str) -> Result<Value, TrackerError> {
        let body = self.fetch(map_id).await?;
        serde_json::from_str(&body).map_err(|e| json_error(e, &body))
    }

    /// Issue the single outbound request and return the body text.
    async fn fetch(&self, map_id: &str) -> Result<String, TrackerError> {
        let response = self
            .http
            .get(&self.arrivals_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("mapid", map_id),
                ("outputType", "JSON"),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TrackerError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::ApiError {
                status: status.as_u16(),
                message: snippet(&body),
            });
        }

        Ok(response.text().await?)
    }
}

impl fmt::Debug for TrainTrackerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainTrackerClient")
            .field("arrivals_url", &self.arrivals_url)
            .finish_non_exhaustive()
    }
}

fn json_error(e: serde_json::Error, body: &str) -> TrackerError {
    TrackerError::Json {
        message: e.to_string(),
        body: Some(snippet(body)),
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::fake::{self, FAKE_API_KEY};

    fn client_for(base_url: &str) -> TrainTrackerClient {
        let config = TrainTrackerConfig::new(FAKE_API_KEY).with_base_url(base_url);
        TrainTrackerClient::new(config).unwrap()
    }

    #[test]
    fn config_builder() {
        let config = TrainTrackerConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(3);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn config_defaults() {
        let config = TrainTrackerConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn debug_output_hides_key() {
        let config = TrainTrackerConfig::new("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));

        let client = TrainTrackerClient::new(config).unwrap();
        assert!(!format!("{client:?}").contains("super-secret"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = TrainTrackerConfig::new("k").with_timeout(0);
        assert!(matches!(
            TrainTrackerClient::new(config),
            Err(TrackerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn trailing_slash_in_base_url() {
        let client = client_for("http://localhost:8080/api/1.0/");
        assert_eq!(
            client.arrivals_url,
            "http://localhost:8080/api/1.0/ttarrivals.aspx"
        );
    }

    #[tokio::test]
    async fn unwraps_envelope() {
        let upstream = fake::spawn().await;
        let client = client_for(&upstream.base_url);

        let payload = client.get_arrivals(fake::KNOWN_MAP_ID).await.unwrap();

        assert_eq!(payload.err_cd, "0");
        assert!(!payload.is_error());
        assert_eq!(payload.eta.len(), 1);
        assert_eq!(payload.eta[0].sta_id, fake::KNOWN_MAP_ID);
        assert_eq!(upstream.hits(), 1);
    }

    #[tokio::test]
    async fn application_error_is_data() {
        let upstream = fake::spawn().await;
        let client = client_for(&upstream.base_url);

        let payload = client.get_arrivals("99999").await.unwrap();

        assert!(payload.is_error());
        assert_eq!(payload.err_cd, "1");
        assert!(payload.eta.is_empty());
    }

    #[tokio::test]
    async fn wrong_key_is_reported_by_upstream() {
        let upstream = fake::spawn().await;
        let config = TrainTrackerConfig::new("wrong").with_base_url(&upstream.base_url);
        let client = TrainTrackerClient::new(config).unwrap();

        let payload = client.get_arrivals(fake::KNOWN_MAP_ID).await.unwrap();
        assert_eq!(payload.err_cd, "101");
    }

    #[tokio::test]
    async fn each_call_hits_upstream() {
        let upstream = fake::spawn().await;
        let client = client_for(&upstream.base_url);

        client.get_arrivals(fake::KNOWN_MAP_ID).await.unwrap();
        client.get_arrivals(fake::KNOWN_MAP_ID).await.unwrap();
        client.get_arrivals_raw(fake::KNOWN_MAP_ID).await.unwrap();

        assert_eq!(upstream.hits(), 3);
    }

    #[tokio::test]
    async fn raw_keeps_envelope() {
        let upstream = fake::spawn().await;
        let client = client_for(&upstream.base_url);

        let raw = client.get_arrivals_raw(fake::KNOWN_MAP_ID).await.unwrap();
        assert_eq!(raw["ctatt"]["errCd"], "0");
        assert_eq!(raw["ctatt"]["eta"][0]["staId"], fake::KNOWN_MAP_ID);
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let upstream = fake::spawn().await;
        let client = client_for(&upstream.base_url);

        let err = client.get_arrivals(fake::BAD_JSON_MAP_ID).await.unwrap_err();
        match err {
            TrackerError::Json { body, .. } => {
                assert_eq!(body.as_deref(), Some("this is not json"));
            }
            other => panic!("expected Json error, got {other:?}"),
        }

        let err = client
            .get_arrivals_raw(fake::BAD_JSON_MAP_ID)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Json { .. }));
    }

    #[tokio::test]
    async fn server_error_is_an_error() {
        let upstream = fake::spawn().await;
        let client = client_for(&upstream.base_url);

        let err = client
            .get_arrivals(fake::SERVER_ERROR_MAP_ID)
            .await
            .unwrap_err();
        match err {
            TrackerError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn long_error_body_is_truncated() {
        let upstream = fake::spawn().await;
        let client = client_for(&upstream.base_url);

        let err = client
            .get_arrivals(fake::VERBOSE_ERROR_MAP_ID)
            .await
            .unwrap_err();
        match err {
            TrackerError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert!(fake::VERBOSE_ERROR_LEN > BODY_SNIPPET_CHARS);
                assert_eq!(message.chars().count(), BODY_SNIPPET_CHARS);
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn scheduled_arrival_is_served_as_received() {
        let upstream = fake::spawn().await;
        let client = client_for(&upstream.base_url);

        let payload = client.get_arrivals(fake::SCHEDULED_MAP_ID).await.unwrap();
        assert!(!payload.is_error());
        assert_eq!(payload.eta[0].heading, None);
        assert!(payload.eta[0].is_scheduled());

        let raw = client.get_arrivals_raw(fake::SCHEDULED_MAP_ID).await.unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), raw["ctatt"]);
    }

    #[tokio::test]
    async fn forbidden_is_unauthorized() {
        let upstream = fake::spawn().await;
        let client = client_for(&upstream.base_url);

        let err = client
            .get_arrivals(fake::FORBIDDEN_MAP_ID)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Unauthorized));
    }

    #[tokio::test]
    async fn unreachable_upstream_hides_key() {
        let base_url = fake::unreachable_base_url().await;
        let config = TrainTrackerConfig::new("super-secret").with_base_url(&base_url);
        let client = TrainTrackerClient::new(config).unwrap();

        let err = client.get_arrivals(fake::KNOWN_MAP_ID).await.unwrap_err();
        assert!(matches!(err, TrackerError::Http(_)));
        assert!(!err.to_string().contains("super-secret"));
        assert!(!format!("{err:?}").contains("super-secret"));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let upstream = fake::spawn().await;
        let config = TrainTrackerConfig::new(FAKE_API_KEY)
            .with_base_url(&upstream.base_url)
            .with_timeout(1);
        let client = TrainTrackerClient::new(config).unwrap();

        let err = client.get_arrivals(fake::SLOW_MAP_ID).await.unwrap_err();
        match err {
            TrackerError::Http(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
