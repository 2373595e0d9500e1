//! City of Chicago open-data station catalog client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::error::StationError;
use super::types::RawStopRecord;

/// Default URL for the "CTA - System Information - List of 'L' Stops" dataset.
pub(crate) const DEFAULT_CATALOG_URL: &str =
    "https://data.cityofchicago.org/resource/8pix-ypme.json";

/// Row limit requested from the catalog. The dataset is a few hundred rows;
/// the portal's default page size would silently truncate larger ones.
const ROW_LIMIT: &str = "5000";

/// How much of an error body to keep in the error.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Dataset URL
    pub url: String,
    /// Optional app token for the `X-App-Token` header (raises rate limits)
    pub app_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a config pointing at the public dataset.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            app_token: None,
            timeout_secs: 30,
        }
    }

    /// Set a custom dataset URL (for testing).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the app token.
    pub fn with_app_token(mut self, token: impl Into<String>) -> Self {
        self.app_token = Some(token.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the remote station catalog.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    url: String,
}

impl StationClient {
    /// Create a new catalog client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.app_token {
            let value = HeaderValue::from_str(token).map_err(|_| StationError::Api {
                status: 0,
                message: "Invalid app token format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-app-token"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Fetch every stop row from the catalog.
    pub async fn fetch_all(&self) -> Result<Vec<RawStopRecord>, StationError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("$limit", ROW_LIMIT)])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body.chars().take(BODY_SNIPPET_CHARS).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| StationError::Json {
            message: e.to_string(),
        })
    }
}
