//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::stations::DEFAULT_CATALOG_URL;
use crate::tracker::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Default bundled station dataset, relative to the working directory.
const DEFAULT_STATIONS_FILE: &str = "data/stations.json";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Errors from parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a socket address")]
    InvalidAddr { var: &'static str, value: String },

    #[error("invalid {var}: {value:?} is not a positive number of seconds")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Where station rows are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationSourceConfig {
    /// Bundled JSON file.
    File(PathBuf),
    /// Remote open-data catalog.
    Remote {
        url: String,
        app_token: Option<String>,
    },
}

/// Full server configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Train Tracker API key. Empty if unset.
    pub api_key: String,
    pub tracker_base_url: String,
    pub tracker_timeout_secs: u64,
    pub stations: StationSourceConfig,
    pub listen_addr: SocketAddr,
    /// Front-end assets to serve at `/`, if any.
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Blank values are treated as unset.
    ///
    /// | Variable                     | Default                                   |
    /// |------------------------------|-------------------------------------------|
    /// | `TRAIN_API_KEY`              | empty                                     |
    /// | `TRAIN_TRACKER_URL`          | `https://lapi.transitchicago.com/api/1.0` |
    /// | `TRAIN_TRACKER_TIMEOUT_SECS` | `10`                                      |
    /// | `STATIONS_SOURCE`            | `data/stations.json` (or `remote`)        |
    /// | `STATIONS_URL`               | City of Chicago "L" stops dataset         |
    /// | `STATIONS_APP_TOKEN`         | none                                      |
    /// | `LISTEN_ADDR`                | `127.0.0.1:3000`                          |
    /// | `STATIC_DIR`                 | none                                      |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let tracker_timeout_secs = match get("TRAIN_TRACKER_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: "TRAIN_TRACKER_TIMEOUT_SECS",
                        value,
                    });
                }
            },
        };

        let stations = match get("STATIONS_SOURCE") {
            Some(source) if source.eq_ignore_ascii_case("remote") => StationSourceConfig::Remote {
                url: get("STATIONS_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
                app_token: get("STATIONS_APP_TOKEN"),
            },
            Some(path) => StationSourceConfig::File(PathBuf::from(path)),
            None => StationSourceConfig::File(PathBuf::from(DEFAULT_STATIONS_FILE)),
        };

        let addr = get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = addr.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "LISTEN_ADDR",
            value: addr.clone(),
        })?;

        Ok(Self {
            api_key: get("TRAIN_API_KEY").unwrap_or_default(),
            tracker_base_url: get("TRAIN_TRACKER_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            tracker_timeout_secs,
            stations,
            listen_addr,
            static_dir: get("STATIC_DIR").map(PathBuf::from),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("tracker_base_url", &self.tracker_base_url)
            .field("tracker_timeout_secs", &self.tracker_timeout_secs)
            .field("stations", &self.stations)
            .field("listen_addr", &self.listen_addr)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}
