use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transit_server::config::{AppConfig, StationSourceConfig};
use transit_server::stations::{StationCatalog, StationClient, StationClientConfig, StationSource};
use transit_server::tracker::{TrainTrackerClient, TrainTrackerConfig};
use transit_server::web::{AppState, create_router};

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() {
    init_logger();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    if config.api_key.is_empty() {
        warn!("TRAIN_API_KEY not set. Arrivals requests will be rejected upstream.");
    }

    // Create Train Tracker client
    let tracker_config = TrainTrackerConfig::new(&config.api_key)
        .with_base_url(&config.tracker_base_url)
        .with_timeout(config.tracker_timeout_secs);
    let tracker =
        TrainTrackerClient::new(tracker_config).expect("Failed to create Train Tracker client");

    // Pick the station source
    let source = match &config.stations {
        StationSourceConfig::File(path) => {
            info!(path = %path.display(), "serving stations from file");
            StationSource::File(path.clone())
        }
        StationSourceConfig::Remote { url, app_token } => {
            info!(%url, "serving stations from remote catalog");
            let mut station_config = StationClientConfig::new().with_url(url);
            if let Some(token) = app_token {
                station_config = station_config.with_app_token(token);
            }
            let client =
                StationClient::new(station_config).expect("Failed to create Station client");
            StationSource::Remote(client)
        }
    };

    let state = AppState::new(tracker, StationCatalog::new(source));
    let app = create_router(state, config.static_dir.as_deref());

    let addr = config.listen_addr;
    info!("Transit arrivals server listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /health                 - Health check");
    info!("  GET  /api/arrivals?mapid=ID  - Arrivals for a station");
    info!("  GET  /api?mapid=ID           - Raw upstream arrivals response");
    info!("  GET  /api/stations           - Stations and their lines");
    info!("  GET  /api/lines              - Line names and colours");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
