//! HTTP route handlers.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::domain::{Line, StationRecord};
use crate::stations::StationError;
use crate::tracker::{ArrivalsPayload, TrackerError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// When `static_dir` is given, unmatched paths are served from it so the
/// front end can be hosted by the same process.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api", get(arrivals_raw))
        .route("/api/arrivals", get(arrivals))
        .route("/api/stations", get(stations))
        .route("/api/lines", get(lines))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Predicted arrivals for a station, unwrapped from the upstream envelope.
///
/// Upstream application errors (non-zero `errCd`) are returned with 200.
async fn arrivals(
    State(state): State<AppState>,
    Query(req): Query<ArrivalsQuery>,
) -> Result<Json<ArrivalsPayload>, AppError> {
    let payload = state.tracker.get_arrivals(&req.mapid).await?;
    Ok(Json(payload))
}

/// The upstream arrivals response exactly as received.
async fn arrivals_raw(
    State(state): State<AppState>,
    Query(req): Query<ArrivalsQuery>,
) -> Result<Json<Value>, AppError> {
    let raw = state.tracker.get_arrivals_raw(&req.mapid).await?;
    Ok(Json(raw))
}

/// Every station with the lines serving it.
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<StationRecord>>, AppError> {
    let stations = state.stations.get_stations().await?;
    Ok(Json(stations))
}

/// Line codes, names and colours.
async fn lines() -> Json<Vec<LineInfo>> {
    Json(Line::ALL.into_iter().map(LineInfo::from).collect())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// A collaborator we depend on failed
    BadGateway { message: String },
    Internal { message: String },
}

impl From<TrackerError> for AppError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::InvalidConfig(_) => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<StationError> for AppError {
    fn from(e: StationError) -> Self {
        match e {
            StationError::Io { .. } => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
