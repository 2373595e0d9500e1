//! In-process stand-in for the Train Tracker API.
//!
//! Serves canned responses from `127.0.0.1` on an ephemeral port so the
//! client and router can be exercised over real HTTP.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

pub(crate) const FAKE_API_KEY: &str = "test-key";

/// Returns one Blue Line arrival.
pub(crate) const KNOWN_MAP_ID: &str = "40380";
/// Returns a 200 with a non-JSON body.
pub(crate) const BAD_JSON_MAP_ID: &str = "badjson";
/// Returns a schedule-based arrival with null position fields, a numeric
/// `errCd` and an extra top-level key.
pub(crate) const SCHEDULED_MAP_ID: &str = "41320";
/// Returns a 500.
pub(crate) const SERVER_ERROR_MAP_ID: &str = "boom";
/// Returns a 503 with a body of [`VERBOSE_ERROR_LEN`] characters.
pub(crate) const VERBOSE_ERROR_MAP_ID: &str = "verbose";
pub(crate) const VERBOSE_ERROR_LEN: usize = 4000;
/// Returns a 403.
pub(crate) const FORBIDDEN_MAP_ID: &str = "denied";
/// Responds after three seconds.
pub(crate) const SLOW_MAP_ID: &str = "slow";

/// A running fake upstream.
pub(crate) struct FakeTracker {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeTracker {
    /// Number of arrivals requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a fake upstream in the background.
pub(crate) async fn spawn() -> FakeTracker {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/ttarrivals.aspx", get(arrivals))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeTracker {
        base_url: format!("http://{addr}"),
        hits,
    }
}

/// A base URL nothing is listening on.
pub(crate) async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn arrivals(
    State(hits): State<Arc<AtomicUsize>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    if params.get("outputType").map(String::as_str) != Some("JSON") {
        return (StatusCode::OK, "<ctatt><errCd>0</errCd></ctatt>").into_response();
    }

    if params.get("key").map(String::as_str) != Some(FAKE_API_KEY) {
        return Json(envelope("101", Some("Invalid API key."), json!(null))).into_response();
    }

    let map_id = params.get("mapid").cloned().unwrap_or_default();
    match map_id.as_str() {
        KNOWN_MAP_ID => Json(envelope("0", None, json!([blue_line_arrival(&map_id)])))
            .into_response(),
        SCHEDULED_MAP_ID => Json(json!({
            "ctatt": {
                "tmst": "2024-05-01T14:30:12",
                "errCd": 0,
                "errNm": null,
                "note": "reroute in effect",
                "eta": [scheduled_arrival(&map_id)],
            }
        }))
        .into_response(),
        BAD_JSON_MAP_ID => (StatusCode::OK, "this is not json").into_response(),
        SERVER_ERROR_MAP_ID => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        VERBOSE_ERROR_MAP_ID => (
            StatusCode::SERVICE_UNAVAILABLE,
            "e".repeat(VERBOSE_ERROR_LEN),
        )
            .into_response(),
        FORBIDDEN_MAP_ID => StatusCode::FORBIDDEN.into_response(),
        SLOW_MAP_ID => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(envelope("0", None, json!([]))).into_response()
        }
        _ => Json(envelope(
            "1",
            Some(&format!("Invalid mapid specified: '{map_id}'")),
            json!(null),
        ))
        .into_response(),
    }
}

fn envelope(err_cd: &str, err_nm: Option<&str>, eta: serde_json::Value) -> serde_json::Value {
    json!({
        "ctatt": {
            "tmst": "2024-05-01T14:30:12",
            "errCd": err_cd,
            "errNm": err_nm,
            "eta": eta,
        }
    })
}

fn blue_line_arrival(map_id: &str) -> serde_json::Value {
    json!({
        "staId": map_id,
        "stpId": "30374",
        "staNm": "Clark/Lake",
        "stpDe": "Service toward O'Hare",
        "rn": "104",
        "rt": "Blue",
        "destSt": "30171",
        "destNm": "O'Hare",
        "trDr": "1",
        "prdt": "2024-05-01T14:29:40",
        "arrT": "2024-05-01T14:33:40",
        "isApp": "0",
        "isSch": "0",
        "isDly": "0",
        "isFlt": "0",
        "flags": null,
        "lat": "41.87",
        "lon": "-87.63",
        "heading": "89"
    })
}

fn scheduled_arrival(map_id: &str) -> serde_json::Value {
    json!({
        "staId": map_id,
        "stpId": "30255",
        "staNm": "Belmont",
        "stpDe": "Service toward Loop",
        "rn": "814",
        "rt": "Brn",
        "destSt": "30249",
        "destNm": "Loop",
        "trDr": "5",
        "prdt": "2024-05-01T14:29:40",
        "arrT": "2024-05-01T14:41:00",
        "isApp": "0",
        "isSch": "1",
        "isDly": "0",
        "isFlt": "0",
        "flags": null,
        "lat": null,
        "lon": null,
        "heading": null
    })
}
