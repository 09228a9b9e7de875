//! HTTP routes
//!
//! The ingestion endpoint, the SSE subscription endpoint, and the small
//! operational surface (health, status).

use std::convert::Infallible;

use axum::extract::State;
use axum::http::header;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tower_http::cors::{Any, CorsLayer};

use super::error::ApiError;
use super::state::AppState;

/// Build the complete router
///
/// CORS is wide open: browser dashboards consume the stream cross-origin.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/events", get(subscribe))
        .route("/api/data", post(ingest))
        .route("/api/health", get(health))
        .route("/api/status", get(status))
        .layer(cors)
        .with_state(state)
}

/// Ingestion acknowledgement body
#[derive(Debug, Serialize)]
struct SavedResponse {
    saved: bool,
}

/// Status body
#[derive(Debug, Serialize)]
struct StatusResponse {
    subscribers: usize,
}

/// `GET /api/events` — open a server-push stream
///
/// Registers the connection in the subscriber registry and drains its
/// delivery channel into SSE frames. Headers go out immediately, before any
/// record is pushed. When the client disconnects, axum drops the stream,
/// which drops the guard, which deregisters the subscriber exactly once.
async fn subscribe(State(state): State<AppState>) -> impl IntoResponse {
    let (guard, rx) = state.registry.register();

    tracing::info!(subscriber_id = guard.id(), "Incoming SSE subscription");

    let stream = UnboundedReceiverStream::new(rx).map(move |frame| {
        // The guard must live as long as the stream; dropping it is what
        // deregisters the subscriber.
        let _alive = &guard;
        Ok::<Event, Infallible>(Event::default().data(frame.payload_str()))
    });

    let sse = Sse::new(stream).keep_alive(KeepAlive::new().interval(state.sse_keep_alive));

    (
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        sse,
    )
}

/// `POST /api/data` — ingest one reading
///
/// Broadcasts to live subscribers first, then persists. A persistence
/// failure produces a 500 but does not roll back the broadcast; streaming
/// delivery is best-effort and deliberately not coupled to durability.
async fn ingest(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SavedResponse>, ApiError> {
    let reading = body
        .as_object()
        .filter(|fields| !fields.is_empty())
        .ok_or_else(|| ApiError::BadRequest("expected a non-empty JSON object".into()))?;

    tracing::info!(fields = reading.len(), "Reading received");

    let record = state.dispatcher.dispatch(reading)?;

    state.csv_log.append(&record).await?;
    state.snapshot.save(reading).await?;

    Ok(Json(SavedResponse { saved: true }))
}

/// `GET /api/health` — liveness probe
async fn health() -> &'static str {
    "OK"
}

/// `GET /api/status` — current subscriber count
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        subscribers: state.registry.subscriber_count(),
    })
}
