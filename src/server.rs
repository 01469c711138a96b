//! # HTTP Server
//!
//! HTTP server for status, health checks, and metrics.
//!
//! Provides endpoints:
//! - `/` - Monitor status (tracked user, whether presence is known, uptime)
//! - `/healthz` - Liveness probe (always returns 200)
//! - `/readyz` - Readiness probe (returns 200 while serving, 503 during shutdown)
//! - `/metrics` - Prometheus metrics in text format
//!
//! The server runs on port 3000 by default (configurable via `PORT` environment variable).

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// State shared between the poll loop (writer) and the HTTP handlers (readers)
#[derive(Debug)]
pub struct ServerState {
    pub is_ready: AtomicBool,
    /// Whether the last cycle ended with a known presence snapshot
    pub presence_known: AtomicBool,
    pub user_id: u64,
    pub started_at: Instant,
}

impl ServerState {
    #[must_use]
    pub fn new(user_id: u64) -> Self {
        Self {
            is_ready: AtomicBool::new(false),
            presence_known: AtomicBool::new(false),
            user_id,
            started_at: Instant::now(),
        }
    }

    pub fn set_presence_known(&self, known: bool) {
        self.presence_known.store(known, Ordering::Relaxed);
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    status: &'static str,
    user_id: u64,
    last_check: &'static str,
    uptime: f64,
}

/// Build the router served by [`start_server`]
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process exits
///
/// # Errors
/// Fails if the port cannot be bound or the server stops with an I/O error.
pub async fn start_server(port: u16, state: Arc<ServerState>) -> Result<(), anyhow::Error> {
    let app = router(Arc::clone(&state));

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on port {}", port);
    state.is_ready.store(true, Ordering::Relaxed);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn status_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let last_check = if state.presence_known.load(Ordering::Relaxed) {
        "Active"
    } else {
        "Initializing"
    };

    Json(StatusResponse {
        status: "running",
        user_id: state.user_id,
        last_check,
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

fn gather() -> Vec<prometheus::proto::MetricFamily> {
    use crate::observability::metrics::REGISTRY;
    REGISTRY.gather()
}

async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        );
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        buffer,
    )
}

async fn healthz_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn readyz_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    if state.is_ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
