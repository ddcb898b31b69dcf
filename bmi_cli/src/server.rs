//! HTTP liveness endpoint.
//!
//! `GET /api/health` always answers 200 with a JSON [`HealthReport`] and
//! `Cache-Control: no-cache`.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bmi_core::{Error, HealthMonitor, Result};
use std::sync::Arc;

pub fn router(monitor: HealthMonitor) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .with_state(Arc::new(monitor))
}

async fn health(State(monitor): State<Arc<HealthMonitor>>) -> Response {
    let report = monitor.report();
    tracing::debug!("Health check: uptime {:.1}s", report.uptime);
    ([(header::CACHE_CONTROL, "no-cache")], Json(report)).into_response()
}

/// Bind and serve until the process is stopped
pub async fn serve(bind: &str, monitor: HealthMonitor) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| Error::Server(format!("failed to bind {}: {}", bind, e)))?;
    let addr = listener.local_addr()?;

    tracing::info!("Health endpoint listening on http://{}/api/health", addr);
    println!("bmi health endpoint listening on http://{}/api/health", addr);

    axum::serve(listener, router(monitor))
        .await
        .map_err(|e| Error::Server(e.to_string()))
}
