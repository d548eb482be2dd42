/// Liveness HTTP endpoints for the hosting platform.
///
/// In polling mode the router gets its own server via [`start`]; in webhook
/// mode the bot merges this router with teloxide's webhook route and serves
/// both from one listener.
use std::future::Future;
use std::time::Instant;

use anyhow::Result;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{error, info};

#[derive(Clone)]
pub struct GatewayState {
    environment: &'static str,
    started: Instant,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: &'static str,
    uptime_seconds: u64,
}

/// Response body for GET /ping.
#[derive(Debug, Serialize)]
struct PingResponse {
    status: &'static str,
}

/// Response body for GET /ready.
#[derive(Debug, Serialize)]
struct ReadyResponse {
    ready: bool,
}

impl GatewayState {
    pub fn new(environment: &'static str) -> Self {
        Self {
            environment,
            started: Instant::now(),
        }
    }
}

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ping", get(ping_handler))
        .route("/ready", get(ready_handler))
        .with_state(state)
}

/// GET /health — process liveness plus build/environment details.
async fn health_handler(State(state): State<GatewayState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
        environment: state.environment,
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}

/// GET /ping — minimal liveness probe.
async fn ping_handler() -> impl IntoResponse {
    Json(PingResponse { status: "ok" })
}

/// GET /ready — readiness probe. The process serves traffic as soon as it
/// binds, so readiness equals liveness here.
async fn ready_handler() -> impl IntoResponse {
    Json(ReadyResponse { ready: true })
}

/// Bind and serve the liveness router in a background task.
pub async fn start(host: &str, port: u16, state: GatewayState) -> Result<tokio::task::JoinHandle<()>> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    let app = router(state);
    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    }))
}

/// Bind and serve an arbitrary router (health routes merged with the bot's
/// webhook route), shutting down when `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    host: &str,
    port: u16,
    app: Router,
    shutdown: F,
) -> Result<tokio::task::JoinHandle<()>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            error!("HTTP server error: {}", e);
        }
    }))
}

#[cfg(test)]
mod tests;
