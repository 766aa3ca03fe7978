//! Inbound HTTP surface.
//!
//! `POST /api/security-analysis` relays to the analysis backend through a
//! [`SecurityAnalysisForwarder`]; `GET /health` reports liveness.

pub mod middleware;
pub mod security_analysis;

use crate::analysis::SecurityAnalysisForwarder;
use crate::error::server::ServerError;

use common::ErrorLocation;

use std::net::SocketAddr;
use std::panic::Location;

use axum::Router;
use axum::response::Json;
use axum::routing::{get, post};
use log::{info, warn};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;

pub const HEALTH_ROUTE: &str = "/health";
pub const SECURITY_ANALYSIS_ROUTE: &str = "/api/security-analysis";

#[derive(Clone)]
pub struct AppState {
    pub forwarder: SecurityAnalysisForwarder,
}

pub fn build_router(forwarder: SecurityAnalysisForwarder) -> Router {
    Router::new()
        .route(HEALTH_ROUTE, get(health))
        .route(SECURITY_ANALYSIS_ROUTE, post(security_analysis::handle))
        .with_state(AppState { forwarder })
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// A running server. Dropping the handle leaves the server running.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and waits for in-flight requests.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        if self.shutdown_tx.send(()).is_err() {
            warn!("Server on {} already stopped", self.local_addr);
        }

        self.task.await.map_err(|e| ServerError::Io {
            message: format!("Server task failed: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Binds `addr` and serves the router in a background task.
pub async fn start_server(
    addr: &str,
    forwarder: SecurityAnalysisForwarder,
) -> Result<ServerHandle, ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
    let local_addr = listener.local_addr()?;
    let router = build_router(forwarder);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let served = axum::serve(listener, router)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
                info!("Interview server shutting down gracefully");
            })
            .await;

        if let Err(e) = served {
            warn!("Interview server error: {e}");
        }
    });

    info!("Interview server listening on {local_addr}");
    info!("Health check: http://{local_addr}{HEALTH_ROUTE}");

    Ok(ServerHandle {
        local_addr,
        shutdown_tx,
        task,
    })
}
