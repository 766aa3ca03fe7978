use crate::server::HEALTH_ROUTE;

use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::{debug, info};
use uuid::Uuid;

/// Logs every request with a fresh request id and its elapsed time.
/// Health probes log at debug level.
pub async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let quiet = uri.path() == HEALTH_ROUTE;

    if quiet {
        debug!("Request {request_id} {method} {uri}");
    } else {
        info!("Request {request_id} {method} {uri}");
    }

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    if quiet {
        debug!("Response {request_id} {} in {elapsed:?}", response.status());
    } else {
        info!("Response {request_id} {} in {elapsed:?}", response.status());
    }

    response
}
