use crate::server::AppState;

use models::SecurityAnalysisReply;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

/// Relays the raw body to the forwarder and answers with its status.
pub async fn handle(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<SecurityAnalysisReply>) {
    let reply = state.forwarder.forward(&body).await;
    let status =
        StatusCode::from_u16(reply.status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(reply.body))
}
