use interview_core::analysis::{AnalysisClient, SecurityAnalysisForwarder};
use interview_core::server::{HEALTH_ROUTE, SECURITY_ANALYSIS_ROUTE, build_router, start_server};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// HTTP surface tests
// ============================================================================

const BODY_LIMIT: usize = 1024 * 1024;

fn forwarder(base_url: &str) -> SecurityAnalysisForwarder {
    SecurityAnalysisForwarder::new(AnalysisClient::new(base_url).unwrap())
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(SECURITY_ANALYSIS_ROUTE)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_router_when_health_requested_then_ok_status() {
    let app = build_router(forwarder("http://127.0.0.1:9"));

    let response = app
        .oneshot(
            Request::builder()
                .uri(HEALTH_ROUTE)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

/// **VALUE**: Verifies the route maps forwarder validation failures to HTTP 400 with `{error}`.
///
/// **BUG THIS CATCHES**: Would catch the handler always answering 200 and hiding the
/// error inside the body.
#[tokio::test]
async fn given_report_without_repo_id_when_posted_then_400_with_error() {
    // GIVEN: The router
    let app = build_router(forwarder("http://127.0.0.1:9"));

    // WHEN: Posting a report action without a repo id
    let response = app
        .oneshot(post_json(json!({
            "repo_url": "https://github.com/acme/widget",
            "action": "report"
        })))
        .await
        .unwrap();

    // THEN: 400 and only an error field
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Repository ID is required for report" }));
}

/// **VALUE**: Verifies a successful upstream call answers 200 with `{success, message, data}`.
#[tokio::test]
async fn given_upstream_success_when_posted_then_200_with_data() {
    // GIVEN: A backend accepting uploads
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_repo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;
    let app = build_router(forwarder(&server.uri()));

    // WHEN: Posting an upload
    let response = app
        .oneshot(post_json(json!({ "repo_url": "https://github.com/acme/widget" })))
        .await
        .unwrap();

    // THEN: Success shape
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Repository uploaded successfully");
    assert_eq!(body["data"], json!({ "ok": true }));
}

#[tokio::test]
async fn given_upstream_status_when_posted_then_status_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/simulate_attack"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "detail": "bad id" })))
        .mount(&server)
        .await;
    let app = build_router(forwarder(&server.uri()));

    let response = app
        .oneshot(post_json(json!({
            "repo_url": "https://github.com/acme/widget",
            "action": "simulate",
            "repo_id": "x"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await, json!({ "error": "bad id" }));
}

#[tokio::test]
async fn given_get_on_analysis_route_when_requested_then_method_not_allowed() {
    let app = build_router(forwarder("http://127.0.0.1:9"));

    let response = app
        .oneshot(
            Request::builder()
                .uri(SECURITY_ANALYSIS_ROUTE)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

/// **VALUE**: Verifies the server binds, answers real HTTP and shuts down cleanly.
///
/// **WHY THIS MATTERS**: The router tests bypass the listener; this one covers bind,
/// serve and graceful shutdown together.
#[tokio::test]
async fn given_started_server_when_requested_over_tcp_then_answers_and_shuts_down() {
    // GIVEN: A server on an ephemeral port
    let handle = start_server("127.0.0.1:0", forwarder("http://127.0.0.1:9"))
        .await
        .unwrap();
    let base = format!("http://{}", handle.local_addr());

    // WHEN: Calling health over the wire
    let response = reqwest::get(format!("{base}{HEALTH_ROUTE}")).await.unwrap();

    // THEN: Healthy, and shutdown completes
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    handle.shutdown().await.unwrap();
    assert!(reqwest::get(format!("{base}{HEALTH_ROUTE}")).await.is_err());
}

#[tokio::test]
async fn given_bad_address_when_starting_then_bind_error() {
    let result = start_server("not-an-address", forwarder("http://127.0.0.1:9")).await;
    assert!(result.is_err());
}
