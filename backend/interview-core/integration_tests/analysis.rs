use interview_core::analysis::forwarder::{
    INVALID_ACTION, REPO_ID_REQUIRED_FOR_REPORT, REPO_ID_REQUIRED_FOR_SIMULATION,
    REPO_URL_REQUIRED,
};
use interview_core::analysis::{AnalysisClient, SecurityAnalysisForwarder};

use common::HttpStatusCode;
use models::{AnalysisReport, SecurityAnalysisReply, Severity};

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Public API tests for the security-analysis forwarder
// ============================================================================

fn forwarder_for(server: &MockServer) -> SecurityAnalysisForwarder {
    SecurityAnalysisForwarder::new(AnalysisClient::new(&server.uri()).unwrap())
}

fn body(value: Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

fn error_text(reply: &SecurityAnalysisReply) -> &str {
    match reply {
        SecurityAnalysisReply::Failure { error } => error,
        other => panic!("Expected failure reply, got {other:?}"),
    }
}

fn success_parts(reply: &SecurityAnalysisReply) -> (&str, &Value) {
    match reply {
        SecurityAnalysisReply::Success {
            success,
            message,
            data,
        } => {
            assert!(*success);
            (message, data)
        }
        other => panic!("Expected success reply, got {other:?}"),
    }
}

/// **VALUE**: Verifies an upload forwards the URL with its derived id and relays the payload.
///
/// **WHY THIS MATTERS**: Upload is the default action. The backend stores the repo under
/// the id we derive, and later simulate/report calls must use the same id.
///
/// **BUG THIS CATCHES**: Would catch the id not being derived, the wrong endpoint, or
/// the upstream payload being dropped instead of placed under `data`.
#[tokio::test]
async fn given_upload_without_action_when_forwarded_then_upload_repo_called() {
    // GIVEN: A backend expecting the derived repo id
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_repo"))
        .and(body_json(json!({
            "repo_url": "https://github.com/acme/widget",
            "repo_id": "acme-widget"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": 12 })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Forwarding a request with no action
    let reply = forwarder_for(&server)
        .forward(&body(json!({ "repo_url": "https://github.com/acme/widget" })))
        .await;

    // THEN: 200 with the upstream payload under data
    assert_eq!(reply.status, HttpStatusCode::OK);
    let (message, data) = success_parts(&reply.body);
    assert_eq!(message, "Repository uploaded successfully");
    assert_eq!(data, &json!({ "files": 12 }));
}

#[tokio::test]
async fn given_simulate_with_repo_id_when_forwarded_then_simulate_attack_called() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/simulate_attack"))
        .and(body_json(json!({ "repo_id": "acme-widget" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "run_id": "r1" })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/acme/widget",
            "action": "simulate",
            "repo_id": "acme-widget"
        })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::OK);
    let (message, data) = success_parts(&reply.body);
    assert_eq!(message, "Security analysis completed");
    assert_eq!(data["run_id"], "r1");
}

/// **VALUE**: Verifies the report payload is relayed and can be read as a typed report.
#[tokio::test]
async fn given_report_with_repo_id_when_forwarded_then_latest_report_relayed() {
    // GIVEN: A backend holding a report
    let server = MockServer::start().await;
    let report = json!({
        "repo_id": "acme-widget",
        "summary": { "overall_severity": "HIGH", "affected_files": ["app.py"] },
        "plan": { "steps": [
            { "step_number": 1, "technique": "SQLi", "description": "d", "severity": "medium" },
            { "step_number": 2, "technique": "RCE", "description": "d", "severity": "critical" }
        ]}
    });
    Mock::given(method("GET"))
        .and(path("/reports/acme-widget/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report.clone()))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Asking for the report
    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/acme/widget",
            "action": "report",
            "repo_id": "acme-widget"
        })))
        .await;

    // THEN: Relayed untouched and readable
    assert_eq!(reply.status, HttpStatusCode::OK);
    let (message, data) = success_parts(&reply.body);
    assert_eq!(message, "Report retrieved successfully");
    assert_eq!(data, &report);

    let typed = AnalysisReport::from_value(data);
    assert_eq!(typed.overall_severity(), Severity::High);
    assert_eq!(typed.worst_step().map(|s| s.technique.as_str()), Some("RCE"));
}

/// **VALUE**: Verifies a report request without a repo id is rejected locally with 400.
///
/// **BUG THIS CATCHES**: Would catch a request to `/reports//latest` reaching the backend.
#[tokio::test]
async fn given_report_without_repo_id_when_forwarded_then_bad_request() {
    // GIVEN: A backend that must not be called
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Forwarding report with no repo id
    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/acme/widget",
            "action": "report"
        })))
        .await;

    // THEN: 400 with the message
    assert_eq!(reply.status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(error_text(&reply.body), REPO_ID_REQUIRED_FOR_REPORT);
}

#[tokio::test]
async fn given_simulate_without_repo_id_when_forwarded_then_bad_request() {
    let server = MockServer::start().await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/acme/widget",
            "action": "simulate",
            "repo_id": ""
        })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(error_text(&reply.body), REPO_ID_REQUIRED_FOR_SIMULATION);
}

#[tokio::test]
async fn given_missing_repo_url_when_forwarded_then_bad_request() {
    let server = MockServer::start().await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({ "action": "report", "repo_id": "x" })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(error_text(&reply.body), REPO_URL_REQUIRED);
}

#[tokio::test]
async fn given_unknown_action_when_forwarded_then_bad_request() {
    let server = MockServer::start().await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/acme/widget",
            "action": "delete"
        })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(error_text(&reply.body), INVALID_ACTION);
}

/// **VALUE**: Verifies the upstream status and `detail` are passed through.
///
/// **WHY THIS MATTERS**: A 404 "Report not found" is actionable for the user; collapsing
/// it into a generic 500 is not.
#[tokio::test]
async fn given_upstream_error_with_detail_when_forwarded_then_status_and_detail_relayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/acme-widget/latest"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Report not found" })),
        )
        .mount(&server)
        .await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/acme/widget",
            "action": "report",
            "repo_id": "acme-widget"
        })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::from(404));
    assert_eq!(error_text(&reply.body), "Report not found");
}

#[tokio::test]
async fn given_upstream_error_without_body_when_forwarded_then_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_repo"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({ "repo_url": "https://github.com/acme/widget" })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::from(502));
    assert_eq!(error_text(&reply.body), "Failed to upload repository");
}

/// **VALUE**: Verifies malformed bodies are answered with 500 and a message, never a panic.
#[tokio::test]
async fn given_malformed_body_when_forwarded_then_internal_error() {
    let server = MockServer::start().await;

    let reply = forwarder_for(&server).forward(b"{ not json").await;

    assert_eq!(reply.status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert!(!error_text(&reply.body).is_empty());
}

#[tokio::test]
async fn given_unreachable_backend_when_forwarded_then_internal_error() {
    let forwarder =
        SecurityAnalysisForwarder::new(AnalysisClient::new("http://127.0.0.1:9").unwrap());

    let reply = forwarder
        .forward(&body(json!({ "repo_url": "https://github.com/acme/widget" })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::INTERNAL_SERVER_ERROR);
}

/// **VALUE**: Verifies a numeric repo id reaches the report endpoint as a path segment.
///
/// **WHY THIS MATTERS**: Clients hold ids as numbers as often as strings; the route
/// relays the body rather than enforcing a type the backend never asked for.
///
/// **BUG THIS CATCHES**: Would catch a typed string field turning `42` into a 500
/// decode error.
#[tokio::test]
async fn given_report_with_numeric_repo_id_when_forwarded_then_report_fetched() {
    // GIVEN: A backend holding a report under id 42
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/42/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "repo_id": "42" })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Asking for the report with a numeric id
    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/a/b",
            "action": "report",
            "repo_id": 42
        })))
        .await;

    // THEN: 200 with the report
    assert_eq!(reply.status, HttpStatusCode::OK);
    let (message, data) = success_parts(&reply.body);
    assert_eq!(message, "Report retrieved successfully");
    assert_eq!(data["repo_id"], "42");
}

/// **VALUE**: Verifies the simulate payload carries the repo id exactly as given.
#[tokio::test]
async fn given_simulate_with_numeric_repo_id_when_forwarded_then_id_sent_unchanged() {
    // GIVEN: A backend expecting a numeric id
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/simulate_attack"))
        .and(body_json(json!({ "repo_id": 42 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "run_id": "r2" })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Simulating with a numeric id
    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/a/b",
            "action": "simulate",
            "repo_id": 42
        })))
        .await;

    // THEN: Forwarded and relayed
    assert_eq!(reply.status, HttpStatusCode::OK);
    assert_eq!(success_parts(&reply.body).1["run_id"], "r2");
}

#[tokio::test]
async fn given_report_with_zero_repo_id_when_forwarded_then_bad_request() {
    let server = MockServer::start().await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/a/b",
            "action": "report",
            "repo_id": 0
        })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(error_text(&reply.body), REPO_ID_REQUIRED_FOR_REPORT);
}

/// **VALUE**: Verifies a truthy non-string action is a 400, not a decode failure.
///
/// **BUG THIS CATCHES**: Would catch `"action": 7` surfacing a serde message with 500.
#[tokio::test]
async fn given_numeric_action_when_forwarded_then_invalid_action() {
    // GIVEN: A backend that must not be called
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Forwarding numeric and boolean actions
    for action in [json!(7), json!(true)] {
        let reply = forwarder_for(&server)
            .forward(&body(json!({
                "repo_url": "https://github.com/a/b",
                "action": action
            })))
            .await;

        // THEN: 400 Invalid action specified
        assert_eq!(reply.status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(error_text(&reply.body), INVALID_ACTION);
    }
}

/// **VALUE**: Verifies a falsy action means upload.
#[tokio::test]
async fn given_false_action_when_forwarded_then_upload_repo_called() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_repo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/acme/widget",
            "action": false
        })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::OK);
    assert_eq!(success_parts(&reply.body).0, "Repository uploaded successfully");
}

/// **VALUE**: Verifies a JSON error body without `detail` relays the generic message.
///
/// **WHY THIS MATTERS**: Internal error fields from the backend are not meant for the
/// candidate; without a `detail` they get our own message.
///
/// **BUG THIS CATCHES**: Would catch raw JSON like `{"message":"bad repo"}` being shown
/// as the error text.
#[tokio::test]
async fn given_upstream_json_error_without_detail_when_forwarded_then_generic_message() {
    // GIVEN: An upload rejected with a JSON body lacking detail
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_repo"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "bad repo" })),
        )
        .mount(&server)
        .await;

    // WHEN: Uploading
    let reply = forwarder_for(&server)
        .forward(&body(json!({ "repo_url": "https://github.com/acme/widget" })))
        .await;

    // THEN: Upstream status with the generic message
    assert_eq!(reply.status, HttpStatusCode::from(422));
    assert_eq!(error_text(&reply.body), "Failed to upload repository");
}

#[tokio::test]
async fn given_upstream_plain_text_error_when_forwarded_then_text_relayed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/simulate_attack"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({
            "repo_url": "https://github.com/a/b",
            "action": "simulate",
            "repo_id": "a-b"
        })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::from(503));
    assert_eq!(error_text(&reply.body), "Service Unavailable");
}

/// **VALUE**: Verifies an upload with a non-string URL is an internal error, not a panic.
#[tokio::test]
async fn given_upload_with_numeric_repo_url_when_forwarded_then_internal_error() {
    let server = MockServer::start().await;

    let reply = forwarder_for(&server)
        .forward(&body(json!({ "repo_url": 123 })))
        .await;

    assert_eq!(reply.status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_text(&reply.body).contains("repo_url"));
}
