//! Integration tests for the HTTP transport.
//!
//! These tests run the real `reqwest` client against a wiremock server and
//! verify header handling, status mapping and retry behavior.

mod common;

use jira_api::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, Transport};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_for, client_with_tries, config_for};

// ============================================================================
// Request Building
// ============================================================================

#[tokio::test]
async fn test_default_headers_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/serverInfo"))
        .and(header("Authorization", "Basic YWRtaW46YWRtaW4="))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "9.12.1"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .get("/rest/api/2/serverInfo")
        .await
        .unwrap();

    assert!(response.is_ok());
    assert_eq!(response.json().unwrap(), Some(json!({"version": "9.12.1"})));
}

#[tokio::test]
async fn test_json_body_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"fields": {"summary": "New"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "10002"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .post("/rest/api/2/issue", &json!({"fields": {"summary": "New"}}))
        .await
        .unwrap();

    assert_eq!(response.code, 201);
}

#[tokio::test]
async fn test_query_map_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/project"))
        .and(query_param("expand", "lead"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpClient::new(&config_for(&server)).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "/rest/api/2/project")
        .query_param("expand", "lead")
        .build()
        .unwrap();

    let response = transport.request(request).await.unwrap();
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn test_response_headers_are_lowercased() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-AREQUESTID", "req-123"))
        .mount(&server)
        .await;

    let response = client_for(&server).get("/rest/api/2/myself").await.unwrap();

    assert_eq!(response.request_id(), Some("req-123"));
    assert!(response.is_blank());
}

// ============================================================================
// Status Mapping
// ============================================================================

#[tokio::test]
async fn test_non_2xx_becomes_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/NOPE-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorMessages": ["Issue Does Not Exist"],
            "errors": {}
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .get("/rest/api/2/issue/NOPE-1")
        .await
        .unwrap_err();

    match error {
        HttpError::Response(response) => {
            assert_eq!(response.code, 404);
            assert!(response.body.contains("Issue Does Not Exist"));
        }
        other => panic!("Expected HttpError::Response, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_with_tries(&server, 3).get("/rest/api/2/issue/1").await;
    assert_eq!(result.unwrap_err().status(), Some(400));
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_rate_limit_is_retried_after_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_with_tries(&server, 2)
        .get("/rest/api/2/serverInfo")
        .await
        .unwrap();

    assert_eq!(response.code, 200);
}

#[tokio::test]
async fn test_unrepresentable_retry_after_falls_back_to_fixed_wait() {
    for retry_after in ["inf", "1e300"] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", retry_after))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_with_tries(&server, 2)
            .get("/rest/api/2/serverInfo")
            .await
            .unwrap();

        assert_eq!(response.code, 200, "Retry-After: {retry_after}");
    }
}

#[tokio::test]
async fn test_retries_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let error = client_with_tries(&server, 3)
        .get("/rest/api/2/serverInfo")
        .await
        .unwrap_err();

    match error {
        HttpError::MaxRetries(exhausted) => {
            assert_eq!(exhausted.code, 429);
            assert_eq!(exhausted.tries, 3);
        }
        other => panic!("Expected HttpError::MaxRetries, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_single_try_returns_server_error_directly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .get("/rest/api/2/serverInfo")
        .await
        .unwrap_err();

    assert!(matches!(error, HttpError::Response(_)));
    assert_eq!(error.body(), Some("Service Unavailable"));
}
