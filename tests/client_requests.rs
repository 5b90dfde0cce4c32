//! Request primitive tests.
//!
//! Uses wiremock to check what goes on the wire and how failures surface.

use cfapi::{CfClient, CfError, OrderDirection, QueryOptions};
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_invoke_sends_token_and_accept_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(header("authorization", "bearer test-token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let body = client
        .invoke("/v2/organizations", &QueryOptions::default())
        .await
        .unwrap();

    assert_eq!(body, json!({"resources": []}));
}

#[tokio::test]
async fn test_invoke_uses_token_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let options = QueryOptions::new().with_token_type("Bearer");
    client.invoke("/v2/apps", &options).await.unwrap();
}

#[tokio::test]
async fn test_invoke_appends_query_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .and(query_param("q", "name:web"))
        .and(query_param("q", "space_guid:s1"))
        .and(query_param("page", "2"))
        .and(query_param("results-per-page", "10"))
        .and(query_param("order-direction", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let options = QueryOptions::new()
        .with_q("name:web")
        .with_q("space_guid:s1")
        .with_page(2)
        .with_results_per_page(10)
        .with_order_direction(OrderDirection::Desc);
    client.invoke("/v2/apps", &options).await.unwrap();
}

#[tokio::test]
async fn test_invoke_posts_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/service_bindings"))
        .and(body_json(json!({"app_guid": "a1", "service_instance_guid": "i1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"metadata": {"guid": "b1"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let options = QueryOptions::post(json!({"app_guid": "a1", "service_instance_guid": "i1"}));
    assert_eq!(options.method(), Method::POST);

    let body = client.invoke("/v2/service_bindings", &options).await.unwrap();
    assert_eq!(body["metadata"]["guid"], "b1");
}

#[tokio::test]
async fn test_invoke_empty_success_body_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/service_bindings/b1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let options = QueryOptions::new().with_method(Method::DELETE);
    let body = client.invoke("/v2/service_bindings/b1", &options).await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_api_base_url_override() {
    let default_server = MockServer::start().await;
    let override_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"from": "override"})))
        .expect(1)
        .mount(&override_server)
        .await;

    let client = CfClient::new("test-token", &default_server.uri()).unwrap();
    let options = QueryOptions::new().with_api_base_url(override_server.uri());
    let body = client.invoke("/v2/info", &options).await.unwrap();
    assert_eq!(body["from"], "override");
}

#[tokio::test]
async fn test_not_found_uses_description() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 100004,
            "description": "not found",
            "error_code": "CF-AppNotFound"
        })))
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client
        .invoke("/v2/apps/missing", &QueryOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "not found");
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.detail("error_code"), Some(&json!("CF-AppNotFound")));
    assert_eq!(err.detail("code"), Some(&json!(100004)));
}

#[tokio::test]
async fn test_server_error_without_body_is_synthesized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client
        .invoke("/v2/organizations", &QueryOptions::default())
        .await
        .unwrap_err();

    match err {
        CfError::ApiError {
            message,
            status_code,
            details,
        } => {
            assert_eq!(message, "Cloud Foundry api error: 500");
            assert_eq!(status_code, 500);
            assert!(details.is_empty());
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_is_http_error() {
    // Nothing listens on the discard port.
    let client = CfClient::new("test-token", "http://127.0.0.1:9").unwrap();
    let err = client
        .invoke("/v2/organizations", &QueryOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CfError::HttpError(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client
        .invoke("/v2/apps", &QueryOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CfError::ParseError(_)));
}
