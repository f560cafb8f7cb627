//! Integration tests for `EndpointDispatcher`, including the SAP CSRF handshake.

use datamaker_mcp_client::{EndpointDefinition, EndpointDispatcher};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer, extra: Value) -> EndpointDefinition {
    let mut record = json!({ "id": "e1", "url": format!("{}/sink", server.uri()) });
    if let (Some(target), Some(extra)) = (record.as_object_mut(), extra.as_object()) {
        target.extend(extra.clone());
    }
    EndpointDefinition::from_value(record).unwrap()
}

fn dispatcher() -> EndpointDispatcher {
    EndpointDispatcher::new(reqwest::Client::new())
}

#[tokio::test]
async fn test_send_posts_json_with_endpoint_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sink"))
        .and(header("x-api-key", "k1"))
        .and(body_json(json!([{ "id": 1 }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accepted": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let target = endpoint(&server, json!({ "headers": { "x-api-key": "k1" } }));
    let result = dispatcher().send(&target, &json!([{ "id": 1 }])).await.unwrap();
    assert_eq!(result, json!({ "accepted": 1 }));
}

#[tokio::test]
async fn test_send_honors_configured_method() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/sink"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let target = endpoint(&server, json!({ "method": "PUT" }));
    let result = dispatcher().send(&target, &json!({})).await.unwrap();
    assert_eq!(result, json!("ok"));
}

#[tokio::test]
async fn test_fetch_defaults_to_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sink"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [1, 2] })))
        .expect(1)
        .mount(&server)
        .await;

    let target = endpoint(&server, json!({}));
    let result = dispatcher().fetch(&target).await.unwrap();
    assert_eq!(result, json!({ "rows": [1, 2] }));
}

#[tokio::test]
async fn test_sap_export_sends_token_and_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sink"))
        .and(header("x-csrf-token", "Fetch"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-csrf-token", "tok-123")
                .append_header("set-cookie", "SAP_SESSIONID=abc; path=/; HttpOnly")
                .append_header("set-cookie", "sap-usercontext=sap-client=100; path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sink"))
        .and(header("x-csrf-token", "tok-123"))
        .and(header(
            "cookie",
            "SAP_SESSIONID=abc; sap-usercontext=sap-client=100",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "d": { "ok": true } })))
        .expect(1)
        .mount(&server)
        .await;

    let target = endpoint(&server, json!({ "type": "SAP" }));
    let result = dispatcher().send(&target, &json!({ "Material": "M-01" })).await.unwrap();
    assert_eq!(result, json!({ "d": { "ok": true } }));
}

#[tokio::test]
async fn test_sap_export_without_token_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sink"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sink"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let target = endpoint(&server, json!({ "type": "sap" }));
    let err = dispatcher().send(&target, &json!({})).await.unwrap_err();
    assert!(err.is_csrf_error());
}

#[tokio::test]
async fn test_endpoint_error_status_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sink"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid payload"))
        .mount(&server)
        .await;

    let target = endpoint(&server, json!({}));
    let err = dispatcher().send(&target, &json!([])).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert!(err.to_string().contains("invalid payload"));
}
