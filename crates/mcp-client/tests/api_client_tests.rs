//! Integration tests for `ApiClient` against a mock DataMaker API.

use datamaker_mcp_client::{ApiClient, Method, NewScenario};
use datamaker_mcp_core::{Config, Error, RequestScope, ScenarioId, TemplateId};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer, api_key: Option<&str>) -> ApiClient {
    let config = Config {
        api_url: server.uri(),
        api_key: api_key.map(|k| SecretString::from(k.to_string())),
        ..Config::default()
    };
    ApiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_get_templates_uses_configured_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates"))
        .and(header("authorization", "Bearer configured-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "t1" }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("configured-key"));
    let templates = client.templates(&RequestScope::default()).await.unwrap();
    assert_eq!(templates, json!([{ "id": "t1" }]));
}

#[tokio::test]
async fn test_scope_credential_takes_precedence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/connections"))
        .and(header("authorization", "Bearer caller-token"))
        .and(header("x-project-id", "proj-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("configured-key"));
    let scope = RequestScope::from_headers(Some("Bearer caller-token"), Some("proj-42"));
    assert_eq!(client.connections(&scope).await.unwrap(), json!([]));
}

#[tokio::test]
async fn test_no_credential_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/endpoints"))
        .respond_with(|request: &Request| {
            let has_auth = request.headers.contains_key("authorization");
            ResponseTemplate::new(200).set_body_json(json!({ "auth": has_auth }))
        })
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let body = client.endpoints(&RequestScope::default()).await.unwrap();
    assert_eq!(body, json!({ "auth": false }));
}

#[tokio::test]
async fn test_non_success_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Template not found"}"#))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("k"));
    let id = TemplateId::parse("missing").unwrap();
    let err = client.template(&id, &RequestScope::default()).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    let message = err.to_string();
    assert!(message.contains("404"));
    assert!(message.contains("Template not found"));
}

#[tokio::test]
async fn test_text_and_empty_bodies_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/connections/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Deleted"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/connections/c1"))
        .and(body_json(json!({ "host": "db.local" })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("k"));
    let scope = RequestScope::default();
    let id = datamaker_mcp_core::ConnectionId::parse("c1").unwrap();

    let deleted = client.delete_connection(&id, &scope).await.unwrap();
    assert_eq!(deleted, json!("Deleted"));

    let updated = client
        .update_connection(&id, &json!({ "host": "db.local" }), &scope)
        .await
        .unwrap();
    assert!(updated.is_null());
}

#[tokio::test]
async fn test_generate_returns_live_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/datamaker"))
        .and(body_json(json!({ "fields": [{ "name": "n", "type": "Name" }], "quantity": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "live_data": [{ "n": "Ada" }, { "n": "Alan" }],
            "took": 12
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("k"));
    let fields = json!([{ "name": "n", "type": "Name" }]);
    let data = client
        .generate(&fields, 2, &RequestScope::default())
        .await
        .unwrap();
    assert_eq!(data, json!([{ "n": "Ada" }, { "n": "Alan" }]));
}

#[tokio::test]
async fn test_scenario_routes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scenarios"))
        .and(body_json(json!({ "name": "s", "code": "print(1)", "projectId": "p1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "s1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/scenarios/s1/execute"))
        .and(body_json(json!({ "projectId": "p1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "1\n" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("k"));
    let scope = RequestScope::default();

    let saved = client
        .save_scenario(
            &NewScenario {
                name: "s".to_string(),
                code: "print(1)".to_string(),
                description: None,
                project_id: Some("p1".to_string()),
            },
            &scope,
        )
        .await
        .unwrap();
    assert_eq!(saved["id"], "s1");

    let id = ScenarioId::parse("s1").unwrap();
    let run = client.execute_scenario(&id, Some("p1"), &scope).await.unwrap();
    assert_eq!(run["output"], "1\n");
}

#[tokio::test]
async fn test_raw_request_strips_leading_slash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("k"));
    client
        .request("/templates", Method::GET, None, &RequestScope::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_transport_failure() {
    let config = Config {
        api_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    let client = ApiClient::new(&config).unwrap();
    let err = client.templates(&RequestScope::default()).await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
}

#[tokio::test]
async fn test_ping_treats_any_status_as_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client_for(&server, None).ping().await);

    let unreachable = ApiClient::new(&Config {
        api_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    })
    .unwrap();
    assert!(!unreachable.ping().await);
}

#[tokio::test]
async fn test_unreadable_error_body_still_reports_status() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Promises more body bytes than it sends, then closes the connection.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\n\r\npartial")
            .await
            .unwrap();
    });

    let config = Config {
        api_url: format!("http://{addr}"),
        ..Config::default()
    };
    let client = ApiClient::new(&config).unwrap();
    let err = client
        .templates(&RequestScope::default())
        .await
        .unwrap_err();

    match err {
        Error::Upstream { status, body } => {
            assert_eq!(status, 502);
            assert!(body.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
