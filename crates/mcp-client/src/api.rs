//! Client for the DataMaker REST API.
//!
//! Every call is a single HTTP exchange: no retries, no caching. The
//! credential is resolved per call from the caller's [`RequestScope`],
//! falling back to the configured API key.

use datamaker_mcp_core::{
    AUTHORIZATION_HEADER, Config, ConnectionId, EndpointId, Error, RequestScope, Result,
    ScenarioId, TENANT_HEADER, TemplateId,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("datamaker-mcp/", env!("CARGO_PKG_VERSION"));

/// Body of a `POST scenarios` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScenario {
    /// Scenario name
    pub name: String,
    /// Python source executed by the scenario runner
    pub code: String,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// DataMaker API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl ApiClient {
    /// Builds a client from the adapter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ConfigError {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self::with_client(
            http,
            config.api_url.clone(),
            config.api_key.clone(),
        ))
    }

    /// Wraps an existing HTTP client.
    #[must_use]
    pub fn with_client(http: Client, base_url: impl Into<String>, api_key: Option<SecretString>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Underlying HTTP client, shared with the endpoint dispatcher.
    #[must_use]
    pub const fn http(&self) -> &Client {
        &self.http
    }

    /// API base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request to `<base>/<path>` and decodes the response.
    ///
    /// # Errors
    ///
    /// - [`Error::Upstream`] for a non-2xx status (status and body together)
    /// - [`Error::Transport`] when no response was received
    /// - [`Error::UnreadableBody`] when the body is neither JSON nor UTF-8
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
        scope: &RequestScope,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%method, %url, tenant = ?scope.tenant(), "DataMaker API request");

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(credential) = scope.credential_or(self.api_key.as_ref()) {
            request = request.header(AUTHORIZATION_HEADER, format!("Bearer {credential}"));
        } else {
            warn!(%url, "No credential available for DataMaker API request");
        }
        if let Some(tenant) = scope.tenant() {
            request = request.header(TENANT_HEADER, tenant);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| transport(&url, e))?;
        decode_response(&url, response).await
    }

    /// Checks whether the API answers at all.
    ///
    /// Any HTTP response, whatever its status, counts as reachable.
    pub async fn ping(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => {
                debug!(status = %response.status(), "DataMaker API reachable");
                true
            }
            Err(e) => {
                warn!(error = %e, "DataMaker API unreachable");
                false
            }
        }
    }

    /// `GET templates`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn templates(&self, scope: &RequestScope) -> Result<Value> {
        self.request("templates", Method::GET, None, scope).await
    }

    /// `GET templates/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn template(&self, id: &TemplateId, scope: &RequestScope) -> Result<Value> {
        self.request(&format!("templates/{id}"), Method::GET, None, scope)
            .await
    }

    /// `POST datamaker` with `{fields, quantity}`, returning `live_data`.
    ///
    /// When the response has no `live_data` member the whole body is
    /// returned.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn generate(&self, fields: &Value, quantity: u32, scope: &RequestScope) -> Result<Value> {
        let body = json!({ "fields": fields, "quantity": quantity });
        let mut response = self
            .request("datamaker", Method::POST, Some(&body), scope)
            .await?;

        if let Some(live) = response.get_mut("live_data") {
            return Ok(live.take());
        }
        Ok(response)
    }

    /// `GET connections`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn connections(&self, scope: &RequestScope) -> Result<Value> {
        self.request("connections", Method::GET, None, scope).await
    }

    /// `GET connections/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn connection(&self, id: &ConnectionId, scope: &RequestScope) -> Result<Value> {
        self.request(&format!("connections/{id}"), Method::GET, None, scope)
            .await
    }

    /// `POST connections`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn create_connection(&self, connection: &Value, scope: &RequestScope) -> Result<Value> {
        self.request("connections", Method::POST, Some(connection), scope)
            .await
    }

    /// `PUT connections/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn update_connection(
        &self,
        id: &ConnectionId,
        connection: &Value,
        scope: &RequestScope,
    ) -> Result<Value> {
        self.request(&format!("connections/{id}"), Method::PUT, Some(connection), scope)
            .await
    }

    /// `DELETE connections/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete_connection(&self, id: &ConnectionId, scope: &RequestScope) -> Result<Value> {
        self.request(&format!("connections/{id}"), Method::DELETE, None, scope)
            .await
    }

    /// `GET endpoints`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn endpoints(&self, scope: &RequestScope) -> Result<Value> {
        self.request("endpoints", Method::GET, None, scope).await
    }

    /// `GET endpoints/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn endpoint(&self, id: &EndpointId, scope: &RequestScope) -> Result<Value> {
        self.request(&format!("endpoints/{id}"), Method::GET, None, scope)
            .await
    }

    /// `GET scenarios`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn scenarios(&self, scope: &RequestScope) -> Result<Value> {
        self.request("scenarios", Method::GET, None, scope).await
    }

    /// `GET scenarios/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn scenario(&self, id: &ScenarioId, scope: &RequestScope) -> Result<Value> {
        self.request(&format!("scenarios/{id}"), Method::GET, None, scope)
            .await
    }

    /// `POST scenarios`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`]; [`Error::Serialization`] if the body
    /// cannot be encoded.
    pub async fn save_scenario(&self, scenario: &NewScenario, scope: &RequestScope) -> Result<Value> {
        let body = serde_json::to_value(scenario)
            .map_err(|e| Error::serialization("failed to encode scenario", e))?;
        self.request("scenarios", Method::POST, Some(&body), scope)
            .await
    }

    /// `POST scenarios/{id}/execute`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn execute_scenario(
        &self,
        id: &ScenarioId,
        project_id: Option<&str>,
        scope: &RequestScope,
    ) -> Result<Value> {
        let body = project_id.map_or_else(|| json!({}), |project| json!({ "projectId": project }));
        self.request(&format!("scenarios/{id}/execute"), Method::POST, Some(&body), scope)
            .await
    }
}

/// Maps a send failure to [`Error::Transport`].
pub(crate) fn transport(url: &str, source: reqwest::Error) -> Error {
    Error::Transport {
        url: url.to_string(),
        source: Box::new(source),
    }
}

/// Checks the status and decodes the body of a response.
pub(crate) async fn decode_response(url: &str, response: Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%url, %status, error = %e, "Failed to read error response body");
                String::new()
            }
        };
        debug!(%url, %status, "Upstream returned an error status");
        return Err(Error::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await.map_err(|e| transport(url, e))?;
    decode_body(&bytes)
}

/// Decodes a response body: empty → `null`, then JSON, then UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::UnreadableBody`] with both parser errors when the body
/// is neither JSON nor valid UTF-8.
pub fn decode_body(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(json_error) => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(Value::String(text.to_string())),
            Err(text_error) => Err(Error::UnreadableBody {
                json_error: json_error.to_string(),
                text_error: text_error.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_body_is_null() {
        assert_eq!(decode_body(b"").unwrap(), Value::Null);
        assert_eq!(decode_body(b"  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_json_body() {
        assert_eq!(decode_body(br#"{"a":[1]}"#).unwrap(), json!({ "a": [1] }));
    }

    #[test]
    fn test_decode_text_body() {
        assert_eq!(decode_body(b"Created").unwrap(), json!("Created"));
    }

    #[test]
    fn test_decode_binary_body_fails_with_both_errors() {
        let err = decode_body(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, Error::UnreadableBody { .. }));
        assert!(err.to_string().contains("utf-8"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_client(Client::new(), "http://api.local/", None);
        assert_eq!(client.base_url(), "http://api.local");
    }

    #[test]
    fn test_new_scenario_body() {
        let scenario = NewScenario {
            name: "nightly".to_string(),
            code: "print(1)".to_string(),
            description: None,
            project_id: Some("p1".to_string()),
        };
        let value = serde_json::to_value(&scenario).unwrap();
        assert_eq!(value, json!({ "name": "nightly", "code": "print(1)", "projectId": "p1" }));
    }
}
