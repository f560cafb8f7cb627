//! Calls to user-defined endpoints.
//!
//! Endpoints are stored in DataMaker as records describing an external HTTP
//! target. Data is exported to them or fetched from them directly, without
//! going through the DataMaker API.
//!
//! SAP endpoints require a CSRF handshake: a `GET` with
//! `x-csrf-token: Fetch` returns a token and session cookies that must
//! accompany the actual request.

use crate::api::{decode_response, transport};
use datamaker_mcp_core::{Error, Result};
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use reqwest::{Client, Method};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Header used for the CSRF handshake.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// An export/fetch target as stored by DataMaker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointDefinition {
    /// Endpoint id
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Target URL
    pub url: String,
    /// HTTP method; defaults depend on the operation
    #[serde(default)]
    pub method: Option<String>,
    /// Extra request headers; `null` means none, scalar values are stringified
    #[serde(default, deserialize_with = "header_values")]
    pub headers: BTreeMap<String, String>,
    /// Endpoint flavor (`SAP` enables the CSRF handshake)
    #[serde(default, rename = "type")]
    pub endpoint_type: Option<String>,
}

impl EndpointDefinition {
    /// Parses an endpoint record returned by the API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] when the record has no string
    /// `url`, or a malformed `headers` map.
    pub fn from_value(value: Value) -> Result<Self> {
        let endpoint: Self = serde_json::from_value(value).map_err(|e| Error::ValidationError {
            field: "endpoint".to_string(),
            reason: e.to_string(),
        })?;

        if endpoint.url.trim().is_empty() {
            return Err(Error::ValidationError {
                field: "endpoint.url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(endpoint)
    }

    /// Returns `true` for SAP endpoints (case-insensitive).
    #[must_use]
    pub fn requires_csrf(&self) -> bool {
        self.endpoint_type
            .as_deref()
            .is_some_and(|kind| kind.eq_ignore_ascii_case("sap"))
    }

    /// Configured method, or `default` when none is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for a method name that is not a
    /// valid HTTP token.
    pub fn method_or(&self, default: Method) -> Result<Method> {
        match self.method.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(raw) => Method::from_bytes(raw.to_ascii_uppercase().as_bytes()).map_err(|_| {
                Error::ValidationError {
                    field: "endpoint.method".to_string(),
                    reason: format!("'{raw}' is not an HTTP method"),
                }
            }),
        }
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid_header(name, &e))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid_header(name, &e))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

fn header_values<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut headers = BTreeMap::new();
    for (name, value) in raw {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(serde::de::Error::custom(format!(
                    "header '{name}' must be a string, number or boolean"
                )));
            }
        };
        headers.insert(name, value);
    }
    Ok(headers)
}

fn invalid_header(name: &str, error: &dyn std::fmt::Display) -> Error {
    Error::ValidationError {
        field: format!("endpoint.headers.{name}"),
        reason: error.to_string(),
    }
}

/// Token and cookies obtained from a CSRF handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfSession {
    /// Value for the `x-csrf-token` request header
    pub token: String,
    /// `name=value` pairs from the `set-cookie` response headers
    pub cookies: Vec<String>,
}

impl CsrfSession {
    /// Cookies formatted for a `cookie` request header.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        self.cookies.join("; ")
    }
}

/// Sends data to and fetches data from user-defined endpoints.
#[derive(Debug, Clone)]
pub struct EndpointDispatcher {
    http: Client,
}

impl EndpointDispatcher {
    /// Creates a dispatcher on top of an existing HTTP client.
    #[must_use]
    pub const fn new(http: Client) -> Self {
        Self { http }
    }

    /// Sends `data` as JSON to the endpoint (default method `POST`).
    ///
    /// # Errors
    ///
    /// - [`Error::Csrf`] when an SAP endpoint returns no token
    /// - [`Error::Upstream`] for a non-2xx status
    /// - [`Error::Transport`] when no response was received
    /// - [`Error::ValidationError`] for a malformed method or header
    pub async fn send(&self, endpoint: &EndpointDefinition, data: &Value) -> Result<Value> {
        let method = endpoint.method_or(Method::POST)?;
        let mut headers = endpoint.header_map()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if endpoint.requires_csrf() {
            let session = self.negotiate_csrf(endpoint).await?;
            apply_session(&mut headers, &session)?;
        }

        info!(url = %endpoint.url, %method, "Exporting data to endpoint");
        let response = self
            .http
            .request(method, &endpoint.url)
            .headers(headers)
            .json(data)
            .send()
            .await
            .map_err(|e| transport(&endpoint.url, e))?;

        decode_response(&endpoint.url, response).await
    }

    /// Reads data from the endpoint (default method `GET`).
    ///
    /// # Errors
    ///
    /// Same as [`EndpointDispatcher::send`], except that no CSRF handshake
    /// is performed.
    pub async fn fetch(&self, endpoint: &EndpointDefinition) -> Result<Value> {
        let method = endpoint.method_or(Method::GET)?;
        let headers = endpoint.header_map()?;

        info!(url = %endpoint.url, %method, "Fetching data from endpoint");
        let response = self
            .http
            .request(method, &endpoint.url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| transport(&endpoint.url, e))?;

        decode_response(&endpoint.url, response).await
    }

    /// Performs the CSRF handshake against the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csrf`] if the response carries no token, and
    /// [`Error::Transport`] if the request fails.
    pub async fn negotiate_csrf(&self, endpoint: &EndpointDefinition) -> Result<CsrfSession> {
        let mut headers = endpoint.header_map()?;
        headers.insert(CSRF_HEADER, HeaderValue::from_static("Fetch"));

        let response = self
            .http
            .get(&endpoint.url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| transport(&endpoint.url, e))?;

        let token = response
            .headers()
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Csrf {
                message: format!(
                    "no {CSRF_HEADER} header in response from {} (status {})",
                    endpoint.url,
                    response.status()
                ),
            })?
            .to_string();

        let cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|cookie| cookie.split(';').next())
            .map(str::trim)
            .filter(|pair| pair.contains('='))
            .map(ToString::to_string)
            .collect();

        debug!(url = %endpoint.url, cookies = cookies.len(), "CSRF token obtained");
        Ok(CsrfSession { token, cookies })
    }
}

fn apply_session(headers: &mut HeaderMap, session: &CsrfSession) -> Result<()> {
    let token = HeaderValue::from_str(&session.token).map_err(|e| Error::Csrf {
        message: format!("token is not a valid header value: {e}"),
    })?;
    headers.insert(CSRF_HEADER, token);

    if !session.cookies.is_empty() {
        let cookie = HeaderValue::from_str(&session.cookie_header()).map_err(|e| Error::Csrf {
            message: format!("cookies are not a valid header value: {e}"),
        })?;
        headers.insert(COOKIE, cookie);
    }
    Ok(())
}
