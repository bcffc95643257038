//! # Request Gateway
//!
//! Typed HTTP dispatch for every portal call the harness makes.
//!
//! A call is described by an [`ApiRequest`] and sent through a shared
//! [`RequestGateway`], which:
//! - resolves relative paths against the base URL and API version
//! - merges the stored bearer token with per-call headers (per-call wins)
//! - checks the response status against the declared expectation
//! - normalizes the body into a [`ResponseBody`]
//!
//! Endpoints disagree on response shape (an object from one, a bare id string
//! from another, nothing at all on 204), so callers match on the body variant
//! or decode it with [`ResponseBody::into_json`].

use parking_lot::RwLock;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{HarnessError, Result};
use crate::utils::{is_absolute_url, join_url, redact_authorization, truncate_body, MAX_LOGGED_BODY};

const AUTHORIZATION: &str = "authorization";

// =============================================================================
// Request description
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            other => Err(HarnessError::config(format!(
                "Unsupported HTTP method: {}",
                other
            ))),
        }
    }
}

/// One API call: route, payload, expected status and per-call headers
#[derive(Debug)]
pub struct ApiRequest {
    method: HttpMethod,
    path: String,
    body: Option<std::result::Result<Value, serde_json::Error>>,
    expected_status: u16,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    bearer: Option<String>,
    anonymous: bool,
    versioned: bool,
    version: Option<String>,
}

impl ApiRequest {
    /// Request expecting `200 OK` unless [`ApiRequest::expect`] says otherwise
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            expected_status: 200,
            headers: Vec::new(),
            query: Vec::new(),
            bearer: None,
            anonymous: false,
            versioned: true,
            version: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// JSON body; a serialization failure surfaces when the request is sent
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body));
        self
    }

    pub fn expect(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    /// Per-call header; overrides the stored token for `Authorization`
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Bearer token for this call only, in place of the gateway's stored one
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Send no `Authorization` header unless one is given explicitly
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    /// Resolve against the bare base URL, skipping the version segment
    pub fn unversioned(mut self) -> Self {
        self.versioned = false;
        self
    }

    /// Use `version` in place of the configured version segment
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn expected_status(&self) -> u16 {
        self.expected_status
    }
}

/// Merge the stored token with explicit headers.
///
/// Precedence is explicit header, then stored bearer token, then nothing.
/// Keys are lowercased so `Authorization` and `authorization` collide.
pub fn merge_headers(
    stored_token: Option<&str>,
    explicit: &[(String, String)],
) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    if let Some(token) = stored_token {
        merged.insert(AUTHORIZATION.to_string(), format!("Bearer {}", token));
    }
    for (name, value) in explicit {
        merged.insert(name.to_ascii_lowercase(), value.clone());
    }
    merged
}

// =============================================================================
// Response shapes
// =============================================================================

/// Normalized response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    /// Non-JSON payload, such as a bare identifier
    Text(String),
    /// `204 No Content` or a zero-length body
    Empty,
}

impl ResponseBody {
    /// Classify a raw body by status and content type
    pub fn normalize(status: u16, content_type: Option<&str>, text: String) -> Self {
        if status == 204 || text.trim().is_empty() {
            return ResponseBody::Empty;
        }
        let is_json = content_type
            .map(|value| value.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false);
        if is_json {
            if let Ok(value) = serde_json::from_str(&text) {
                return ResponseBody::Json(value);
            }
        }
        ResponseBody::Text(text)
    }

    /// Decode into `T`. Text decodes as a JSON string, Empty as `{}`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.into_value())
            .map_err(|err| HarnessError::decode("response body", err))
    }

    pub fn into_value(self) -> Value {
        match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
            ResponseBody::Empty => Value::Object(Map::new()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }
}

/// Status code paired with the normalized body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

// =============================================================================
// Gateway
// =============================================================================

/// Shared HTTP dispatcher; one per test context, shared by the portal services
#[derive(Debug)]
pub struct RequestGateway {
    client: Client,
    base_url: String,
    version: String,
    token: RwLock<Option<String>>,
}

impl RequestGateway {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HarnessError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            version: config.version_segment(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_auth_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear_auth_token(&self) {
        *self.token.write() = None;
    }

    pub fn auth_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Configured version segment, such as `v1`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Absolute URL for `path`; `None` skips the version segment
    pub fn resolve_url(&self, path: &str, version: Option<&str>) -> String {
        if is_absolute_url(path) {
            return path.to_string();
        }
        match version {
            Some(version) => join_url(&self.base_url, &[version, path]),
            None => join_url(&self.base_url, &[path]),
        }
    }

    /// Send and validate the status; returns the normalized body
    pub async fn send(&self, request: ApiRequest) -> Result<ResponseBody> {
        Ok(self.send_with_status(request).await?.body)
    }

    /// Send and validate the status; returns status and body together
    pub async fn send_with_status(&self, request: ApiRequest) -> Result<ApiResponse> {
        let expected = request.expected_status;
        let method = request.method;
        let (url, status, content_type, text) = self.dispatch(request).await?;

        if status != expected {
            return Err(HarnessError::StatusMismatch {
                method: method.to_string(),
                url,
                expected,
                actual: status,
                body: truncate_body(&text, MAX_LOGGED_BODY),
            });
        }

        Ok(ApiResponse {
            status,
            body: ResponseBody::normalize(status, content_type.as_deref(), text),
        })
    }

    /// Send, validate and decode the body into `T`
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.into_json()
    }

    /// Send without checking the status, for negative-path assertions
    pub async fn exchange(&self, request: ApiRequest) -> Result<ApiResponse> {
        let (_, status, content_type, text) = self.dispatch(request).await?;
        Ok(ApiResponse {
            status,
            body: ResponseBody::normalize(status, content_type.as_deref(), text),
        })
    }

    async fn dispatch(
        &self,
        request: ApiRequest,
    ) -> Result<(String, u16, Option<String>, String)> {
        let ApiRequest {
            method,
            path,
            body,
            headers,
            query,
            bearer,
            anonymous,
            versioned,
            version,
            ..
        } = request;

        let version = versioned.then(|| version.unwrap_or_else(|| self.version.clone()));
        let url = self.resolve_url(&path, version.as_deref());
        Url::parse(&url)?;

        let body = body
            .transpose()
            .map_err(|err| HarnessError::encode(format!("request body for {} {}", method, url), err))?;

        let token = if anonymous {
            None
        } else {
            bearer.or_else(|| self.auth_token())
        };
        let merged = merge_headers(token.as_deref(), &headers);

        debug!(
            method = %method,
            url = %url,
            headers = ?loggable_headers(&merged),
            query = ?query,
            body = %body
                .as_ref()
                .map(|b| truncate_body(&b.to_string(), MAX_LOGGED_BODY))
                .unwrap_or_default(),
            "Sending API request"
        );

        let mut builder = self.client.request(method.to_reqwest(), &url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        for (name, value) in &merged {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                error!(method = %method, url = %url, error = %err, "API request failed");
                return Err(HarnessError::Transport(err));
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                error!(method = %method, url = %url, error = %err, "Failed to read response body");
                return Err(HarnessError::Transport(err));
            }
        };

        debug!(
            method = %method,
            url = %url,
            status,
            body = %truncate_body(&text, MAX_LOGGED_BODY),
            "Received API response"
        );

        Ok((url, status, content_type, text))
    }
}

fn loggable_headers(headers: &BTreeMap<String, String>) -> BTreeMap<&str, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == AUTHORIZATION {
                redact_authorization(value)
            } else {
                value.clone()
            };
            (name.as_str(), shown)
        })
        .collect()
}
