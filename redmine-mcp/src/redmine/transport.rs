//! HTTP transport for the Redmine REST API
//!
//! [`RedmineTransport`] is the single capability the resource adapter needs:
//! send one request and hand back the decoded JSON, or a typed error carrying
//! the status code and body. [`HttpTransport`] implements it with `reqwest`.

use crate::config::{ConfigError, RedmineConfig};
use crate::error::{RedmineMcpError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;

/// Header carrying the Redmine API key
pub const API_KEY_HEADER: &str = "X-Redmine-API-Key";

/// One outbound call to the remote service
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    /// HTTP verb
    pub method: Method,
    /// Path relative to the base URL, e.g. `/issues.json`
    pub path: String,
    /// Query parameters in the order they were added
    pub query: Vec<(String, String)>,
    /// JSON body for POST and PUT
    pub body: Option<Value>,
}

impl RemoteRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// A GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A POST request with a JSON body
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    /// A PUT request with a JSON body
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    /// A DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present
    pub fn query_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Look up the first value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Capability to perform one request against the remote service
#[async_trait]
pub trait RedmineTransport: Send + Sync {
    /// Send the request and decode the JSON response
    ///
    /// A successful response with an empty body decodes to `Value::Null`.
    /// Non-success statuses become [`RedmineMcpError::Remote`].
    async fn send(&self, request: RemoteRequest) -> Result<Value>;
}

/// `reqwest`-backed transport that authenticates every call
///
/// Each request carries both the API key header and HTTP basic credentials.
pub struct HttpTransport {
    base_url: String,
    username: String,
    password: Secret<String>,
    client: Client,
}

impl HttpTransport {
    /// Build a transport from connection settings
    pub fn new(config: &RedmineConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret()).map_err(|_| {
            ConfigError::InvalidValue {
                field: "api_key".to_string(),
                value: "[REDACTED]".to_string(),
                hint: "The API key must contain only visible ASCII characters".to_string(),
            }
        })?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(format!("redmine-mcp/{}", crate::VERSION))
            .build()
            .map_err(|e| RedmineMcpError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: Secret::new(config.password.expose_secret().clone()),
            client,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl RedmineTransport for HttpTransport {
    async fn send(&self, request: RemoteRequest) -> Result<Value> {
        let url = self.url_for(&request.path);
        tracing::debug!("{} {} {:?}", request.method, request.path, request.query);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .basic_auth(&self.username, Some(self.password.expose_secret()));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RedmineMcpError::Transport(format!("{} {url}: {e}", request.method)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RedmineMcpError::Transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            tracing::warn!("{} {} returned {}", request.method, request.path, status);
            return Err(RedmineMcpError::Remote {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            RedmineMcpError::Transport(format!("Malformed JSON from {}: {e}", request.path))
        })
    }
}
