//! # HTTP Transport
//!
//! Every outbound call (geocoder and backend alike) goes through the [`HttpTransport`]
//! trait. Production code uses [`ReqwestTransport`]; tests use
//! [`MockTransport`](super::mock::MockTransport). [`DefaultHeaders`] decorates any
//! transport with headers that must ride on every request (the bearer token).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub use reqwest::Method;

/// Transport-level failures. Business failures travel as non-2xx [`HttpResponse`]s.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout(error.to_string())
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else if error.is_decode() || error.is_body() {
            TransportError::Decode(error.to_string())
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

/// An outbound request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// First value of a query parameter, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value of a header (case-insensitive name), if present.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body. An empty body decodes as JSON `null`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        if self.body.trim().is_empty() {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_str(&self.body)
        }
        .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "Sending request");
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let error = TransportError::from(e);
            warn!(url = %request.url, error = %error, "Transport failure");
            error
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url = %request.url, status, "Response received");
        Ok(HttpResponse { status, body })
    }
}

/// Adds a fixed set of headers to every request passing through `inner`.
/// Headers already set on the request win.
pub struct DefaultHeaders {
    inner: Arc<dyn HttpTransport>,
    headers: Vec<(String, String)>,
}

impl DefaultHeaders {
    pub fn new(inner: Arc<dyn HttpTransport>, headers: Vec<(String, String)>) -> Self {
        Self { inner, headers }
    }

    pub fn bearer(inner: Arc<dyn HttpTransport>, token: &str) -> Self {
        Self::new(
            inner,
            vec![("Authorization".to_string(), format!("Bearer {}", token))],
        )
    }
}

#[async_trait]
impl HttpTransport for DefaultHeaders {
    async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, TransportError> {
        for (name, value) in &self.headers {
            if request.header_value(name).is_none() {
                request.headers.push((name.clone(), value.clone()));
            }
        }
        self.inner.send(request).await
    }
}
