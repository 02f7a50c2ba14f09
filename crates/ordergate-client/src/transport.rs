//! HTTP transport to the gateway.
//!
//! Clients describe an exchange as a [`GatewayRequest`] and hand it to a
//! [`Transport`]. The production transport is [`HttpTransport`] on top of
//! `reqwest`; tests substitute their own implementation.

use async_trait::async_trait;
use ordergate_core::config::join_endpoint;
use ordergate_core::{ClientConfig, GatewayError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

/// One request against the gateway's API surface.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub method: Method,
    /// Path relative to the gateway origin, e.g. `/app/orders/1`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl GatewayRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Looks up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response whose body parsed as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl GatewayResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Performs one request/response exchange.
///
/// Implementations return `Err` only when no usable response was obtained:
/// the request could not be sent, the connection failed, or the body was not
/// JSON. Any status code with a JSON body is `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse>;
}

/// `reqwest`-backed transport. No timeout is set; a request waits until the
/// connection settles or fails.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    gateway_url: String,
}

impl HttpTransport {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            gateway_url: gateway_url.into(),
        }
    }

    /// Uses a preconfigured `reqwest` client (proxy settings, TLS roots, ...).
    pub fn with_client(client: Client, gateway_url: impl Into<String>) -> Self {
        Self {
            client,
            gateway_url: gateway_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.gateway_url.clone())
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| GatewayError::invalid_request(format!("header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_bytes(value.as_bytes())
            .map_err(|e| GatewayError::invalid_request(format!("header '{}': {}", name, e)))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse> {
        let url = join_endpoint(&self.gateway_url, &request.path);
        let headers = header_map(&request.headers)?;

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            GatewayError::transport(format!("{} {} failed: {}", request.method, url, e))
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            GatewayError::transport(format!("reading body of {} {} failed: {}", request.method, url, e))
        })?;
        let body: Value = serde_json::from_slice(&bytes)?;

        Ok(GatewayResponse { status, body })
    }
}
