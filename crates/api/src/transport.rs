//! HTTP transport for HAL navigation.

use std::{env, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method, header};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::ApiError;

/// Media types requested for every navigation.
pub const DEFAULT_ACCEPT: &str = "application/hal+json, application/json";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
    pub user_agent: String,
    pub accept: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("halbridge/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

/// A single request issued by the navigator.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
}

/// The raw outcome of a request: status, the headers navigation cares about
/// and the body text.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Moves navigator requests over the wire.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; `Err` is reserved for requests that never completed.
#[async_trait]
pub trait HalTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// [`HalTransport`] over a configured `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HalHttpClient {
    http: Client,
    user_agent: String,
}

impl HalHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut default_headers = header::HeaderMap::new();
        let accept = header::HeaderValue::from_str(&config.accept).map_err(|error| ApiError::Transport(error.to_string()))?;
        default_headers.insert(header::ACCEPT, accept);

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait]
impl HalTransport for HalHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, has_body = request.body.is_some(), "building request");

        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .header(header::USER_AGENT, &self.user_agent);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let network_error = |source| ApiError::Network {
            method: request.method.clone(),
            url: request.url.to_string(),
            source,
        };
        let response = builder.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let header_text = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let location = header_text(header::LOCATION);
        let content_type = header_text(header::CONTENT_TYPE);
        let body = response.text().await.map_err(network_error)?;

        Ok(HttpResponse {
            status,
            location,
            content_type,
            body,
        })
    }
}

/// Check that an API root is an absolute `http`/`https` URL with a host.
pub fn validate_root_url(root: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidRoot {
        url: root.to_string(),
        reason,
    };
    let parsed = Url::parse(root).map_err(|error| invalid(error.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("scheme must be http or https; got '{}://'", parsed.scheme())));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("URL must include a host".to_string()));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_root_url_accepts_http_and_https() {
        assert!(validate_root_url("http://localhost:8080/api").is_ok());
        assert!(validate_root_url("https://api.example.com").is_ok());
    }

    #[test]
    fn validate_root_url_rejects_other_schemes_and_relative_urls() {
        let error = validate_root_url("ftp://files.example.com").unwrap_err();
        assert!(error.to_string().contains("scheme must be http or https"), "{error}");

        assert!(matches!(validate_root_url("/api"), Err(ApiError::InvalidRoot { .. })));
    }

    #[test]
    fn default_config_requests_hal() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.accept.starts_with("application/hal+json"));
        assert!(config.user_agent.starts_with("halbridge/"));
    }
}
