//! HTTP gateway built on `reqwest`.
//!
//! This module provides the [`HttpClient`] type, the default [`Transport`]
//! used by [`JiraClient`](crate::JiraClient).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::ClientConfig;

/// Fixed retry wait time in seconds when the server sends no `Retry-After`.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Longest wait honoured from a `Retry-After` header, in seconds.
pub const MAX_RETRY_AFTER: u64 = 60;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to a Jira server.
///
/// The client handles:
/// - Resolving server-relative paths against the site origin
/// - Passing absolute URLs (e.g. unmatched `"self"` links) through unchanged
/// - Default `User-Agent` and `Accept` headers
/// - Automatic retry logic for 429 and 5xx responses
/// - Mapping non-2xx responses to [`HttpError::Response`]
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use jira_api::{ClientConfig, SiteUrl};
/// use jira_api::clients::{HttpClient, HttpRequest, HttpMethod, Transport};
///
/// let config = ClientConfig::builder()
///     .site(SiteUrl::new("https://jira.example.com").unwrap())
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/rest/api/2/serverInfo").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Site origin (e.g., `https://jira.example.com`).
    base_uri: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying `reqwest` client
    /// cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Jira API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_uri: config.site().as_ref().to_string(),
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves a request path into the URL that is actually fetched.
    #[must_use]
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_uri)
        } else {
            format!("{}/{path}", self.base_uri)
        }
    }

    async fn send_once(&self, url: &str, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
            HttpMethod::Head => self.client.head(url),
        };

        for (key, value) in &self.default_headers {
            if !request.headers.contains_key(key) {
                req_builder = req_builder.header(key, value);
            }
        }
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();

        Ok(HttpResponse::new(code, res_headers, body_text))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    const fn is_retryable(code: u16) -> bool {
        matches!(code, 429 | 500 | 502 | 503)
    }

    fn calculate_retry_delay(response: &HttpResponse) -> Duration {
        // Retry-After is only trusted for rate limiting
        if response.code == 429 {
            if let Some(retry_after) = response.retry_request_after {
                // NaN, infinite and overflowing values fall back to the fixed wait
                if let Ok(delay) = Duration::try_from_secs_f64(retry_after.max(0.0)) {
                    return delay.min(Duration::from_secs(MAX_RETRY_AFTER));
                }
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.resolve_url(&request.path);

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(
                method = request.http_method.as_str(),
                url = %url,
                attempt = tries,
                "Sending Jira request"
            );

            let response = self.send_once(&url, &request).await?;

            if response.is_ok() {
                return Ok(response);
            }

            let code = response.code;
            let error_reference = response.request_id().map(String::from);

            if !Self::is_retryable(code) || request.tries <= 1 {
                return Err(HttpResponseError::new(code, response.body, error_reference).into());
            }

            if tries >= request.tries {
                let error = HttpResponseError::new(code, response.body, error_reference);
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error.message,
                    body: error.body,
                    error_reference: error.error_reference,
                }));
            }

            let delay = Self::calculate_retry_delay(&response);
            tracing::debug!(code, delay_secs = delay.as_secs_f64(), "Retrying Jira request");
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteUrl;

    fn create_test_config() -> ClientConfig {
        ClientConfig::builder()
            .site(SiteUrl::new("https://jira.example.com").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_uses_site_origin() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(client.base_uri(), "https://jira.example.com");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Jira API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ClientConfig::builder()
            .site(SiteUrl::new("https://jira.example.com").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_resolve_url_handles_relative_and_absolute_paths() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(
            client.resolve_url("/rest/api/2/issue/1"),
            "https://jira.example.com/rest/api/2/issue/1"
        );
        assert_eq!(
            client.resolve_url("rest/api/2/issue/1"),
            "https://jira.example.com/rest/api/2/issue/1"
        );
        assert_eq!(
            client.resolve_url("https://other.example.com/rest/api/2/issue/1"),
            "https://other.example.com/rest/api/2/issue/1"
        );
    }

    #[test]
    fn test_retryable_codes() {
        assert!(HttpClient::is_retryable(429));
        assert!(HttpClient::is_retryable(503));
        assert!(!HttpClient::is_retryable(404));
        assert!(!HttpClient::is_retryable(400));
    }

    fn rate_limited(retry_after: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec![retry_after.to_string()]);
        HttpResponse::new(429, headers, "")
    }

    #[test]
    fn test_retry_delay_honours_retry_after() {
        assert_eq!(
            HttpClient::calculate_retry_delay(&rate_limited("2.5")),
            Duration::from_millis(2500)
        );
        assert_eq!(
            HttpClient::calculate_retry_delay(&rate_limited("-3")),
            Duration::ZERO
        );
    }

    #[test]
    fn test_retry_delay_survives_unrepresentable_retry_after() {
        let fallback = Duration::from_secs(RETRY_WAIT_TIME);
        assert_eq!(HttpClient::calculate_retry_delay(&rate_limited("inf")), fallback);
        assert_eq!(HttpClient::calculate_retry_delay(&rate_limited("1e300")), fallback);
        assert_eq!(HttpClient::calculate_retry_delay(&rate_limited("NaN")), Duration::ZERO);
        assert_eq!(
            HttpClient::calculate_retry_delay(&rate_limited("86400")),
            Duration::from_secs(MAX_RETRY_AFTER)
        );
    }

    #[test]
    fn test_retry_delay_ignores_retry_after_on_server_errors() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["30".to_string()]);
        let response = HttpResponse::new(503, headers, "");

        assert_eq!(
            HttpClient::calculate_retry_delay(&response),
            Duration::from_secs(RETRY_WAIT_TIME)
        );
    }
}
