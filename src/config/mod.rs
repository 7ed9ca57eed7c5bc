//! Configuration types for the Jira client.
//!
//! This module provides the immutable configuration a [`JiraClient`](crate::JiraClient)
//! is built from. Every resource URL is derived from it.
//!
//! # Overview
//!
//! - [`ClientConfig`]: The configuration struct holding the site and path settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`SiteUrl`]: A validated site origin
//! - [`ContextPath`]: A validated mount point for reverse-proxied deployments
//! - [`ApiVersion`]: The REST API mount to use
//!
//! # Example
//!
//! ```rust
//! use jira_api::{ClientConfig, SiteUrl, ApiVersion};
//!
//! let config = ClientConfig::builder()
//!     .site(SiteUrl::new("https://example.com").unwrap())
//!     .context_path("/jira")
//!     .api_version(ApiVersion::V2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.rest_base_path(), "/jira/rest/api/2");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ContextPath, SiteUrl};
pub use version::ApiVersion;

use std::collections::BTreeMap;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ConfigError;

/// Configuration for a Jira client.
///
/// `rest_base_path` is computed once when the configuration is built, never
/// per request.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`. Clients share it behind an
/// `Arc` and never mutate it.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    site: SiteUrl,
    context_path: ContextPath,
    api_version: ApiVersion,
    rest_base_path: String,
    default_headers: BTreeMap<String, String>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    tries: u32,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the site origin.
    #[must_use]
    pub const fn site(&self) -> &SiteUrl {
        &self.site
    }

    /// Returns the context path.
    #[must_use]
    pub const fn context_path(&self) -> &ContextPath {
        &self.context_path
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns `context_path + api_version` suffix, e.g. `/jira/rest/api/2`.
    #[must_use]
    pub fn rest_base_path(&self) -> &str {
        &self.rest_base_path
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout enforced by the HTTP gateway.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns how many times the HTTP gateway attempts a retryable request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `site` is the only required field.
///
/// # Defaults
///
/// - `context_path`: root (empty)
/// - `api_version`: [`ApiVersion::V2`]
/// - `default_headers`: none
/// - `tries`: 1 (no retries)
///
/// # Example
///
/// ```rust
/// use jira_api::{ClientConfig, SiteUrl};
///
/// let config = ClientConfig::builder()
///     .site(SiteUrl::new("https://jira.example.com").unwrap())
///     .basic_auth("admin", "secret-token")
///     .header("X-Atlassian-Token", "no-check")
///     .tries(3)
///     .build()
///     .unwrap();
///
/// assert!(config.default_headers().contains_key("Authorization"));
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    site: Option<SiteUrl>,
    context_path: Option<String>,
    api_version: Option<ApiVersion>,
    default_headers: BTreeMap<String, String>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    tries: Option<u32>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site origin (required).
    #[must_use]
    pub fn site(mut self, site: SiteUrl) -> Self {
        self.site = Some(site);
        self
    }

    /// Sets the context path Jira is mounted under. Validated in [`build`](Self::build).
    #[must_use]
    pub fn context_path(mut self, path: impl Into<String>) -> Self {
        self.context_path = Some(path.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Sets an `Authorization: Basic ...` default header.
    #[must_use]
    pub fn basic_auth(self, username: &str, token: &str) -> Self {
        let credentials = STANDARD.encode(format!("{username}:{token}"));
        self.header("Authorization", format!("Basic {credentials}"))
    }

    /// Sets an `Authorization: Bearer ...` default header.
    #[must_use]
    pub fn bearer_token(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many times retryable requests (429, 5xx) are attempted.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `site` is not set,
    /// [`ConfigError::InvalidContextPath`] for a malformed context path and
    /// [`ConfigError::InvalidHeader`] for an empty or whitespace header name.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let site = self
            .site
            .ok_or(ConfigError::MissingRequiredField { field: "site" })?;

        let context_path = match self.context_path {
            Some(path) => ContextPath::new(path)?,
            None => ContextPath::root(),
        };

        if let Some(name) = self
            .default_headers
            .keys()
            .find(|name| name.is_empty() || name.chars().any(char::is_whitespace))
        {
            return Err(ConfigError::InvalidHeader { name: name.clone() });
        }

        let api_version = self.api_version.unwrap_or_default();
        let rest_base_path = format!("{}{}", context_path, api_version.rest_path());

        Ok(ClientConfig {
            site,
            context_path,
            api_version,
            rest_base_path,
            default_headers: self.default_headers,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            tries: self.tries.unwrap_or(1).max(1),
        })
    }
}
