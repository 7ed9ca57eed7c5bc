//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated site origin such as `https://jira.example.com`.
///
/// The origin is the part of every absolute resource URL (`"self"` links)
/// that gets stripped before a request path is issued. Trailing slashes are
/// removed on construction so that stripping never leaves a double slash.
///
/// # Example
///
/// ```rust
/// use jira_api::SiteUrl;
///
/// let site = SiteUrl::new("https://jira.example.com/").unwrap();
/// assert_eq!(site.as_ref(), "https://jira.example.com");
/// assert_eq!(site.scheme(), "https");
/// assert_eq!(site.host_name(), Some("jira.example.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl SiteUrl {
    /// Creates a new validated site URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSiteUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidSiteUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidSiteUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidSiteUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if url[host_start..host_end].is_empty() {
            return Err(ConfigError::InvalidSiteUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for SiteUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for SiteUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated context path under which Jira is mounted (e.g. `/jira`).
///
/// The empty path means Jira is served from the site root. Non-empty paths
/// always start with `/` and never end with one, so that
/// `context_path + "/rest/api/2"` is well formed.
///
/// # Example
///
/// ```rust
/// use jira_api::ContextPath;
///
/// assert_eq!(ContextPath::new("jira/").unwrap().as_ref(), "/jira");
/// assert_eq!(ContextPath::new("").unwrap().as_ref(), "");
/// assert!(ContextPath::new("/my jira").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContextPath(String);

impl ContextPath {
    /// Creates a new validated context path, normalizing slashes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidContextPath`] if the path contains
    /// whitespace, a query, or a fragment.
    pub fn new(path: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = path.into();
        let trimmed = raw.trim().trim_matches('/');

        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '?' | '#'))
        {
            return Err(ConfigError::InvalidContextPath { path: raw });
        }

        Ok(Self(format!("/{trimmed}")))
    }

    /// Returns the root context path (empty string).
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns `true` if Jira is mounted at the site root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ContextPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_url_validates_format() {
        let url = SiteUrl::new("https://jira.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), Some("jira.example.com"));

        let url = SiteUrl::new("http://localhost:2990").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("localhost"));
    }

    #[test]
    fn test_site_url_trims_trailing_slash() {
        let url = SiteUrl::new("https://jira.example.com///").unwrap();
        assert_eq!(url.as_ref(), "https://jira.example.com");
    }

    #[test]
    fn test_site_url_rejects_invalid() {
        assert!(SiteUrl::new("jira.example.com").is_err());
        assert!(SiteUrl::new("https://").is_err());
        assert!(SiteUrl::new("://example.com").is_err());
    }

    #[test]
    fn test_site_url_deserializes_with_validation() {
        let site: SiteUrl = serde_json::from_str(r#""https://jira.example.com/""#).unwrap();
        assert_eq!(site.as_ref(), "https://jira.example.com");

        let result: Result<SiteUrl, _> = serde_json::from_str(r#""not a url""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_context_path_normalizes_slashes() {
        assert_eq!(ContextPath::new("/jira").unwrap().as_ref(), "/jira");
        assert_eq!(ContextPath::new("jira").unwrap().as_ref(), "/jira");
        assert_eq!(ContextPath::new("/jira/").unwrap().as_ref(), "/jira");
        assert_eq!(
            ContextPath::new("tools/jira").unwrap().as_ref(),
            "/tools/jira"
        );
    }

    #[test]
    fn test_context_path_root() {
        assert!(ContextPath::new("/").unwrap().is_root());
        assert!(ContextPath::new("").unwrap().is_root());
        assert!(ContextPath::default().is_root());
    }

    #[test]
    fn test_context_path_rejects_invalid() {
        assert!(matches!(
            ContextPath::new("/my jira"),
            Err(ConfigError::InvalidContextPath { .. })
        ));
        assert!(ContextPath::new("/jira?x=1").is_err());
    }
}
