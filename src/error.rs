//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured client fails before the first request is sent.
//!
//! # Example
//!
//! ```rust
//! use jira_api::{ConfigError, SiteUrl};
//!
//! let result = SiteUrl::new("jira.example.com");
//! assert!(matches!(result, Err(ConfigError::InvalidSiteUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Site URL is invalid.
    #[error("Invalid site URL '{url}'. Please provide an origin with scheme and host (e.g., 'https://jira.example.com').")]
    InvalidSiteUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Context path is invalid.
    #[error("Invalid context path '{path}'. Expected an empty string or a path like '/jira'.")]
    InvalidContextPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected '2', '3', 'latest' or a path like '/rest/api/2'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A default header has an empty name.
    #[error("Invalid default header '{name}'. Header names cannot be empty or contain whitespace.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
