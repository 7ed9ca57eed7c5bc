//! HTTP-specific error types for the Jira client.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the server. Carries
//!   the status and the raw response body so callers can inspect it.
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use jira_api::clients::HttpError;
//!
//! match client.get("/rest/api/2/issue/SAMPLE-1").await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("Jira said {}: {}", e.code, e.body),
//!     Err(e) => println!("Transport failure: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a status outside `200..=299`.
///
/// `message` is a short description (Jira's `errorMessages`, or the canonical
/// reason phrase when the body carries none) and `body` is the raw response
/// body exactly as received.
///
/// # Example
///
/// ```rust
/// use jira_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Issue does not exist".to_string(),
///     body: r#"{"errorMessages":["Issue does not exist"]}"#.to_string(),
///     error_reference: None,
/// };
///
/// assert_eq!(error.to_string(), "HTTP 404: Issue does not exist");
/// ```
#[derive(Debug, Clone, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human readable error message.
    pub message: String,
    /// The raw response body.
    pub body: String,
    /// Reference ID for error reporting (from the `X-AREQUESTID` header).
    pub error_reference: Option<String>,
}

impl HttpResponseError {
    /// Builds an error for `code`, deriving the message from the body.
    #[must_use]
    pub fn new(code: u16, body: impl Into<String>, error_reference: Option<String>) -> Self {
        let body = body.into();
        let message = error_message(code, &body);
        Self {
            code,
            message,
            body,
            error_reference,
        }
    }

    /// Returns the canonical reason phrase for the status (e.g. "Bad Request").
    #[must_use]
    pub fn reason(&self) -> &'static str {
        canonical_reason(self.code)
    }
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with 429 or 5xx responses after all
/// configured attempts have been made.
#[derive(Debug, Clone, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
    /// The raw body of the last response.
    pub body: String,
    /// Reference ID for error reporting.
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,
}

/// Unified error type for all HTTP-related errors.
///
/// `Response` is the transport failure the resource engine surfaces from
/// `fetch`, `delete` and `try_save`.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the status code when the server produced a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }

    /// Returns the raw body of the failed response, if there was one.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Response(e) => Some(&e.body),
            Self::MaxRetries(e) => Some(&e.body),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

/// Returns the canonical reason phrase for a status code.
#[must_use]
pub fn canonical_reason(code: u16) -> &'static str {
    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown Status")
}

/// Extracts a message from a Jira error document, falling back to the reason phrase.
///
/// Jira reports failures as
/// `{"errorMessages": ["..."], "errors": {"field": "..."}}`.
fn error_message(code: u16, body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return canonical_reason(code).to_string();
    };

    let mut messages: Vec<String> = json
        .get("errorMessages")
        .and_then(serde_json::Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default();

    if let Some(errors) = json.get("errors").and_then(serde_json::Value::as_object) {
        for (field, message) in errors {
            let text = message
                .as_str()
                .map_or_else(|| message.to_string(), ToString::to_string);
            messages.push(format!("{field}: {text}"));
        }
    }

    if messages.is_empty() {
        canonical_reason(code).to_string()
    } else {
        messages.join("; ")
    }
}
