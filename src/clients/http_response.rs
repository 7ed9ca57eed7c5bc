//! HTTP response types for the Jira client.
//!
//! This module provides the [`HttpResponse`] type: a status code, the
//! response headers, and the raw body text. Parsing the body is left to the
//! caller because an empty or non-JSON body is a legitimate outcome for many
//! Jira endpoints (e.g. `204 No Content` after an update).

use std::collections::HashMap;

/// Bodies shorter than this cannot hold a meaningful JSON document.
const MIN_JSON_BODY_LEN: usize = 2;

/// An HTTP response returned by a transport.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body. Empty when the server sent none.
    pub body: String,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok());

        Self {
            code,
            headers,
            body: body.into(),
            retry_request_after,
        }
    }

    /// Creates a response without headers. Handy for custom transports.
    #[must_use]
    pub fn from_status(code: u16, body: impl Into<String>) -> Self {
        Self::new(code, HashMap::new(), body)
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the body is too short to carry a JSON document.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body.trim().len() < MIN_JSON_BODY_LEN
    }

    /// Parses the body as JSON.
    ///
    /// Returns `None` for blank bodies.
    ///
    /// # Errors
    ///
    /// Returns the parser error when a non-blank body is not valid JSON.
    pub fn json(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        if self.is_blank() {
            return Ok(None);
        }
        serde_json::from_str(&self.body).map(Some)
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-AREQUESTID` header value, if present.
    ///
    /// Jira stamps every response with this ID; include it in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-arequestid")
    }
}
