//! HTTP plumbing and the Jira client handle.
//!
//! # Overview
//!
//! - [`JiraClient`]: the handle every resource talks through
//! - [`Transport`]: the seam between the engine and the network
//! - [`HttpClient`]: the default `reqwest` transport
//! - [`HttpRequest`] / [`HttpResponse`]: the verb/path/body/header contract
//! - [`HttpError`]: transport failures, including non-2xx responses
//! - [`ClientCache`]: per-client side cache (e.g. the custom field map)
//!
//! # Retry Behavior
//!
//! [`HttpClient`] retries transient failures when the configured `tries`
//! is greater than 1:
//!
//! - **429 (Rate Limited)**: waits for `Retry-After`, or 1 second if absent
//! - **500, 502, 503**: waits 1 second
//! - **Other statuses**: returned immediately
//!
//! The default `tries` is 1, meaning no automatic retries.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod jira;
mod transport;

pub use errors::{
    canonical_reason, HttpError, HttpResponseError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, MAX_RETRY_AFTER, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use jira::{CacheKey, ClientCache, JiraClient, ResourceFactory};
pub use transport::Transport;

#[cfg(test)]
pub(crate) use transport::stub::StubTransport;
