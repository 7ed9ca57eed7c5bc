//! The transport seam between the resource engine and the network.
//!
//! Everything the engine knows about HTTP goes through [`Transport::request`].
//! The default implementation is [`HttpClient`](crate::clients::HttpClient);
//! custom authentication schemes or test doubles implement the trait directly.

use std::fmt;

use async_trait::async_trait;

use crate::clients::{HttpError, HttpRequest, HttpResponse};

/// Executes a single request against the Jira server.
///
/// # Contract
///
/// Implementations must return [`HttpError::Response`] for every status code
/// outside `200..=299`; the engine never inspects the status of a returned
/// `Ok` response. Timeouts, retries and cancellation are the transport's
/// business.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use jira_api::clients::{HttpError, HttpRequest, HttpResponse, Transport};
///
/// #[derive(Debug)]
/// struct AlwaysEmpty;
///
/// #[async_trait]
/// impl Transport for AlwaysEmpty {
///     async fn request(&self, _request: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::from_status(204, ""))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Sends the request and returns the server's response.
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}
