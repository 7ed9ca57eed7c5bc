//! The Jira client handle.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::jira::{ClientCache, ResourceFactory};
use crate::clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, Transport,
};
use crate::config::ClientConfig;
use crate::rest::ResourceType;

/// A cheaply cloneable handle to one Jira site.
///
/// Clones share the configuration, the transport and the side cache, so a
/// client can be handed to every entity built from it.
///
/// # Thread Safety
///
/// `JiraClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use jira_api::{ClientConfig, JiraClient, SiteUrl};
/// use jira_api::rest::resources::Issue;
///
/// let config = ClientConfig::builder()
///     .site(SiteUrl::new("https://jira.example.com")?)
///     .basic_auth("admin", "api-token")
///     .build()?;
/// let client = JiraClient::new(config)?;
///
/// let issue = client.resource::<Issue>().find("SAMPLE-1").await?;
/// ```
#[derive(Clone, Debug)]
pub struct JiraClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    cache: Arc<ClientCache>,
}

// Verify JiraClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JiraClient>();
};

impl JiraClient {
    /// Creates a client that talks to the configured site over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let transport = HttpClient::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client on top of a custom transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            cache: Arc::new(ClientCache::new()),
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the side cache shared by every clone of this client.
    #[must_use]
    pub fn cache(&self) -> &ClientCache {
        &self.cache
    }

    /// Returns the class-level operations of resource type `T`.
    #[must_use]
    pub fn resource<T: ResourceType>(&self) -> ResourceFactory<T> {
        ResourceFactory::new(self.clone())
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for non-2xx responses and transport failures.
    pub async fn get(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.make_request(HttpMethod::Get, path, None).await
    }

    /// Sends a HEAD request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for non-2xx responses and transport failures.
    pub async fn head(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.make_request(HttpMethod::Head, path, None).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for non-2xx responses and transport failures.
    pub async fn delete(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.make_request(HttpMethod::Delete, path, None).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for non-2xx responses and transport failures.
    pub async fn post(&self, path: &str, body: &Value) -> Result<HttpResponse, HttpError> {
        self.make_request(HttpMethod::Post, path, Some(body)).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for non-2xx responses and transport failures.
    pub async fn put(&self, path: &str, body: &Value) -> Result<HttpResponse, HttpError> {
        self.make_request(HttpMethod::Put, path, Some(body)).await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = HttpRequest::builder(method, path)
            .headers(self.config.default_headers().clone())
            .tries(self.config.tries());

        if let Some(body) = body {
            builder = builder.body(body.to_string()).body_type(DataType::Json);
        }

        let request = builder.build()?;
        self.transport.request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::clients::StubTransport;
    use crate::config::SiteUrl;

    fn config() -> ClientConfig {
        ClientConfig::builder()
            .site(SiteUrl::new("https://jira.example.com").unwrap())
            .basic_auth("admin", "admin")
            .tries(3)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_verbs_carry_default_headers_and_tries() {
        let stub = Arc::new(StubTransport::new());
        let client = JiraClient::with_transport(config(), stub.clone());

        client.get("/rest/api/2/serverInfo").await.unwrap();
        client
            .post("/rest/api/2/issue", &json!({"fields": {}}))
            .await
            .unwrap();

        let requests = stub.requests();
        assert_eq!(requests[0].http_method, HttpMethod::Get);
        assert_eq!(requests[0].body, None);
        assert_eq!(requests[0].tries, 3);
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Basic YWRtaW46YWRtaW4=")
        );

        assert_eq!(requests[1].body.as_deref(), Some(r#"{"fields":{}}"#));
        assert_eq!(requests[1].body_type, Some(DataType::Json));
        assert_eq!(
            requests[1].headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_non_2xx_is_an_error() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(404, r#"{"errorMessages":["Not found"]}"#);
        let client = JiraClient::with_transport(config(), stub);

        let error = client.delete("/rest/api/2/issue/1").await.unwrap_err();
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_clones_share_the_cache() {
        let client = JiraClient::with_transport(config(), Arc::new(StubTransport::new()));
        let clone = client.clone();

        clone.cache().populate(
            crate::clients::CacheKey::FIELD_MAP,
            std::collections::BTreeMap::from([("a".to_string(), "b".to_string())]),
        );
        assert!(client.cache().is_populated(crate::clients::CacheKey::FIELD_MAP));
    }
}
