//! # Jira API Rust Client
//!
//! A Rust client for the Jira REST API, built around a generic
//! resource-mapping engine: every resource type (issues, projects, comments,
//! attachments, ...) gets uniform CRUD, URL derivation, relationship
//! traversal and dynamic attribute access from one implementation.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the site URL and context path
//! - An async HTTP transport with retry logic and rate limit handling
//! - A cloneable [`JiraClient`] handle with a per-client side cache
//! - The resource engine in [`rest`] and the resource catalogue in
//!   [`rest::resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use jira_api::{ApiVersion, ClientConfig, SiteUrl};
//!
//! let config = ClientConfig::builder()
//!     .site(SiteUrl::new("https://jira.example.com").unwrap())
//!     .context_path("/jira")
//!     .api_version(ApiVersion::V2)
//!     .basic_auth("admin", "api-token")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.rest_base_path(), "/jira/rest/api/2");
//! ```
//!
//! ## Working With Resources
//!
//! ```rust,ignore
//! use jira_api::{ClientConfig, JiraClient, SiteUrl};
//! use jira_api::rest::resources::{Issue, Project};
//! use serde_json::json;
//!
//! let client = JiraClient::new(config)?;
//!
//! // Collections and single entities
//! let projects = client.resource::<Project>().all().await?;
//! let mut issue = client.resource::<Issue>().find("SAMPLE-1").await?;
//!
//! // Dynamic attributes and relationships
//! println!("{:?}", issue.attr("fields"));
//! for comment in issue.comments()?.iter() {
//!     println!("{}", comment.attr_str("body").unwrap_or_default());
//! }
//!
//! // Updates merge locally once the server accepts them
//! issue.try_save(json!({"fields": {"summary": "Renamed"}})).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Clients and entities are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Declarative resources**: A resource type is a static declaration

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiVersion, ClientConfig, ClientConfigBuilder, ContextPath, SiteUrl};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    CacheKey, ClientCache, DataType, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError, JiraClient,
    MaxHttpRetriesExceededError, ResourceFactory, Transport,
};

// Re-export the engine's entry points
pub use rest::{Resource, ResourceError, ResourceType};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::clients::{JiraClient, StubTransport};
    use crate::config::{ClientConfig, SiteUrl};

    pub fn config() -> ClientConfig {
        ClientConfig::builder()
            .site(SiteUrl::new("https://jira.example.com").unwrap())
            .build()
            .unwrap()
    }

    /// A client whose transport answers every request with an empty 200.
    pub fn client() -> JiraClient {
        client_with(Arc::new(StubTransport::new()))
    }

    pub fn client_with(stub: Arc<StubTransport>) -> JiraClient {
        JiraClient::with_transport(config(), stub)
    }
}
