//! Server information.

use serde_json::json;

use crate::clients::JiraClient;
use crate::rest::errors::ResourceError;
use crate::rest::params::FindParams;
use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("ServerInfo", "serverInfo");

/// Marker for `/serverInfo`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ServerInfo;

impl ResourceType for ServerInfo {
    const KIND: ResourceKind = ResourceKind::ServerInfo;
}

impl Resource<ServerInfo> {
    /// Fetches the server information.
    ///
    /// `/serverInfo` has no key, so the keyless entity resolves to the
    /// collection path and a single fetch fills it in.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Resource::fetch`].
    pub async fn get(client: &JiraClient) -> Result<Self, ResourceError> {
        let mut info = Self::build(client.clone(), json!({}))?;
        info.fetch(true, &FindParams::default()).await?;
        Ok(info)
    }

    /// The server version, e.g. `1001.0.0-SNAPSHOT`.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.attr_str("version")
    }

    /// The base URL the server reports for itself.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.attr_str("baseUrl")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clients::StubTransport;
    use crate::test_support::client_with;

    #[tokio::test]
    async fn test_get_fetches_singleton() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(
            200,
            r#"{"baseUrl":"https://jira.example.com","version":"9.12.1","deploymentType":"Server"}"#,
        );

        let info = Resource::<ServerInfo>::get(&client_with(stub.clone()))
            .await
            .unwrap();

        assert!(info.is_expanded());
        assert_eq!(info.version(), Some("9.12.1"));
        assert_eq!(info.base_url(), Some("https://jira.example.com"));
        assert_eq!(stub.requests()[0].path, "/rest/api/2/serverInfo");
    }
}
