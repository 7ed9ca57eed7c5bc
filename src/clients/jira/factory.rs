//! Typed entry point for one resource type.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::clients::JiraClient;
use crate::rest::{Bindings, FindOptions, ListOptions, Resource, ResourceError, ResourceType};

/// Class-level operations of resource type `T`, bound to a client.
///
/// Obtained from [`JiraClient::resource`].
///
/// # Example
///
/// ```rust,ignore
/// use jira_api::rest::resources::{Issue, Project};
///
/// let projects = client.resource::<Project>().all().await?;
/// let issue = client.resource::<Issue>().find("SAMPLE-1").await?;
/// let draft = client.resource::<Issue>().build(json!({"fields": {}}))?;
/// ```
pub struct ResourceFactory<T: ResourceType> {
    client: JiraClient,
    marker: PhantomData<T>,
}

impl<T: ResourceType> ResourceFactory<T> {
    pub(crate) const fn new(client: JiraClient) -> Self {
        Self {
            client,
            marker: PhantomData,
        }
    }

    /// Lists the collection. See [`Resource::all`].
    ///
    /// # Errors
    ///
    /// See [`Resource::all`].
    pub async fn all(&self) -> Result<Vec<Resource<T>>, ResourceError> {
        Resource::<T>::all(&self.client, &ListOptions::new()).await
    }

    /// Lists the collection with bindings and query parameters.
    ///
    /// # Errors
    ///
    /// See [`Resource::all`].
    pub async fn all_with(&self, options: &ListOptions) -> Result<Vec<Resource<T>>, ResourceError> {
        Resource::<T>::all(&self.client, options).await
    }

    /// Fetches one entity by key. See [`Resource::find`].
    ///
    /// # Errors
    ///
    /// See [`Resource::find`].
    pub async fn find(&self, key: &str) -> Result<Resource<T>, ResourceError> {
        Resource::<T>::find(&self.client, key, &FindOptions::new()).await
    }

    /// Fetches one entity by key with bindings and query parameters.
    ///
    /// # Errors
    ///
    /// See [`Resource::find`].
    pub async fn find_with(
        &self,
        key: &str,
        options: &FindOptions,
    ) -> Result<Resource<T>, ResourceError> {
        Resource::<T>::find(&self.client, key, options).await
    }

    /// Builds an entity locally. See [`Resource::build`].
    ///
    /// # Errors
    ///
    /// See [`Resource::build`].
    pub fn build(&self, attrs: Value) -> Result<Resource<T>, ResourceError> {
        Resource::<T>::build(self.client.clone(), attrs)
    }

    /// Builds a scoped entity locally. See [`Resource::build_with`].
    ///
    /// # Errors
    ///
    /// See [`Resource::build_with`].
    pub fn build_with(
        &self,
        attrs: Value,
        bindings: Bindings,
    ) -> Result<Resource<T>, ResourceError> {
        Resource::<T>::build_with(self.client.clone(), attrs, bindings)
    }
}

impl<T: ResourceType> Clone for ResourceFactory<T> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<T: ResourceType> fmt::Debug for ResourceFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceFactory")
            .field("resource", &T::spec().name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::clients::StubTransport;
    use crate::rest::resources::{Comment, Project};
    use crate::test_support::client_with;

    #[test]
    fn test_factory_delegates_to_resource() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(200, r#"[{"key":"FOO"}]"#);
        stub.respond(200, r#"{"key":"FOO","name":"Foo"}"#);
        let client = client_with(stub.clone());
        let projects = client.resource::<Project>();

        let all = tokio_test::block_on(projects.all()).unwrap();
        assert_eq!(all[0].key_value(), Some("FOO".to_string()));

        let found = tokio_test::block_on(projects.find("FOO")).unwrap();
        assert_eq!(found.attr_str("name"), Some("Foo"));

        let paths: Vec<_> = stub.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/rest/api/2/project", "/rest/api/2/project/FOO"]);
    }

    #[test]
    fn test_factory_build_checks_bindings() {
        let client = client_with(Arc::new(StubTransport::new()));

        assert!(client.resource::<Comment>().build(json!({})).is_err());
        assert!(client
            .resource::<Comment>()
            .build_with(json!({}), crate::rest::Bindings::new().with("issue", "1"))
            .is_ok());
        assert_eq!(
            format!("{:?}", client.resource::<Comment>()),
            "ResourceFactory { resource: \"Comment\", .. }"
        );
    }
}
