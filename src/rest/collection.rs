//! Collections produced by one-to-many relationships.

use std::ops::Deref;

use serde_json::Value;

use crate::clients::JiraClient;
use crate::rest::errors::ResourceError;
use crate::rest::params::ListOptions;
use crate::rest::registry::ResourceType;
use crate::rest::relationships::Bindings;
use crate::rest::resource::Resource;

/// One snapshot of a one-to-many relationship.
///
/// Derefs to a slice of members, so indexing, `len()` and iteration work
/// as on a `Vec`. [`build`](Self::build) appends locally;
/// [`all`](Self::all) asks the server for a fresh list without touching
/// the snapshot.
///
/// # Example
///
/// ```rust,ignore
/// let mut comments = issue.comments()?;
/// println!("{} comments", comments.len());
///
/// let draft = comments.build(json!({"body": "Looks good"}))?;
/// draft.try_save(json!({"body": "Looks good"})).await?;
///
/// let fresh = comments.all().await?;
/// ```
#[derive(Clone, Debug)]
pub struct CollectionProxy<U: ResourceType> {
    client: JiraClient,
    bindings: Bindings,
    members: Vec<Resource<U>>,
}

impl<U: ResourceType> CollectionProxy<U> {
    pub(crate) fn new(client: JiraClient, bindings: Bindings, members: Vec<Resource<U>>) -> Self {
        Self {
            client,
            bindings,
            members,
        }
    }

    /// Returns the bindings every member receives.
    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Builds a new member scoped to the owner and appends it.
    ///
    /// No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAttributes`] if `attrs` is not an
    /// object, or [`ResourceError::MissingBelongsTo`] if `U` is scoped under
    /// a parent this collection does not bind.
    pub fn build(&mut self, attrs: Value) -> Result<&mut Resource<U>, ResourceError> {
        let member = Resource::<U>::build_with(self.client.clone(), attrs, self.bindings.clone())?;
        let index = self.members.len();
        self.members.push(member);
        Ok(&mut self.members[index])
    }

    /// Fetches the full relationship from the server.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Resource::all`].
    pub async fn all(&self) -> Result<Vec<Resource<U>>, ResourceError> {
        let options = ListOptions {
            bindings: self.bindings.clone(),
            ..ListOptions::default()
        };
        Resource::<U>::all(&self.client, &options).await
    }

    /// Returns the members as a slice.
    #[must_use]
    pub fn members(&self) -> &[Resource<U>] {
        &self.members
    }

    /// Consumes the proxy, returning its members.
    #[must_use]
    pub fn into_members(self) -> Vec<Resource<U>> {
        self.members
    }
}

impl<U: ResourceType> Deref for CollectionProxy<U> {
    type Target = [Resource<U>];

    fn deref(&self) -> &Self::Target {
        &self.members
    }
}

impl<U: ResourceType> IntoIterator for CollectionProxy<U> {
    type Item = Resource<U>;
    type IntoIter = std::vec::IntoIter<Resource<U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, U: ResourceType> IntoIterator for &'a CollectionProxy<U> {
    type Item = &'a Resource<U>;
    type IntoIter = std::slice::Iter<'a, Resource<U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use serde_json::json;

    use crate::clients::StubTransport;
    use crate::rest::resources::{Comment, Issue};
    use crate::test_support::{client, client_with};

    fn issue_with_comments(client: JiraClient) -> Resource<Issue> {
        Resource::<Issue>::build(
            client,
            json!({"id": "10002", "fields": {"comment": {"comments": [{"id": "1"}]}}}),
        )
        .unwrap()
    }

    #[test]
    fn test_build_appends_without_network() {
        let stub = Arc::new(StubTransport::new());
        let issue = issue_with_comments(client_with(stub.clone()));
        let mut comments = issue.has_many::<Comment>("comments").unwrap();

        let draft = comments.build(json!({"body": "New"})).unwrap();
        assert!(draft.is_new_record());
        assert_eq!(draft.url(), "/rest/api/2/issue/10002/comment");

        assert_eq!(comments.len(), 2);
        assert_eq!(stub.request_count(), 0);
    }

    #[test]
    fn test_build_rejects_non_object() {
        let issue = issue_with_comments(client());
        let mut comments = issue.has_many::<Comment>("comments").unwrap();

        assert!(matches!(
            comments.build(json!("text")),
            Err(ResourceError::InvalidAttributes { .. })
        ));
        assert_eq!(comments.len(), 1);
    }

    #[tokio::test]
    async fn test_all_fetches_fresh_list_and_keeps_snapshot() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(
            200,
            r#"{"startAt":0,"total":2,"comments":[{"id":"1"},{"id":"2"}]}"#,
        );
        let issue = issue_with_comments(client_with(stub.clone()));
        let comments = issue.has_many::<Comment>("comments").unwrap();

        let fresh = comments.all().await.unwrap();

        assert_eq!(fresh.len(), 2);
        assert_eq!(comments.len(), 1);
        assert_eq!(stub.requests()[0].path, "/rest/api/2/issue/10002/comment");
    }

    #[test]
    fn test_iterates_members() {
        let issue = issue_with_comments(client());
        let comments = issue.has_many::<Comment>("comments").unwrap();

        let ids: Vec<_> = comments.iter().filter_map(Resource::id).collect();
        assert_eq!(ids, vec!["1".to_string()]);
        assert_eq!((&comments).into_iter().count(), 1);
        assert_eq!(comments.into_members().len(), 1);
    }
}
