//! Workflow transitions available on an issue.

use crate::rest::errors::ResourceError;
use crate::rest::registry::{Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::Status;

const RELATIONSHIPS: &[Relationship] =
    &[Relationship::one_to_one("to").targeting(ResourceKind::Status)];

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Transition", "transitions")
    .collection_key("transitions")
    .belongs_to(&["issue"])
    .relationships(RELATIONSHIPS);

/// Marker for issue transitions.
///
/// Performing a transition is a POST of `{"transition": {"id": ...}}` to the
/// collection URL, which is what [`Resource::try_save`] sends for a new
/// record:
///
/// ```rust,ignore
/// let mut transition = Resource::<Transition>::build_with(
///     client.clone(),
///     json!({}),
///     Bindings::new().with("issue", &issue),
/// )?;
/// transition.try_save(json!({"transition": {"id": "31"}})).await?;
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Transition;

impl ResourceType for Transition {
    const KIND: ResourceKind = ResourceKind::Transition;
}

impl Resource<Transition> {
    /// The status the transition leads to.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn to(&self) -> Result<Option<Resource<Status>>, ResourceError> {
        self.has_one("to")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use serde_json::json;

    use crate::clients::{HttpMethod, StubTransport};
    use crate::rest::relationships::Bindings;
    use crate::test_support::client_with;

    #[tokio::test]
    async fn test_performing_a_transition_posts_to_collection() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(204, "");

        let mut transition = Resource::<Transition>::build_with(
            client_with(stub.clone()),
            json!({}),
            Bindings::new().with("issue", "SAMPLE-1"),
        )
        .unwrap();
        transition
            .try_save(json!({"transition": {"id": "31"}}))
            .await
            .unwrap();

        let request = &stub.requests()[0];
        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "/rest/api/2/issue/SAMPLE-1/transitions");
    }
}
