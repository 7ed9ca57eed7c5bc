//! Saved filter resource.

use crate::rest::errors::ResourceError;
use crate::rest::registry::{Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::User;

const RELATIONSHIPS: &[Relationship] =
    &[Relationship::one_to_one("owner").targeting(ResourceKind::User)];

pub(crate) static SPEC: ResourceSpec =
    ResourceSpec::new("Filter", "filter").relationships(RELATIONSHIPS);

/// Marker for saved JQL filters (`/filter/{id}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Filter;

impl ResourceType for Filter {
    const KIND: ResourceKind = ResourceKind::Filter;
}

impl Resource<Filter> {
    /// The filter owner.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn owner(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("owner")
    }

    /// The filter's JQL.
    #[must_use]
    pub fn jql(&self) -> Option<&str> {
        self.attr_str("jql")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::test_support::client;

    #[test]
    fn test_owner_and_jql() {
        let filter = Resource::<Filter>::build(
            client(),
            json!({
                "id": "10000",
                "jql": "project = SAMPLE",
                "owner": {"accountId": "abc", "displayName": "Ann"}
            }),
        )
        .unwrap();

        assert_eq!(filter.jql(), Some("project = SAMPLE"));
        assert_eq!(filter.owner().unwrap().unwrap().display_name(), Some("Ann"));
        assert_eq!(filter.url(), "/rest/api/2/filter/10000");
    }
}
