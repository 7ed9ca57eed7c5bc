//! Worklog resource, scoped under an issue.

use crate::rest::errors::ResourceError;
use crate::rest::registry::{Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::User;

const RELATIONSHIPS: &[Relationship] = &[
    Relationship::one_to_one("author").targeting(ResourceKind::User),
    Relationship::one_to_one("updateAuthor").targeting(ResourceKind::User),
];

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Worklog", "worklog")
    .collection_key("worklogs")
    .belongs_to(&["issue"])
    .relationships(RELATIONSHIPS);

/// Marker for work logged on an issue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Worklog;

impl ResourceType for Worklog {
    const KIND: ResourceKind = ResourceKind::Worklog;
}

impl Resource<Worklog> {
    /// The user who logged the work.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn author(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("author")
    }

    /// The user who last edited the entry.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn update_author(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("updateAuthor")
    }

    /// Logged time in seconds.
    #[must_use]
    pub fn time_spent_seconds(&self) -> Option<u64> {
        self.attr("timeSpentSeconds").and_then(serde_json::Value::as_u64)
    }
}
