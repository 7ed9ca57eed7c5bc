//! Project resource.
//!
//! Projects are addressed by their `key` (`/project/SAMPLE`) rather than
//! their numeric id.

use crate::rest::collection::CollectionProxy;
use crate::rest::errors::ResourceError;
use crate::rest::registry::{Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::{Component, IssueType, User, Version};

const RELATIONSHIPS: &[Relationship] = &[
    Relationship::one_to_one("lead").targeting(ResourceKind::User),
    Relationship::one_to_many("components"),
    Relationship::one_to_many("issuetypes").keyed("issueTypes"),
    Relationship::one_to_many("versions"),
];

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Project", "project")
    .key_attribute("key")
    .relationships(RELATIONSHIPS);

/// Marker for Jira projects (`/project/{key}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Project;

impl ResourceType for Project {
    const KIND: ResourceKind = ResourceKind::Project;
}

impl Resource<Project> {
    /// The project lead.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn lead(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("lead")
    }

    /// Components defined in the project.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn components(&self) -> Result<CollectionProxy<Component>, ResourceError> {
        self.has_many("components")
    }

    /// Issue types available in the project (read from `issueTypes`).
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn issuetypes(&self) -> Result<CollectionProxy<IssueType>, ResourceError> {
        self.has_many("issuetypes")
    }

    /// Versions defined in the project.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn versions(&self) -> Result<CollectionProxy<Version>, ResourceError> {
        self.has_many("versions")
    }
}
