//! Links between two issues.

use crate::rest::errors::ResourceError;
use crate::rest::registry::{Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::{Issue, IssueLinkType};

const RELATIONSHIPS: &[Relationship] = &[
    Relationship::one_to_one("type").targeting(ResourceKind::IssueLinkType),
    Relationship::one_to_one("inwardIssue").targeting(ResourceKind::Issue),
    Relationship::one_to_one("outwardIssue").targeting(ResourceKind::Issue),
];

pub(crate) static SPEC: ResourceSpec =
    ResourceSpec::new("IssueLink", "issueLink").relationships(RELATIONSHIPS);

/// Marker for issue links (`/issueLink/{id}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IssueLink;

impl ResourceType for IssueLink {
    const KIND: ResourceKind = ResourceKind::IssueLink;
}

impl Resource<IssueLink> {
    /// The kind of link.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn link_type(&self) -> Result<Option<Resource<IssueLinkType>>, ResourceError> {
        self.has_one("type")
    }

    /// The issue on the inward side.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn inward_issue(&self) -> Result<Option<Resource<Issue>>, ResourceError> {
        self.has_one("inwardIssue")
    }

    /// The issue on the outward side.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn outward_issue(&self) -> Result<Option<Resource<Issue>>, ResourceError> {
        self.has_one("outwardIssue")
    }
}
