//! Attachment resource.

use crate::rest::errors::ResourceError;
use crate::rest::registry::{Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::User;

const RELATIONSHIPS: &[Relationship] =
    &[Relationship::one_to_one("author").targeting(ResourceKind::User)];

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Attachment", "attachments")
    .belongs_to(&["issue"])
    .relationships(RELATIONSHIPS);

/// Marker for files attached to an issue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attachment;

impl ResourceType for Attachment {
    const KIND: ResourceKind = ResourceKind::Attachment;
}

impl Resource<Attachment> {
    /// The uploader.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn author(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("author")
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.attr("size").and_then(serde_json::Value::as_u64)
    }
}
