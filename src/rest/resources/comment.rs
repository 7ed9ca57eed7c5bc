//! Comment resource, scoped under an issue.

use crate::rest::errors::ResourceError;
use crate::rest::registry::{Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::User;

const RELATIONSHIPS: &[Relationship] = &[
    Relationship::one_to_one("author").targeting(ResourceKind::User),
    Relationship::one_to_one("updateAuthor").targeting(ResourceKind::User),
];

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Comment", "comment")
    .collection_key("comments")
    .belongs_to(&["issue"])
    .relationships(RELATIONSHIPS);

/// Marker for issue comments (`/issue/{issue}/comment/{id}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Comment;

impl ResourceType for Comment {
    const KIND: ResourceKind = ResourceKind::Comment;
}

impl Resource<Comment> {
    /// The user who wrote the comment.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn author(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("author")
    }

    /// The user who last edited the comment.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn update_author(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("updateAuthor")
    }
}
