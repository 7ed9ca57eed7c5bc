//! Project component resource.

use crate::rest::errors::ResourceError;
use crate::rest::registry::{Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::User;

const RELATIONSHIPS: &[Relationship] =
    &[Relationship::one_to_one("lead").targeting(ResourceKind::User)];

pub(crate) static SPEC: ResourceSpec =
    ResourceSpec::new("Component", "component").relationships(RELATIONSHIPS);

/// Marker for project components (`/component/{id}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Component;

impl ResourceType for Component {
    const KIND: ResourceKind = ResourceKind::Component;
}

impl Resource<Component> {
    /// The component lead.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn lead(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("lead")
    }
}
