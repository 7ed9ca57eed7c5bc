//! Workflow status resource.

use crate::rest::errors::ResourceError;
use crate::rest::registry::{Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::StatusCategory;

const RELATIONSHIPS: &[Relationship] = &[Relationship::one_to_one("statusCategory")];

pub(crate) static SPEC: ResourceSpec =
    ResourceSpec::new("Status", "status").relationships(RELATIONSHIPS);

/// Marker for workflow statuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Status;

impl ResourceType for Status {
    const KIND: ResourceKind = ResourceKind::Status;
}

impl Resource<Status> {
    /// The category the status belongs to.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn status_category(&self) -> Result<Option<Resource<StatusCategory>>, ResourceError> {
        self.has_one("statusCategory")
    }
}
