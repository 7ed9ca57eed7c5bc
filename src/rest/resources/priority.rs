use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Priority", "priority");

/// Marker for issue priorities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Priority;

impl ResourceType for Priority {
    const KIND: ResourceKind = ResourceKind::Priority;
}
