use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("StatusCategory", "statuscategory");

/// Marker for status categories (to do, in progress, done).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatusCategory;

impl ResourceType for StatusCategory {
    const KIND: ResourceKind = ResourceKind::StatusCategory;
}
