use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};

pub(crate) static SPEC: ResourceSpec =
    ResourceSpec::new("IssueLinkType", "issueLinkType").collection_key("issueLinkTypes");

/// Marker for issue link types (`/issueLinkType/{id}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IssueLinkType;

impl ResourceType for IssueLinkType {
    const KIND: ResourceKind = ResourceKind::IssueLinkType;
}
