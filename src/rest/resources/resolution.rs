use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Resolution", "resolution");

/// Marker for issue resolutions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Resolution;

impl ResourceType for Resolution {
    const KIND: ResourceKind = ResourceKind::Resolution;
}
