//! Remote (web) links from an issue.

use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};

pub(crate) static SPEC: ResourceSpec =
    ResourceSpec::new("RemoteLink", "remotelink").belongs_to(&["issue"]);

/// Marker for remote links (`/issue/{issue}/remotelink/{id}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RemoteLink;

impl ResourceType for RemoteLink {
    const KIND: ResourceKind = ResourceKind::RemoteLink;
}
