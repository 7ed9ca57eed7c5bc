//! Watchers of an issue.
//!
//! The watcher list lives at a single URL per issue. Individual watchers
//! are users; read them from an issue's `watchers()` or list them with
//! `Resource::<Watcher>::all`.

use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Watcher", "watchers")
    .collection_key("watchers")
    .belongs_to(&["issue"]);

/// Marker for users watching an issue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Watcher;

impl ResourceType for Watcher {
    const KIND: ResourceKind = ResourceKind::Watcher;
}
