use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("IssueType", "issuetype");

/// Marker for issue types (`/issuetype/{id}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IssueType;

impl ResourceType for IssueType {
    const KIND: ResourceKind = ResourceKind::IssueType;
}

impl Resource<IssueType> {
    /// Returns `true` for sub-task types.
    #[must_use]
    pub fn is_subtask(&self) -> bool {
        self.attr("subtask")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}
