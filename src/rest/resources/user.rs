//! User resource.
//!
//! Users are identified by `accountId`, which Jira expects as a query
//! parameter (`/user?accountId=...`) rather than a path segment.

use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("User", "user")
    .key_attribute("accountId")
    .key_param("accountId");

/// Marker for Jira users.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct User;

impl ResourceType for User {
    const KIND: ResourceKind = ResourceKind::User;
}

impl Resource<User> {
    /// Returns the `displayName` attribute.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.attr_str("displayName")
    }

    /// Returns the `emailAddress` attribute, when visible.
    #[must_use]
    pub fn email_address(&self) -> Option<&str> {
        self.attr_str("emailAddress")
    }

    /// Returns `false` only when the server reports the account inactive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.attr("active")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true)
    }
}
