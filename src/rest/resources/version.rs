//! Project version resource.

use chrono::NaiveDate;

use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Version", "version");

/// Marker for project versions (`/version/{id}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Version;

impl ResourceType for Version {
    const KIND: ResourceKind = ResourceKind::Version;
}

impl Resource<Version> {
    /// Returns `true` once the version has shipped.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.attr("released")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    /// Parses `releaseDate` (`YYYY-MM-DD`).
    #[must_use]
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.attr_str("releaseDate")
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    }
}
