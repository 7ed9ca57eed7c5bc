//! The resource catalogue.
//!
//! Each module declares one resource type: a zero-sized marker, its static
//! [`ResourceSpec`] and, where the type has relationships, typed accessors
//! on [`Resource`](crate::rest::Resource). [`ResourceKind`] is the registry
//! mapping every marker to its declaration.
//!
//! # Example
//!
//! ```rust,ignore
//! use jira_api::rest::resources::{Comment, Issue, Project};
//!
//! let issue = client.resource::<Issue>().find("SAMPLE-1").await?;
//! for comment in issue.comments()?.iter() {
//!     println!("{}", comment.attr_str("body").unwrap_or_default());
//! }
//!
//! let projects = client.resource::<Project>().all().await?;
//! ```

mod attachment;
mod comment;
mod component;
mod field;
mod filter;
mod issue;
mod issue_link;
mod issue_link_type;
mod issue_type;
mod priority;
mod project;
mod remote_link;
mod resolution;
mod server_info;
mod status;
mod status_category;
mod transition;
mod user;
mod version;
mod watcher;
mod worklog;

use std::fmt;

use crate::rest::registry::ResourceSpec;

pub use attachment::Attachment;
pub use comment::Comment;
pub use component::Component;
pub use field::Field;
pub use filter::Filter;
pub use issue::Issue;
pub use issue_link::IssueLink;
pub use issue_link_type::IssueLinkType;
pub use issue_type::IssueType;
pub use priority::Priority;
pub use project::Project;
pub use remote_link::RemoteLink;
pub use resolution::Resolution;
pub use server_info::ServerInfo;
pub use status::Status;
pub use status_category::StatusCategory;
pub use transition::Transition;
pub use user::User;
pub use version::Version;
pub use watcher::Watcher;
pub use worklog::Worklog;

/// Tags every resource type known to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// Files attached to an issue.
    Attachment,
    /// Comments on an issue.
    Comment,
    /// Project components.
    Component,
    /// System and custom field definitions.
    Field,
    /// Saved JQL filters.
    Filter,
    /// Issues.
    Issue,
    /// Links between two issues.
    IssueLink,
    /// Kinds of issue links (blocks, relates to, ...).
    IssueLinkType,
    /// Issue types.
    IssueType,
    /// Issue priorities.
    Priority,
    /// Projects.
    Project,
    /// Links from an issue to external resources.
    RemoteLink,
    /// Issue resolutions.
    Resolution,
    /// Server version and build information.
    ServerInfo,
    /// Workflow statuses.
    Status,
    /// Status categories (to do, in progress, done).
    StatusCategory,
    /// Workflow transitions available on an issue.
    Transition,
    /// Users.
    User,
    /// Project versions.
    Version,
    /// Users watching an issue.
    Watcher,
    /// Work logged on an issue.
    Worklog,
}

impl ResourceKind {
    /// Every registered kind.
    pub const ALL: [Self; 21] = [
        Self::Attachment,
        Self::Comment,
        Self::Component,
        Self::Field,
        Self::Filter,
        Self::Issue,
        Self::IssueLink,
        Self::IssueLinkType,
        Self::IssueType,
        Self::Priority,
        Self::Project,
        Self::RemoteLink,
        Self::Resolution,
        Self::ServerInfo,
        Self::Status,
        Self::StatusCategory,
        Self::Transition,
        Self::User,
        Self::Version,
        Self::Watcher,
        Self::Worklog,
    ];

    /// Returns the static declaration of this kind.
    #[must_use]
    pub fn spec(self) -> &'static ResourceSpec {
        match self {
            Self::Attachment => &attachment::SPEC,
            Self::Comment => &comment::SPEC,
            Self::Component => &component::SPEC,
            Self::Field => &field::SPEC,
            Self::Filter => &filter::SPEC,
            Self::Issue => &issue::SPEC,
            Self::IssueLink => &issue_link::SPEC,
            Self::IssueLinkType => &issue_link_type::SPEC,
            Self::IssueType => &issue_type::SPEC,
            Self::Priority => &priority::SPEC,
            Self::Project => &project::SPEC,
            Self::RemoteLink => &remote_link::SPEC,
            Self::Resolution => &resolution::SPEC,
            Self::ServerInfo => &server_info::SPEC,
            Self::Status => &status::SPEC,
            Self::StatusCategory => &status_category::SPEC,
            Self::Transition => &transition::SPEC,
            Self::User => &user::SPEC,
            Self::Version => &version::SPEC,
            Self::Watcher => &watcher::SPEC,
            Self::Worklog => &worklog::SPEC,
        }
    }

    /// Returns the type name (e.g. `IssueType`).
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_names_match_kinds() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.name(), format!("{kind:?}"));
        }
    }

    #[test]
    fn test_every_relationship_resolves_a_target() {
        for kind in ResourceKind::ALL {
            for relationship in kind.spec().relationships {
                assert!(
                    relationship.target_kind().is_some(),
                    "{kind}.{} has no target",
                    relationship.name
                );
            }
        }
    }

    #[test]
    fn test_one_to_many_targets_accept_owner_binding() {
        for kind in ResourceKind::ALL {
            let binding = kind.spec().binding_name();
            for relationship in kind.spec().relationships {
                let Some(target) = relationship.target_kind() else {
                    continue;
                };
                for parent in target.spec().belongs_to {
                    assert_eq!(
                        *parent, binding,
                        "{target} requires '{parent}' but is reachable from {kind}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_endpoints_are_unique() {
        let mut endpoints: Vec<_> = ResourceKind::ALL
            .iter()
            .map(|kind| kind.spec().endpoint_name)
            .collect();
        endpoints.sort_unstable();
        endpoints.dedup();
        assert_eq!(endpoints.len(), ResourceKind::ALL.len());
    }
}
