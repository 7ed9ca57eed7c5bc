//! Issue resource.
//!
//! Issues keep almost everything under `fields`; the relationships below
//! reach into that object (and into `fields.comment` / `fields.worklog`,
//! which wrap their arrays in a paging envelope).
//!
//! # Example
//!
//! ```rust,ignore
//! use jira_api::rest::resources::Issue;
//!
//! let issue = client.resource::<Issue>().find("SAMPLE-1").await?;
//!
//! if let Some(reporter) = issue.reporter()? {
//!     println!("Reported by {}", reporter.attr_str("displayName").unwrap_or_default());
//! }
//! println!("{} comments", issue.comments()?.len());
//!
//! // Custom fields by display name, once the field map is loaded
//! Resource::<Field>::map_fields(&client).await?;
//! println!("{:?}", issue.field("Story Points"));
//! ```

use serde_json::{Map, Value};

use crate::clients::CacheKey;
use crate::rest::collection::CollectionProxy;
use crate::rest::errors::ResourceError;
use crate::rest::params::ListOptions;
use crate::rest::registry::{NestedPath, Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;
use crate::rest::resources::{
    Attachment, Comment, Component, Field, IssueLink, IssueType, Priority, Project, Resolution,
    Status, Transition, User, Version, Watcher, Worklog,
};

const FIELDS: NestedPath = NestedPath::Key("fields");

const RELATIONSHIPS: &[Relationship] = &[
    Relationship::one_to_one("reporter")
        .targeting(ResourceKind::User)
        .under(FIELDS),
    Relationship::one_to_one("assignee")
        .targeting(ResourceKind::User)
        .under(FIELDS),
    Relationship::one_to_one("project").under(FIELDS),
    Relationship::one_to_one("issuetype").under(FIELDS),
    Relationship::one_to_one("priority").under(FIELDS),
    Relationship::one_to_one("status").under(FIELDS),
    Relationship::one_to_one("resolution").under(FIELDS),
    Relationship::one_to_many("components").under(FIELDS),
    Relationship::one_to_many("versions").under(FIELDS),
    Relationship::one_to_many("fixVersions")
        .targeting(ResourceKind::Version)
        .under(FIELDS),
    Relationship::one_to_many("attachments")
        .keyed("attachment")
        .under(FIELDS),
    Relationship::one_to_many("issuelinks").under(FIELDS),
    Relationship::one_to_many("subtasks")
        .targeting(ResourceKind::Issue)
        .under(FIELDS),
    Relationship::one_to_many("comments").under(NestedPath::Path(&["fields", "comment"])),
    Relationship::one_to_many("worklogs").under(NestedPath::Path(&["fields", "worklog"])),
    Relationship::one_to_many("watchers")
        .keyed("watches")
        .under(NestedPath::Path(&["fields", "watches"])),
];

pub(crate) static SPEC: ResourceSpec =
    ResourceSpec::new("Issue", "issue").relationships(RELATIONSHIPS);

/// Marker for Jira issues (`/issue/{idOrKey}`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Issue;

impl ResourceType for Issue {
    const KIND: ResourceKind = ResourceKind::Issue;
}

impl Resource<Issue> {
    /// Returns the `fields` object.
    #[must_use]
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.attr("fields").and_then(Value::as_object)
    }

    /// Returns a field by id or by mapped name.
    ///
    /// `name` is tried as a field id first, then through the client's field
    /// map (see `Resource::<Field>::map_fields`) both as given and in its
    /// safe form.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        let fields = self.fields()?;
        if let Some(value) = fields.get(name) {
            return Some(value);
        }

        let cache = self.client().cache();
        cache
            .lookup(CacheKey::FIELD_MAP, name)
            .or_else(|| cache.lookup(CacheKey::FIELD_MAP, &Resource::<Field>::safe_name(name)))
            .and_then(|id| fields.get(&id))
    }

    /// Lists the transitions currently available on this issue.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Resource::all`].
    pub async fn transitions(&self) -> Result<Vec<Resource<Transition>>, ResourceError> {
        let options = ListOptions::new().bind(SPEC.binding_name(), self);
        Resource::<Transition>::all(self.client(), &options).await
    }

    /// The user who reported the issue.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn reporter(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("reporter")
    }

    /// The user the issue is assigned to.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn assignee(&self) -> Result<Option<Resource<User>>, ResourceError> {
        self.has_one("assignee")
    }

    /// The owning project.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn project(&self) -> Result<Option<Resource<Project>>, ResourceError> {
        self.has_one("project")
    }

    /// The issue type.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn issuetype(&self) -> Result<Option<Resource<IssueType>>, ResourceError> {
        self.has_one("issuetype")
    }

    /// The priority.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn priority(&self) -> Result<Option<Resource<Priority>>, ResourceError> {
        self.has_one("priority")
    }

    /// The workflow status.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn status(&self) -> Result<Option<Resource<Status>>, ResourceError> {
        self.has_one("status")
    }

    /// The resolution, once resolved.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_one`].
    pub fn resolution(&self) -> Result<Option<Resource<Resolution>>, ResourceError> {
        self.has_one("resolution")
    }

    /// Components the issue belongs to.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn components(&self) -> Result<CollectionProxy<Component>, ResourceError> {
        self.has_many("components")
    }

    /// Affected versions.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn versions(&self) -> Result<CollectionProxy<Version>, ResourceError> {
        self.has_many("versions")
    }

    /// Fix versions.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn fix_versions(&self) -> Result<CollectionProxy<Version>, ResourceError> {
        self.has_many("fixVersions")
    }

    /// Attachments.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn attachments(&self) -> Result<CollectionProxy<Attachment>, ResourceError> {
        self.has_many("attachments")
    }

    /// Links to other issues.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn issuelinks(&self) -> Result<CollectionProxy<IssueLink>, ResourceError> {
        self.has_many("issuelinks")
    }

    /// Sub-tasks.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn subtasks(&self) -> Result<CollectionProxy<Issue>, ResourceError> {
        self.has_many("subtasks")
    }

    /// Comments embedded in the issue.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn comments(&self) -> Result<CollectionProxy<Comment>, ResourceError> {
        self.has_many("comments")
    }

    /// Worklogs embedded in the issue.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn worklogs(&self) -> Result<CollectionProxy<Worklog>, ResourceError> {
        self.has_many("worklogs")
    }

    /// Watchers embedded in the issue.
    ///
    /// # Errors
    ///
    /// See [`Resource::has_many`].
    pub fn watchers(&self) -> Result<CollectionProxy<Watcher>, ResourceError> {
        self.has_many("watchers")
    }
}
