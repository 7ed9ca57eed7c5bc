//! Declarative resource metadata.
//!
//! Every resource type is described by a static [`ResourceSpec`]: its
//! endpoint, its key attribute, the parents it must be scoped under and the
//! relationships it exposes. The engine reads these declarations at run
//! time; no resource writes its own CRUD or traversal code.
//!
//! # Example
//!
//! ```rust
//! use jira_api::rest::{NestedPath, Relationship, ResourceKind, ResourceSpec};
//!
//! const RELATIONSHIPS: &[Relationship] = &[
//!     Relationship::one_to_one("author").targeting(ResourceKind::User),
//!     Relationship::one_to_many("replies")
//!         .targeting(ResourceKind::Comment)
//!         .under(NestedPath::Key("thread")),
//! ];
//!
//! static SPEC: ResourceSpec = ResourceSpec::new("Comment", "comment")
//!     .belongs_to(&["issue"])
//!     .relationships(RELATIONSHIPS);
//!
//! assert_eq!(SPEC.key_attribute, "id");
//! assert!(SPEC.relationship("author").is_some());
//! ```

use std::fmt;

pub use crate::rest::resources::ResourceKind;

/// Implemented by the zero-sized marker types naming each resource.
///
/// The marker ties a [`Resource`](crate::rest::Resource) to its registry
/// entry at compile time; all behavior comes from the declaration.
pub trait ResourceType: fmt::Debug + Clone + Copy + Send + Sync + 'static {
    /// The registry entry for this type.
    const KIND: ResourceKind;

    /// Returns the static declaration for this type.
    #[must_use]
    fn spec() -> &'static ResourceSpec {
        Self::KIND.spec()
    }
}

/// Whether a relationship yields one entity or a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// A single nested object.
    OneToOne,
    /// An array of nested objects.
    OneToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneToOne => f.write_str("one-to-one"),
            Self::OneToMany => f.write_str("one-to-many"),
        }
    }
}

/// Where a relationship's JSON lives inside the owner's attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NestedPath {
    /// Directly in the top-level object.
    #[default]
    TopLevel,
    /// Inside a single object-valued key (e.g. `fields`).
    Key(&'static str),
    /// Inside a chain of object-valued keys (e.g. `fields` then `comment`).
    Path(&'static [&'static str]),
}

impl NestedPath {
    /// Returns the keys to traverse, outermost first.
    #[must_use]
    pub fn keys(&self) -> &[&'static str] {
        match self {
            Self::TopLevel => &[],
            Self::Key(key) => std::slice::from_ref(key),
            Self::Path(keys) => keys,
        }
    }
}

/// A declared association from one resource type to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relationship {
    /// The accessor name.
    pub name: &'static str,
    /// One entity or a collection.
    pub cardinality: Cardinality,
    /// The target type; inferred from `name` when `None`.
    pub target: Option<ResourceKind>,
    /// The JSON key holding the data; defaults to `name`.
    pub attribute_key: Option<&'static str>,
    /// The sub-tree the attribute key lives in.
    pub nested_under: NestedPath,
}

impl Relationship {
    const fn declare(name: &'static str, cardinality: Cardinality) -> Self {
        Self {
            name,
            cardinality,
            target: None,
            attribute_key: None,
            nested_under: NestedPath::TopLevel,
        }
    }

    /// Declares a one-to-one relationship.
    #[must_use]
    pub const fn one_to_one(name: &'static str) -> Self {
        Self::declare(name, Cardinality::OneToOne)
    }

    /// Declares a one-to-many relationship.
    #[must_use]
    pub const fn one_to_many(name: &'static str) -> Self {
        Self::declare(name, Cardinality::OneToMany)
    }

    /// Sets the target type explicitly.
    #[must_use]
    pub const fn targeting(mut self, kind: ResourceKind) -> Self {
        self.target = Some(kind);
        self
    }

    /// Reads the data from `key` instead of the relationship name.
    #[must_use]
    pub const fn keyed(mut self, key: &'static str) -> Self {
        self.attribute_key = Some(key);
        self
    }

    /// Looks for the data below `path` instead of the top level.
    #[must_use]
    pub const fn under(mut self, path: NestedPath) -> Self {
        self.nested_under = path;
        self
    }

    /// Returns the JSON key holding the relationship's data.
    #[must_use]
    pub fn attribute_key(&self) -> &'static str {
        self.attribute_key.unwrap_or(self.name)
    }

    /// Returns the declared or inferred target type.
    #[must_use]
    pub fn target_kind(&self) -> Option<ResourceKind> {
        self.target.or_else(|| infer_target(self.name))
    }
}

/// The static declaration of one resource type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceSpec {
    /// The type name used in logs and errors (e.g. `IssueType`).
    pub name: &'static str,
    /// The path segment of the collection (e.g. `issuetype`).
    pub endpoint_name: &'static str,
    /// The attribute that identifies an instance. Defaults to `id`.
    pub key_attribute: &'static str,
    /// When set, singular URLs pass the key as this query parameter
    /// instead of a path segment.
    pub key_param: Option<&'static str>,
    /// The key wrapping the array in collection responses, if any.
    pub collection_key: Option<&'static str>,
    /// Parents this type is scoped under, in URL order.
    pub belongs_to: &'static [&'static str],
    /// Declared associations.
    pub relationships: &'static [Relationship],
}

impl ResourceSpec {
    /// Starts a declaration with the given name and endpoint.
    #[must_use]
    pub const fn new(name: &'static str, endpoint_name: &'static str) -> Self {
        Self {
            name,
            endpoint_name,
            key_attribute: "id",
            key_param: None,
            collection_key: None,
            belongs_to: &[],
            relationships: &[],
        }
    }

    /// Overrides the key attribute.
    #[must_use]
    pub const fn key_attribute(mut self, key: &'static str) -> Self {
        self.key_attribute = key;
        self
    }

    /// Addresses single instances as `<collection>?<param>=<key>`.
    #[must_use]
    pub const fn key_param(mut self, param: &'static str) -> Self {
        self.key_param = Some(param);
        self
    }

    /// Declares that collection responses wrap their array under `key`.
    #[must_use]
    pub const fn collection_key(mut self, key: &'static str) -> Self {
        self.collection_key = Some(key);
        self
    }

    /// Declares the required parents.
    #[must_use]
    pub const fn belongs_to(mut self, parents: &'static [&'static str]) -> Self {
        self.belongs_to = parents;
        self
    }

    /// Declares the relationships.
    #[must_use]
    pub const fn relationships(mut self, relationships: &'static [Relationship]) -> Self {
        self.relationships = relationships;
        self
    }

    /// Finds a relationship by accessor name.
    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&'static Relationship> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// The binding name children of this type receive (e.g. `issue`).
    #[must_use]
    pub fn binding_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Resolves a relationship name to a resource type.
///
/// Tries the name itself, then its singular forms (`-ies` to `-y`, then a
/// trailing `s` or `es` dropped), matching type names case-insensitively.
#[must_use]
pub fn infer_target(name: &str) -> Option<ResourceKind> {
    let lowered = name.to_lowercase();
    let mut candidates = vec![lowered.clone()];
    if let Some(stem) = lowered.strip_suffix("ies") {
        candidates.push(format!("{stem}y"));
    }
    if let Some(stem) = lowered.strip_suffix('s') {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = lowered.strip_suffix("es") {
        candidates.push(stem.to_string());
    }

    candidates.iter().find_map(|candidate| {
        ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_path_keys() {
        assert!(NestedPath::TopLevel.keys().is_empty());
        assert_eq!(NestedPath::Key("fields").keys(), &["fields"]);
        assert_eq!(
            NestedPath::Path(&["fields", "comment"]).keys(),
            &["fields", "comment"]
        );
    }

    #[test]
    fn test_relationship_defaults() {
        let rel = Relationship::one_to_many("comments");
        assert_eq!(rel.attribute_key(), "comments");
        assert_eq!(rel.nested_under, NestedPath::TopLevel);
        assert_eq!(rel.target_kind(), Some(ResourceKind::Comment));
    }

    #[test]
    fn test_relationship_builders() {
        let rel = Relationship::one_to_many("watchers")
            .keyed("watches")
            .under(NestedPath::Key("fields"))
            .targeting(ResourceKind::Watcher);

        assert_eq!(rel.attribute_key(), "watches");
        assert_eq!(rel.nested_under.keys(), &["fields"]);
        assert_eq!(rel.cardinality, Cardinality::OneToMany);
    }

    #[test]
    fn test_infer_target_from_names() {
        assert_eq!(infer_target("comments"), Some(ResourceKind::Comment));
        assert_eq!(infer_target("issuetypes"), Some(ResourceKind::IssueType));
        assert_eq!(infer_target("status"), Some(ResourceKind::Status));
        assert_eq!(infer_target("priority"), Some(ResourceKind::Priority));
        assert_eq!(infer_target("priorities"), Some(ResourceKind::Priority));
        assert_eq!(infer_target("statusCategory"), Some(ResourceKind::StatusCategory));
        assert_eq!(infer_target("reporter"), None);
    }

    #[test]
    fn test_infer_target_strips_es_plural() {
        assert_eq!(infer_target("statuses"), Some(ResourceKind::Status));
        assert_eq!(infer_target("resolutions"), Some(ResourceKind::Resolution));
        assert_eq!(infer_target("statusCategories"), Some(ResourceKind::StatusCategory));
        assert_eq!(infer_target("watches"), None);
    }

    #[test]
    fn test_spec_defaults_and_overrides() {
        let spec = ResourceSpec::new("Project", "project").key_attribute("key");
        assert_eq!(spec.key_attribute, "key");
        assert!(spec.belongs_to.is_empty());
        assert!(spec.collection_key.is_none());
        assert_eq!(spec.binding_name(), "project");
    }

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::OneToMany.to_string(), "one-to-many");
    }
}
