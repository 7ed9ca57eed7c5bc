//! Parent bindings and relationship traversal.
//!
//! A resource scoped under another (a comment under an issue) carries a
//! [`Binding`] per declared parent. Bindings feed the URL prefix and are
//! checked when the resource is constructed.
//!
//! Traversal reads the owner's attributes through the declaration found in
//! the registry: [`Resource::has_one`] wraps a single nested object,
//! [`Resource::has_many`] wraps an array in a [`CollectionProxy`] whose
//! members are bound back to the owner.

use std::sync::Arc;

use serde_json::Value;

use crate::rest::attributes::{scalar_string, AttributeStore};
use crate::rest::collection::CollectionProxy;
use crate::rest::errors::{json_type_name, ResourceError};
use crate::rest::path::belongs_to_prefix;
use crate::rest::registry::{Cardinality, Relationship, ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;

/// The parent a resource is scoped under.
#[derive(Clone, Debug, PartialEq)]
pub enum Parent {
    /// A live parent entity (snapshot of its attributes).
    Resource {
        /// The parent's type.
        kind: ResourceKind,
        /// The parent's attributes at binding time.
        attributes: Arc<AttributeStore>,
    },
    /// A raw key value.
    Key(String),
}

impl Parent {
    /// Binds by raw key.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Binds to a live entity.
    #[must_use]
    pub fn of<U: ResourceType>(resource: &Resource<U>) -> Self {
        Self::Resource {
            kind: U::KIND,
            attributes: Arc::new(resource.attributes().clone()),
        }
    }

    /// Returns the parent's key value as used in URLs.
    #[must_use]
    pub fn key_value(&self) -> Option<String> {
        match self {
            Self::Key(key) => Some(key.clone()),
            Self::Resource { kind, attributes } => attributes
                .get(kind.spec().key_attribute)
                .and_then(scalar_string),
        }
    }

    /// Returns the parent's type when bound to an entity.
    #[must_use]
    pub const fn kind(&self) -> Option<ResourceKind> {
        match self {
            Self::Resource { kind, .. } => Some(*kind),
            Self::Key(_) => None,
        }
    }

    /// Returns the parent's attribute snapshot when bound to an entity.
    #[must_use]
    pub fn attributes(&self) -> Option<&AttributeStore> {
        match self {
            Self::Resource { attributes, .. } => Some(attributes),
            Self::Key(_) => None,
        }
    }
}

impl From<&str> for Parent {
    fn from(key: &str) -> Self {
        Self::key(key)
    }
}

impl From<String> for Parent {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl<U: ResourceType> From<&Resource<U>> for Parent {
    fn from(resource: &Resource<U>) -> Self {
        Self::of(resource)
    }
}

/// A named parent binding.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    /// The belongs-to name (e.g. `issue`).
    pub name: String,
    /// The bound parent.
    pub parent: Parent,
}

/// The ordered set of parent bindings of one resource.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings(Vec<Binding>);

impl Bindings {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a binding.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, parent: impl Into<Parent>) -> Self {
        self.insert(name, parent);
        self
    }

    /// Adds or replaces a binding in place.
    pub fn insert(&mut self, name: impl Into<String>, parent: impl Into<Parent>) {
        let name = name.into();
        let parent = parent.into();
        match self.0.iter_mut().find(|binding| binding.name == name) {
            Some(binding) => binding.parent = parent,
            None => self.0.push(Binding { name, parent }),
        }
    }

    /// Returns the parent bound under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parent> {
        self.0
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| &binding.parent)
    }

    /// Iterates over the bindings in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.0.iter()
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fails unless every parent declared by `spec` is bound.
    pub(crate) fn check(&self, spec: &ResourceSpec) -> Result<(), ResourceError> {
        match spec.belongs_to.iter().find(|name| self.get(name).is_none()) {
            Some(relation) => Err(ResourceError::MissingBelongsTo {
                resource: spec.name,
                relation: *relation,
            }),
            None => Ok(()),
        }
    }

    /// Builds the URL prefix from the parents declared by `spec`.
    pub(crate) fn prefix(&self, spec: &ResourceSpec) -> String {
        let keys: Vec<(&str, String)> = spec
            .belongs_to
            .iter()
            .map(|name| {
                let key = self
                    .get(name)
                    .and_then(Parent::key_value)
                    .unwrap_or_default();
                if key.is_empty() {
                    tracing::warn!(
                        resource = spec.name,
                        relation = *name,
                        "Parent has no key value; URL will contain an empty segment"
                    );
                }
                (*name, key)
            })
            .collect();

        belongs_to_prefix(keys.iter().map(|(name, key)| (*name, key.as_str())))
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: ResourceType> Resource<T> {
    /// Wraps the object stored under a one-to-one relationship.
    ///
    /// Returns `Ok(None)` when the attribute (or any step of its nested
    /// path) is absent or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownRelationship`] for an undeclared name,
    /// [`ResourceError::RelationshipMismatch`] when the declaration is not a
    /// one-to-one targeting `U`, and [`ResourceError::InvalidAttributes`]
    /// when the stored value is not an object.
    pub fn has_one<U: ResourceType>(
        &self,
        name: &str,
    ) -> Result<Option<Resource<U>>, ResourceError> {
        let relationship = self.declared(name, Cardinality::OneToOne, U::KIND)?;

        match self.lookup(relationship) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Resource::<U>::build_with(
                self.client().clone(),
                value.clone(),
                self.child_bindings(),
            )
            .map(Some),
        }
    }

    /// Wraps the array stored under a one-to-many relationship.
    ///
    /// An absent attribute yields an empty collection. Every member is bound
    /// to this entity under its lowercased type name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownRelationship`] for an undeclared name,
    /// [`ResourceError::RelationshipMismatch`] when the declaration is not a
    /// one-to-many targeting `U`, and [`ResourceError::InvalidAttributes`]
    /// when the stored value or one of its items has the wrong shape.
    pub fn has_many<U: ResourceType>(
        &self,
        name: &str,
    ) -> Result<CollectionProxy<U>, ResourceError> {
        let relationship = self.declared(name, Cardinality::OneToMany, U::KIND)?;
        let bindings = self.child_bindings();

        let members = match self.lookup(relationship) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    Resource::<U>::build_with(self.client().clone(), item.clone(), bindings.clone())
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(ResourceError::InvalidAttributes {
                    resource: U::spec().name,
                    found: json_type_name(other),
                })
            }
        };

        Ok(CollectionProxy::new(self.client().clone(), bindings, members))
    }

    fn declared(
        &self,
        name: &str,
        cardinality: Cardinality,
        target: ResourceKind,
    ) -> Result<&'static Relationship, ResourceError> {
        let spec = T::spec();
        let relationship = spec
            .relationship(name)
            .ok_or_else(|| ResourceError::UnknownRelationship {
                resource: spec.name,
                name: name.to_string(),
            })?;
        let declared_target = relationship
            .target_kind()
            .ok_or_else(|| ResourceError::UnresolvedTarget {
                resource: spec.name,
                name: name.to_string(),
            })?;

        if relationship.cardinality != cardinality || declared_target != target {
            return Err(ResourceError::RelationshipMismatch {
                resource: spec.name,
                name: name.to_string(),
                declared: format!("{} {}", relationship.cardinality, declared_target.name()),
                requested: format!("{cardinality} {}", target.name()),
            });
        }

        Ok(relationship)
    }

    fn lookup(&self, relationship: &Relationship) -> Option<&Value> {
        self.attributes()
            .lookup(relationship.nested_under.keys(), relationship.attribute_key())
    }

    fn child_bindings(&self) -> Bindings {
        Bindings::new().with(T::spec().binding_name(), Parent::of(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::rest::resources::{Comment, Issue, Project, User};
    use crate::test_support::client;

    #[test]
    fn test_bindings_replace_same_name() {
        let bindings = Bindings::new()
            .with("issue", "1")
            .with("issue", Parent::key("2"));

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.get("issue"), Some(&Parent::key("2")));
    }

    #[test]
    fn test_parent_key_value_uses_key_attribute() {
        let project = Resource::<Project>::build(client(), json!({"key": "ABC", "id": "10000"}))
            .unwrap();
        assert_eq!(Parent::of(&project).key_value(), Some("ABC".to_string()));
        assert_eq!(Parent::of(&project).kind(), Some(ResourceKind::Project));

        let issue = Resource::<Issue>::build(client(), json!({"id": 10002})).unwrap();
        assert_eq!(Parent::from(&issue).key_value(), Some("10002".to_string()));
    }

    #[test]
    fn test_check_reports_first_missing_parent() {
        let result = Bindings::new().check(Comment::spec());
        assert!(matches!(
            result,
            Err(ResourceError::MissingBelongsTo { resource: "Comment", relation: "issue" })
        ));
        assert!(Bindings::new().with("issue", "1").check(Comment::spec()).is_ok());
    }

    #[test]
    fn test_prefix_follows_declarations() {
        let bindings = Bindings::new().with("unrelated", "x").with("issue", "10002");
        assert_eq!(bindings.prefix(Comment::spec()), "/issue/10002/");
        assert_eq!(bindings.prefix(Issue::spec()), "/");
    }

    #[test]
    fn test_prefix_tolerates_parent_without_key() {
        let issue = Resource::<Issue>::build(client(), json!({"fields": {}})).unwrap();
        let bindings = Bindings::new().with("issue", &issue);
        assert_eq!(bindings.prefix(Comment::spec()), "/issue//");
    }

    #[test]
    fn test_has_one_wraps_nested_object() {
        let issue = Resource::<Issue>::build(
            client(),
            json!({"id": "1", "fields": {"reporter": {"accountId": "abc", "displayName": "Ann"}}}),
        )
        .unwrap();

        let reporter = issue.has_one::<User>("reporter").unwrap().unwrap();
        assert_eq!(reporter.attr_str("displayName"), Some("Ann"));
        assert!(!reporter.is_expanded());
    }

    #[test]
    fn test_has_one_missing_is_none() {
        let issue = Resource::<Issue>::build(client(), json!({"id": "1"})).unwrap();
        assert!(issue.has_one::<User>("assignee").unwrap().is_none());

        let issue =
            Resource::<Issue>::build(client(), json!({"fields": {"assignee": null}})).unwrap();
        assert!(issue.has_one::<User>("assignee").unwrap().is_none());
    }

    #[test]
    fn test_has_many_nested_path_yields_members() {
        let issue = Resource::<Issue>::build(
            client(),
            json!({"id": "10002", "fields": {"comment": {"comments": [{"id": 1}, {"id": 2}]}}}),
        )
        .unwrap();

        let comments = issue.has_many::<Comment>("comments").unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(
            comments[0].parent("issue").and_then(Parent::key_value),
            Some("10002".to_string())
        );
        assert_eq!(comments[1].url(), "/rest/api/2/issue/10002/comment/2");
    }

    #[test]
    fn test_has_many_absent_is_empty() {
        let issue = Resource::<Issue>::build(client(), json!({"id": "1"})).unwrap();
        assert!(issue.has_many::<Comment>("comments").unwrap().is_empty());
    }

    #[test]
    fn test_relationship_errors() {
        let issue = Resource::<Issue>::build(client(), json!({"id": "1"})).unwrap();

        assert!(matches!(
            issue.has_one::<User>("nope"),
            Err(ResourceError::UnknownRelationship { .. })
        ));
        assert!(matches!(
            issue.has_one::<Comment>("reporter"),
            Err(ResourceError::RelationshipMismatch { .. })
        ));
        assert!(matches!(
            issue.has_one::<Comment>("comments"),
            Err(ResourceError::RelationshipMismatch { .. })
        ));
    }

    #[test]
    fn test_has_many_rejects_non_array() {
        let issue = Resource::<Issue>::build(
            client(),
            json!({"fields": {"comment": {"comments": "oops"}}}),
        )
        .unwrap();

        assert!(matches!(
            issue.has_many::<Comment>("comments"),
            Err(ResourceError::InvalidAttributes { found: "string", .. })
        ));
    }
}
