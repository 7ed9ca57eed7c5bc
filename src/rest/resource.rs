//! The generic resource entity and its CRUD operations.
//!
//! [`Resource<T>`] is the one implementation shared by every resource type.
//! The marker type `T` selects the registry entry; the entity itself is a
//! JSON attribute tree plus lifecycle flags and parent bindings.
//!
//! # Lifecycle
//!
//! - [`build`](Resource::build): local construction, not expanded
//! - [`find`](Resource::find) / [`fetch`](Resource::fetch): populated from
//!   the server, expanded
//! - [`all`](Resource::all) and relationship traversal: sliced from a larger
//!   response, not expanded
//! - [`delete`](Resource::delete): terminal; attributes stay readable but
//!   further fetches and saves fail
//!
//! # Example
//!
//! ```rust,ignore
//! use jira_api::rest::{FindOptions, Resource};
//! use jira_api::rest::resources::Issue;
//! use serde_json::json;
//!
//! let mut issue = Resource::<Issue>::find(&client, "SAMPLE-1", &FindOptions::new()).await?;
//! println!("{}", issue.attr_str("key").unwrap_or_default());
//!
//! issue.try_save(json!({"fields": {"summary": "Renamed"}})).await?;
//!
//! let mut draft = Resource::<Issue>::build(client.clone(), json!({}))?;
//! if !draft.save(json!({"fields": {"summary": "New"}})).await {
//!     println!("{:?}", draft.attr("errors"));
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::clients::{canonical_reason, HttpError, HttpResponse, JiraClient};
use crate::rest::attributes::{scalar_string, AttributeStore};
use crate::rest::errors::{json_type_name, ResourceError};
use crate::rest::params::{serialize_to_query, FindOptions, FindParams, ListOptions};
use crate::rest::path::{
    append_query, collection_path, ensure_leading_slash, singular_path, strip_site,
};
use crate::rest::registry::ResourceType;
use crate::rest::relationships::{Bindings, Parent};

/// Jira's timestamp format, e.g. `2024-01-15T10:30:00.000+0000`.
const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// An instance of resource type `T`.
///
/// Entities are not meant to be shared across tasks while mutating; every
/// operation that changes state takes `&mut self`.
#[derive(Clone, Debug)]
pub struct Resource<T: ResourceType> {
    client: JiraClient,
    attributes: AttributeStore,
    expanded: bool,
    deleted: bool,
    bindings: Bindings,
    marker: PhantomData<T>,
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource<crate::rest::resources::Issue>>();
};

impl<T: ResourceType> Resource<T> {
    /// Builds an entity locally. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAttributes`] if `attrs` is not an
    /// object and [`ResourceError::MissingBelongsTo`] if `T` must be scoped
    /// under a parent (use [`build_with`](Self::build_with)).
    pub fn build(client: JiraClient, attrs: Value) -> Result<Self, ResourceError> {
        Self::build_with(client, attrs, Bindings::new())
    }

    /// Builds an entity locally with parent bindings.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn build_with(
        client: JiraClient,
        attrs: Value,
        bindings: Bindings,
    ) -> Result<Self, ResourceError> {
        let attributes =
            AttributeStore::from_value(attrs).map_err(|other| ResourceError::InvalidAttributes {
                resource: T::spec().name,
                found: json_type_name(&other),
            })?;
        Self::new(client, attributes, bindings)
    }

    fn new(
        client: JiraClient,
        attributes: AttributeStore,
        bindings: Bindings,
    ) -> Result<Self, ResourceError> {
        bindings.check(T::spec())?;
        Ok(Self {
            client,
            attributes,
            expanded: false,
            deleted: false,
            bindings,
            marker: PhantomData,
        })
    }

    /// Lists the collection.
    ///
    /// Unwraps the declared collection key, if any; members keep the
    /// server's order and are not expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingBelongsTo`] if a declared parent is
    /// not bound, [`ResourceError::Http`] for transport failures and
    /// [`ResourceError::InvalidJson`] / [`ResourceError::UnexpectedPayload`]
    /// when the body is not a list of objects.
    pub async fn all(
        client: &JiraClient,
        options: &ListOptions,
    ) -> Result<Vec<Self>, ResourceError> {
        let spec = T::spec();
        options.bindings.check(spec)?;

        let path = collection_path(
            client.config().rest_base_path(),
            &options.bindings.prefix(spec),
            spec.endpoint_name,
        );
        let query = serialize_to_query(&options.params).map_err(|source| {
            ResourceError::InvalidJson {
                resource: spec.name,
                source,
            }
        })?;
        let url = append_query(&path, &query);

        tracing::debug!(resource = spec.name, url = %url, "Listing resources");
        let response = client.get(&url).await?;

        let json: Value =
            serde_json::from_str(&response.body).map_err(|source| ResourceError::InvalidJson {
                resource: spec.name,
                source,
            })?;
        let items = match (spec.collection_key, json) {
            (Some(key), Value::Object(mut wrapper)) => wrapper.remove(key).unwrap_or(Value::Null),
            (_, json) => json,
        };
        let items = match items {
            Value::Array(items) => items,
            other => {
                return Err(ResourceError::UnexpectedPayload {
                    resource: spec.name,
                    detail: format!("expected an array, got {}", json_type_name(&other)),
                })
            }
        };

        items
            .into_iter()
            .map(|item| Self::build_with(client.clone(), item, options.bindings.clone()))
            .collect()
    }

    /// Fetches a single entity by key.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingBelongsTo`] if a declared parent is
    /// not bound and [`ResourceError::Http`] for transport failures
    /// (including 404).
    pub async fn find(
        client: &JiraClient,
        key: &str,
        options: &FindOptions,
    ) -> Result<Self, ResourceError> {
        let mut attributes = AttributeStore::new();
        attributes.insert(T::spec().key_attribute, Value::String(key.to_string()));

        let mut resource = Self::new(client.clone(), attributes, options.bindings.clone())?;
        resource.fetch(true, &options.params).await?;
        Ok(resource)
    }

    /// Populates the attributes from the server.
    ///
    /// Does nothing when already expanded unless `reload` is set. A blank or
    /// non-JSON body leaves the attributes untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deleted`] after a successful delete and
    /// [`ResourceError::Http`] for transport failures.
    pub async fn fetch(&mut self, reload: bool, params: &FindParams) -> Result<(), ResourceError> {
        self.ensure_live()?;
        if self.expanded && !reload {
            return Ok(());
        }

        let query = serialize_to_query(params).map_err(|source| ResourceError::InvalidJson {
            resource: T::spec().name,
            source,
        })?;
        let url = append_query(&self.url(), &query);

        tracing::debug!(resource = T::spec().name, url = %url, "Fetching resource");
        let response = self.client.get(&url).await?;

        self.merge_response(&response);
        self.expanded = true;
        Ok(())
    }

    /// Creates or updates the entity, propagating failures.
    ///
    /// New records are POSTed to [`url`](Self::url); existing ones are PUT to
    /// [`patched_url`](Self::patched_url). On success `attrs` is deep-merged
    /// into the attributes, the response body is merged over them and the
    /// entity is marked as not expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deleted`] after a successful delete,
    /// [`ResourceError::InvalidAttributes`] if `attrs` is not an object and
    /// [`ResourceError::Http`] for transport failures.
    pub async fn try_save(&mut self, attrs: Value) -> Result<(), ResourceError> {
        self.ensure_live()?;
        let changes = match attrs {
            Value::Object(changes) => changes,
            other => {
                return Err(ResourceError::InvalidAttributes {
                    resource: T::spec().name,
                    found: json_type_name(&other),
                })
            }
        };
        let body = Value::Object(changes.clone());

        let response = if self.is_new_record() {
            let url = self.url();
            tracing::debug!(resource = T::spec().name, url = %url, "Creating resource");
            self.client.post(&url, &body).await?
        } else {
            let url = self.patched_url();
            tracing::debug!(resource = T::spec().name, url = %url, "Updating resource");
            self.client.put(&url, &body).await?
        };

        self.attributes.set_attrs(changes, false);
        self.merge_response(&response);
        self.expanded = false;
        Ok(())
    }

    /// Creates or updates the entity, reporting failure as `false`.
    ///
    /// When the server rejects the request, its error document becomes
    /// visible on the entity:
    ///
    /// - a JSON body is merged into the attributes (so `errors` and
    ///   `errorMessages` can be read directly) and stored under `exception`
    /// - any other body yields `exception = {class, code, message}` built
    ///   from the status line
    ///
    /// Local changes in `attrs` are not applied when the save fails.
    pub async fn save(&mut self, attrs: Value) -> bool {
        match self.try_save(attrs).await {
            Ok(()) => true,
            Err(ResourceError::Http(error)) => {
                tracing::warn!(
                    resource = T::spec().name,
                    error = %error,
                    "Save failed; recording the error on the resource"
                );
                self.record_exception(&error);
                false
            }
            Err(error) => {
                tracing::warn!(resource = T::spec().name, error = %error, "Save rejected");
                false
            }
        }
    }

    /// Deletes the entity on the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deleted`] if already deleted and
    /// [`ResourceError::Http`] for transport failures.
    pub async fn delete(&mut self) -> Result<(), ResourceError> {
        self.ensure_live()?;
        let url = self.url();

        tracing::debug!(resource = T::spec().name, url = %url, "Deleting resource");
        self.client.delete(&url).await?;

        self.deleted = true;
        Ok(())
    }

    /// Returns the server-relative URL of this entity.
    ///
    /// Resolution order: the `self` link with the site origin stripped, then
    /// the singular path when a key value is set, then the collection path.
    /// Both paths start with the belongs-to prefix.
    #[must_use]
    pub fn url(&self) -> String {
        if let Some(link) = self.attributes.get("self").and_then(Value::as_str) {
            return strip_site(self.client.config().site().as_ref(), link);
        }

        let spec = T::spec();
        let prefix = self.bindings.prefix(spec);
        let base = self.client.config().rest_base_path();

        match (self.key_value(), spec.key_param) {
            (Some(key), Some(param)) => {
                let mut query = std::collections::BTreeMap::new();
                query.insert(param.to_string(), key);
                append_query(&collection_path(base, &prefix, spec.endpoint_name), &query)
            }
            (Some(key), None) => singular_path(base, &prefix, spec.endpoint_name, &key),
            (None, _) => collection_path(base, &prefix, spec.endpoint_name),
        }
    }

    /// Returns [`url`](Self::url), guaranteed to start with `/` unless absolute.
    #[must_use]
    pub fn patched_url(&self) -> String {
        ensure_leading_slash(&self.url())
    }

    /// Returns `/<endpoint>` plus `/<key>` when a key value is set.
    #[must_use]
    pub fn path_component(&self) -> String {
        let endpoint = T::spec().endpoint_name;
        self.key_value()
            .map_or_else(|| format!("/{endpoint}"), |key| format!("/{endpoint}/{key}"))
    }

    /// Returns the key attribute's value.
    #[must_use]
    pub fn key_value(&self) -> Option<String> {
        self.attributes
            .get(T::spec().key_attribute)
            .and_then(scalar_string)
    }

    /// Returns the `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.attributes.get("id").and_then(scalar_string)
    }

    /// Returns `true` until the entity has a key value.
    #[must_use]
    pub fn is_new_record(&self) -> bool {
        self.key_value().is_none()
    }

    /// Returns `true` once populated by a fetch.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Returns `true` after a successful delete.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns `true` if the attributes carry a server `errors` document.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.attributes.contains_key("errors")
    }

    /// Returns a top-level attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns a top-level attribute, failing when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownAttribute`] when no such key exists.
    pub fn try_attr(&self, name: &str) -> Result<&Value, ResourceError> {
        self.attributes
            .get(name)
            .ok_or_else(|| ResourceError::UnknownAttribute {
                resource: T::spec().name,
                name: name.to_string(),
            })
    }

    /// Returns a top-level string attribute.
    #[must_use]
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Parses a top-level timestamp attribute.
    ///
    /// Accepts Jira's `+0000` offsets as well as RFC 3339.
    #[must_use]
    pub fn attr_datetime(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        let raw = self.attr_str(name)?;
        DateTime::parse_from_str(raw, JIRA_TIMESTAMP_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
    }

    /// Borrows the attribute tree.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    /// Merges attributes locally. See [`AttributeStore::set_attrs`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAttributes`] if `attrs` is not an object.
    pub fn set_attrs(&mut self, attrs: Value, clobber: bool) -> Result<(), ResourceError> {
        match attrs {
            Value::Object(map) => {
                self.attributes.set_attrs(map, clobber);
                Ok(())
            }
            other => Err(ResourceError::InvalidAttributes {
                resource: T::spec().name,
                found: json_type_name(&other),
            }),
        }
    }

    /// Returns the parent bound under `name`.
    #[must_use]
    pub fn parent(&self, name: &str) -> Option<&Parent> {
        self.bindings.get(name)
    }

    /// Returns the key of the parent bound under `name`.
    #[must_use]
    pub fn parent_key(&self, name: &str) -> Option<String> {
        self.parent(name).and_then(Parent::key_value)
    }

    /// Returns all parent bindings.
    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Returns the client this entity talks through.
    #[must_use]
    pub const fn client(&self) -> &JiraClient {
        &self.client
    }

    /// Serializes the attributes to a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.attributes.to_value().to_string()
    }

    fn ensure_live(&self) -> Result<(), ResourceError> {
        if self.deleted {
            return Err(ResourceError::Deleted {
                resource: T::spec().name,
                key: self.key_value().unwrap_or_default(),
            });
        }
        Ok(())
    }

    fn merge_response(&mut self, response: &HttpResponse) {
        match response.json() {
            Ok(Some(Value::Object(map))) => self.attributes.set_attrs(map, true),
            Ok(Some(other)) => tracing::warn!(
                resource = T::spec().name,
                found = json_type_name(&other),
                "Response body is not a JSON object; attributes left unchanged"
            ),
            Ok(None) => {}
            Err(error) => tracing::warn!(
                resource = T::spec().name,
                error = %error,
                "Response body is not valid JSON; attributes left unchanged"
            ),
        }
    }

    fn record_exception(&mut self, error: &HttpError) {
        let code = error.status();
        let parsed = error
            .body()
            .and_then(|body| serde_json::from_str::<Value>(body).ok());

        let exception = match parsed {
            Some(Value::Object(document)) => {
                self.attributes.set_attrs(document.clone(), true);
                Value::Object(document)
            }
            Some(other) => other,
            None => {
                let reason = code.map_or("Transport Error", canonical_reason);
                json!({
                    "class": format!("HTTP{}", reason.replace(' ', "")),
                    "code": code,
                    "message": code.map_or_else(|| error.to_string(), |_| reason.to_string()),
                })
            }
        };

        let mut wrapper = Map::new();
        wrapper.insert("exception".to_string(), exception);
        self.attributes.set_attrs(wrapper, true);
    }
}

impl<T: ResourceType> Serialize for Resource<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}

impl<T: ResourceType> fmt::Display for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", T::spec().name, self.to_json())
    }
}
