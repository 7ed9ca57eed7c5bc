//! Field definitions and the display-name map.
//!
//! Custom fields come back from the server as `customfield_10010`. Loading
//! the field map once per client lets [`Resource::<Issue>::field`] resolve
//! them by name:
//!
//! ```rust,ignore
//! Resource::<Field>::map_fields(&client).await?;
//! let points = issue.field("Story Points");
//! ```
//!
//! [`Resource::<Issue>::field`]: crate::rest::Resource

use std::collections::{BTreeMap, BTreeSet};

use crate::clients::{CacheKey, JiraClient};
use crate::rest::errors::ResourceError;
use crate::rest::params::ListOptions;
use crate::rest::registry::{ResourceKind, ResourceSpec, ResourceType};
use crate::rest::resource::Resource;

pub(crate) static SPEC: ResourceSpec = ResourceSpec::new("Field", "field");

/// Marker for system and custom field definitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Field;

impl ResourceType for Field {
    const KIND: ResourceKind = ResourceKind::Field;
}

impl Resource<Field> {
    /// Replaces every character outside `[A-Za-z0-9]` with `_`.
    #[must_use]
    pub fn safe_name(name: &str) -> String {
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }

    /// Returns `true` for custom fields.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.attr("custom")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    /// Loads every field and caches the custom field name map on the client.
    ///
    /// Only custom fields are mapped; system fields are already addressed by
    /// their readable ids. A custom field whose safe name is taken, either by
    /// an earlier custom field or by a system field name, is stored as
    /// `safe_name("{name}_{id}")`. The returned map (safe name to field id)
    /// is also stored under [`CacheKey::FIELD_MAP`]; the reverse map (id to
    /// display name, for every field) goes under [`CacheKey::FIELD_NAMES`].
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Resource::all`].
    pub async fn map_fields(
        client: &JiraClient,
    ) -> Result<BTreeMap<String, String>, ResourceError> {
        let fields = Self::all(client, &ListOptions::new()).await?;

        let reserved: BTreeSet<String> = fields
            .iter()
            .filter(|field| !field.is_custom())
            .filter_map(|field| field.attr_str("name").map(Self::safe_name))
            .collect();

        let mut field_map = BTreeMap::new();
        let mut field_names = BTreeMap::new();

        for field in &fields {
            let (Some(id), Some(name)) = (field.id(), field.attr_str("name")) else {
                continue;
            };
            field_names.insert(id.clone(), name.to_string());

            if !field.is_custom() {
                continue;
            }

            let mut safe = Self::safe_name(name);
            if field_map.contains_key(&safe) || reserved.contains(&safe) {
                let renamed = Self::safe_name(&format!("{name}_{id}"));
                tracing::warn!(
                    field = name,
                    id = %id,
                    renamed = %renamed,
                    "Duplicate field name; mapping under a suffixed name"
                );
                safe = renamed;
            }
            field_map.insert(safe, id);
        }

        tracing::debug!(count = field_map.len(), "Field map loaded");
        client.cache().populate(CacheKey::FIELD_NAMES, field_names);
        client.cache().populate(CacheKey::FIELD_MAP, field_map.clone());
        Ok(field_map)
    }

    /// Resolves a field id from a display or safe name using the cached map.
    #[must_use]
    pub fn name_to_id(client: &JiraClient, name: &str) -> Option<String> {
        let cache = client.cache();
        cache
            .lookup(CacheKey::FIELD_MAP, name)
            .or_else(|| cache.lookup(CacheKey::FIELD_MAP, &Self::safe_name(name)))
    }
}
