//! The JSON attribute tree held by every resource entity.
//!
//! An [`AttributeStore`] is exactly the parsed JSON object the server
//! returned, plus whatever the caller merged in locally. Two merge modes
//! exist:
//!
//! - **clobber**: top-level keys are replaced wholesale (used after a fetch
//!   or save, where the server's answer is authoritative)
//! - **deep**: nested objects are merged key by key and every other value
//!   overwrites (used for the caller's pending changes)
//!
//! # Example
//!
//! ```rust
//! use jira_api::rest::AttributeStore;
//! use serde_json::json;
//!
//! let mut attrs = AttributeStore::from_value(json!({"foo": {"bar": "baz"}})).unwrap();
//!
//! attrs.set_attrs(json!({"foo": {"fum": "dum"}}).as_object().unwrap().clone(), false);
//! assert_eq!(attrs.get("foo"), Some(&json!({"bar": "baz", "fum": "dum"})));
//!
//! attrs.set_attrs(json!({"foo": {"fum": "dum"}}).as_object().unwrap().clone(), true);
//! assert_eq!(attrs.get("foo"), Some(&json!({"fum": "dum"})));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A mutable, deeply mergeable JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeStore(Map<String, Value>);

impl AttributeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value, returning it unchanged if it is not an object.
    ///
    /// # Errors
    ///
    /// Returns the original value when it is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }

    /// Returns the value stored under a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if a top-level key is present (even when `null`).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Stores a top-level value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes a top-level key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns the number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Borrows the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns a JSON copy of the whole tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Merges `attrs` into the store.
    ///
    /// With `clobber`, every top-level key in `attrs` replaces the existing
    /// value. Without it, objects present on both sides are merged
    /// recursively and any other value overwrites.
    pub fn set_attrs(&mut self, attrs: Map<String, Value>, clobber: bool) {
        if clobber {
            self.0.extend(attrs);
        } else {
            deep_merge(&mut self.0, attrs);
        }
    }

    /// Looks up `attribute_key` below the object found by following `path`.
    ///
    /// An empty path looks at the top level. Every step must land on an
    /// object holding the next key; otherwise the lookup yields `None`.
    #[must_use]
    pub fn lookup(&self, path: &[&str], attribute_key: &str) -> Option<&Value> {
        let mut current = &self.0;
        for key in path {
            current = current.get(*key)?.as_object()?;
        }
        current.get(attribute_key)
    }
}

impl From<Map<String, Value>> for AttributeStore {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<AttributeStore> for Value {
    fn from(store: AttributeStore) -> Self {
        Self::Object(store.0)
    }
}

/// Renders a string or number as a key; anything else has no key form.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deep_merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, incoming) in source {
        match (target.get_mut(&key), incoming) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                deep_merge(existing, nested);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}
