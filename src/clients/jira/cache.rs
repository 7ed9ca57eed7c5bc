//! Per-client side cache.
//!
//! Some lookups are expensive to repeat on every call (the custom field map
//! needs a full `/field` listing). They are stored once on the client under a
//! declared [`CacheKey`] and shared by every clone of that client.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Names a cached string map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(&'static str);

impl CacheKey {
    /// Safe field name to field id.
    pub const FIELD_MAP: Self = Self("field_map");

    /// Field id to display name.
    pub const FIELD_NAMES: Self = Self("field_names");

    /// Declares a new cache key.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the key's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// String maps cached for the lifetime of a client.
///
/// Reads and writes go through an [`RwLock`]; a poisoned lock is recovered
/// since every write replaces a whole entry.
#[derive(Debug, Default)]
pub struct ClientCache {
    entries: RwLock<HashMap<CacheKey, BTreeMap<String, String>>>,
}

// Verify ClientCache is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientCache>();
};

impl ClientCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the map stored under `key`.
    pub fn populate(&self, key: CacheKey, map: BTreeMap<String, String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, map);
    }

    /// Looks up one entry of the map stored under `key`.
    #[must_use]
    pub fn lookup(&self, key: CacheKey, name: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .and_then(|map| map.get(name).cloned())
    }

    /// Returns a copy of the whole map stored under `key`.
    #[must_use]
    pub fn entries(&self, key: CacheKey) -> Option<BTreeMap<String, String>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    /// Returns `true` once `key` has been populated.
    #[must_use]
    pub fn is_populated(&self, key: CacheKey) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&key)
    }

    /// Drops every cached map.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_and_lookup() {
        let cache = ClientCache::new();
        assert!(!cache.is_populated(CacheKey::FIELD_MAP));
        assert_eq!(cache.lookup(CacheKey::FIELD_MAP, "Story_Points"), None);

        let mut map = BTreeMap::new();
        map.insert("Story_Points".to_string(), "customfield_10010".to_string());
        cache.populate(CacheKey::FIELD_MAP, map);

        assert!(cache.is_populated(CacheKey::FIELD_MAP));
        assert!(!cache.is_populated(CacheKey::FIELD_NAMES));
        assert_eq!(
            cache.lookup(CacheKey::FIELD_MAP, "Story_Points"),
            Some("customfield_10010".to_string())
        );
        assert_eq!(cache.entries(CacheKey::FIELD_MAP).map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_populate_replaces_and_clear_empties() {
        let cache = ClientCache::new();
        let key = CacheKey::new("custom");
        cache.populate(key, BTreeMap::from([("a".to_string(), "1".to_string())]));
        cache.populate(key, BTreeMap::from([("b".to_string(), "2".to_string())]));

        assert_eq!(cache.lookup(key, "a"), None);
        assert_eq!(cache.lookup(key, "b"), Some("2".to_string()));
        assert_eq!(key.to_string(), "custom");

        cache.clear();
        assert!(!cache.is_populated(key));
    }
}
