//! Keyed cache of remote-read results
//!
//! Explicit counterpart of the dashboard's query cache: list reads are
//! stored under a typed key and every successful mutation invalidates the
//! keys it touched. Assembled category trees are never cached; only raw
//! row payloads are.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use crate::infrastructure::traits::ResourceKind;

/// Cache key: resource kind plus optional record id.
/// `id: None` addresses the list result for the kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: ResourceKind,
    pub id: Option<String>,
}

impl QueryKey {
    pub fn list(kind: ResourceKind) -> Self {
        Self { kind, id: None }
    }

    pub fn record(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
        }
    }
}

/// Process-wide cache shared by all services through `Arc`.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .get(key)
            .cloned()
    }

    pub fn put(&self, key: QueryKey, value: Value) {
        debug!(kind = %key.kind, id = ?key.id, "cache put");
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key, value);
    }

    /// Drop a single key.
    pub fn invalidate(&self, key: &QueryKey) {
        debug!(kind = %key.kind, id = ?key.id, "cache invalidate");
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .remove(key);
    }

    /// Drop the list key and every record key of a kind.
    pub fn invalidate_kind(&self, kind: ResourceKind) {
        debug!(%kind, "cache invalidate kind");
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .retain(|key, _| key.kind != kind);
    }

    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_cached_list_when_invalidating_kind_then_record_keys_go_too() {
        let cache = QueryCache::new();
        cache.put(QueryKey::list(ResourceKind::Products), json!([]));
        cache.put(QueryKey::record(ResourceKind::Products, "p1"), json!({}));
        cache.put(QueryKey::list(ResourceKind::Companies), json!([]));

        cache.invalidate_kind(ResourceKind::Products);

        assert!(cache.get(&QueryKey::list(ResourceKind::Products)).is_none());
        assert!(cache
            .get(&QueryKey::record(ResourceKind::Products, "p1"))
            .is_none());
        assert!(cache.get(&QueryKey::list(ResourceKind::Companies)).is_some());
    }
}
