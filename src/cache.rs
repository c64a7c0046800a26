use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use tracing::trace;

/// Parsed fixture documents keyed by base name.
///
/// Values go in and come out as deep copies, so nothing handed to a caller is
/// ever shared with the cache or with another caller.
#[derive(Debug, Default)]
pub struct DocumentCache {
    documents: Mutex<HashMap<String, Value>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        // A poisoned map is still a valid map of parsed documents.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        let hit = self.lock().get(name).cloned();
        if hit.is_some() {
            trace!(name, "fixture cache hit");
        }
        hit
    }

    pub fn insert(&self, name: &str, document: &Value) {
        self.lock().insert(name.to_string(), document.clone());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_returns_copies() {
        let cache = DocumentCache::new();
        let mut original = json!({"name": "Walter Mitty"});
        cache.insert("profile", &original);

        original["name"] = json!("changed");

        let mut first = cache.get("profile").expect("cached");
        first["updated"] = json!("updated");

        let second = cache.get("profile").expect("cached");
        assert_eq!(second, json!({"name": "Walter Mitty"}));
        assert!(second.get("updated").is_none());
    }

    #[test]
    fn test_cache_clear() {
        let cache = DocumentCache::new();
        cache.insert("a", &json!(1));
        cache.insert("b", &json!(2));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }
}
