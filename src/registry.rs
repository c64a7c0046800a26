use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::FixtureError;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid name pattern"));

/// Check a resolver or macro name against `[A-Za-z0-9_]+`.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Named entries kept in registration order.
///
/// Re-registering a name replaces the entry in place, removing one keeps the
/// order of the others.
pub struct Registry<T: ?Sized> {
    kind: &'static str,
    entries: IndexMap<String, Arc<T>>,
}

impl<T: ?Sized> Registry<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    pub fn add(&mut self, name: &str, entry: Arc<T>) -> Result<(), FixtureError> {
        if !is_valid_name(name) {
            return Err(FixtureError::InvalidName {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    /// Insert a built-in entry whose name is known to be valid.
    pub(crate) fn insert_builtin(&mut self, name: &'static str, entry: Arc<T>) {
        debug_assert!(is_valid_name(name));
        self.entries.insert(name.to_string(), entry);
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<T>> {
        self.entries.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<T>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<T>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            entries: self.entries.clone(),
        }
    }
}
