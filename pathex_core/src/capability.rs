//! Named capability lookup with an explicit "unavailable" outcome.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Registry of named capabilities.
///
/// Looking up a name that was never registered reports the miss once and
/// returns `None`; callers treat `None` as "feature unavailable".
#[derive(Debug)]
pub struct CapabilityRegistry<T> {
    entries: HashMap<String, T>,
    reported: Mutex<HashSet<String>>,
}

impl<T> CapabilityRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            reported: Mutex::new(HashSet::new()),
        }
    }

    /// Register a capability, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, capability: T) {
        self.entries.insert(name.into(), capability);
    }

    /// Remove a capability, returning it if present.
    pub fn unregister(&mut self, name: &str) -> Option<T> {
        self.entries.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolve a capability by name.
    pub fn resolve(&self, name: &str) -> Option<&T> {
        let found = self.entries.get(name);
        if found.is_none() {
            let mut reported = self.reported.lock().unwrap_or_else(PoisonError::into_inner);
            if reported.insert(name.to_string()) {
                warn!("Capability unavailable: {name}");
            }
        }
        found
    }

    /// Names that were requested but not available.
    #[must_use]
    pub fn unavailable(&self) -> Vec<String> {
        let reported = self.reported.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = reported.iter().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<T> Default for CapabilityRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_registered() {
        let mut registry = CapabilityRegistry::new();
        registry.register("double", 2_u32);
        assert_eq!(registry.resolve("double"), Some(&2));
        assert!(registry.unavailable().is_empty());
    }

    #[test]
    fn test_missing_reported_once() {
        let registry: CapabilityRegistry<u32> = CapabilityRegistry::new();
        assert!(registry.resolve("missing").is_none());
        assert!(registry.resolve("missing").is_none());
        assert!(registry.resolve("other").is_none());
        assert_eq!(registry.unavailable(), vec!["missing", "other"]);
    }

    #[test]
    fn test_unregister() {
        let mut registry = CapabilityRegistry::new();
        registry.register("a", 1_u8);
        registry.register("b", 2_u8);
        assert_eq!(registry.unregister("a"), Some(1));
        assert!(!registry.contains("a"));
        assert_eq!(registry.names(), vec!["b"]);
    }
}
