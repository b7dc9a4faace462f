//! Enum-like named numbers with an open, runtime-extensible registry.
//!
//! Useful for code sets such as HTTP status codes where new values can be
//! registered at runtime and unknown values map to an explicit fallback:
//!
//! ```
//! use nullguard_common::named::{NamedNumber, NamedNumberRegistry};
//!
//! let registry = NamedNumberRegistry::new(NamedNumber::new(0, "Unknown Http Status Code."));
//! registry.register(NamedNumber::new(404, "Not found."));
//!
//! assert_eq!(registry.value_of(&404).name(), "Not found.");
//! assert_eq!(registry.value_of(&10_000).value(), &0);
//! ```

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A number paired with a display name. Identity is the number alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedNumber<T> {
    value: T,
    name: String,
}

impl<T> NamedNumber<T> {
    pub fn new(value: T, name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: PartialEq> PartialEq for NamedNumber<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for NamedNumber<T> {}

impl<T: Hash> Hash for NamedNumber<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: fmt::Display> fmt::Display for NamedNumber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Value: {}, Name: {}]", self.value, self.name)
    }
}

/// Concurrent registry of named numbers with an explicit fallback
#[derive(Debug)]
pub struct NamedNumberRegistry<T>
where
    T: Eq + Hash,
{
    entries: DashMap<T, NamedNumber<T>>,
    unknown: NamedNumber<T>,
}

impl<T> NamedNumberRegistry<T>
where
    T: Eq + Hash + Clone + fmt::Debug,
{
    /// Create a registry whose only entry is the `unknown` fallback.
    pub fn new(unknown: NamedNumber<T>) -> Self {
        let entries = DashMap::new();
        entries.insert(unknown.value.clone(), unknown.clone());
        Self { entries, unknown }
    }

    /// Create a registry pre-populated with `initial`.
    pub fn with_entries<I>(unknown: NamedNumber<T>, initial: I) -> Self
    where
        I: IntoIterator<Item = NamedNumber<T>>,
    {
        let registry = Self::new(unknown);
        for entry in initial {
            registry.register(entry);
        }
        registry
    }

    /// Add or replace an entry, returning it.
    pub fn register(&self, entry: NamedNumber<T>) -> NamedNumber<T> {
        tracing::debug!(value = ?entry.value, name = %entry.name, "Registering named number");
        if let Some(previous) = self.entries.insert(entry.value.clone(), entry.clone()) {
            if previous.name != entry.name {
                tracing::debug!(
                    value = ?entry.value,
                    previous = %previous.name,
                    "Replaced existing named number"
                );
            }
        }
        entry
    }

    /// The registered entry for `value`, or the fallback.
    pub fn value_of(&self, value: &T) -> NamedNumber<T> {
        self.get(value).unwrap_or_else(|| self.unknown.clone())
    }

    pub fn get(&self, value: &T) -> Option<NamedNumber<T>> {
        self.entries.get(value).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, value: &T) -> bool {
        self.entries.contains_key(value)
    }

    pub fn unknown(&self) -> &NamedNumber<T> {
        &self.unknown
    }

    /// Number of entries, including the fallback.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A registry always holds its fallback, so this is never `true`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of every entry, in no particular order.
    pub fn entries(&self) -> Vec<NamedNumber<T>> {
        self.entries.iter().map(|e| e.value().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::collections::HashSet;

    const NOT_FOUND_CODE: i32 = 404;
    const UNKNOWN_CODE: i32 = 10_000;
    const INTERNAL_SERVER_ERROR_CODE: i32 = 500;

    static HTTP_STATUS: Lazy<NamedNumberRegistry<i32>> = Lazy::new(|| {
        NamedNumberRegistry::with_entries(
            NamedNumber::new(0, "Unknown Http Status Code."),
            [
                NamedNumber::new(NOT_FOUND_CODE, "Not found."),
                NamedNumber::new(200, "OK."),
            ],
        )
    });

    #[test]
    fn test_value_of_registered() {
        let status = HTTP_STATUS.value_of(&NOT_FOUND_CODE);
        assert_eq!(status.value(), &NOT_FOUND_CODE);
        assert_eq!(status.name(), "Not found.");
    }

    #[test]
    fn test_value_of_unknown_falls_back() {
        let status = HTTP_STATUS.value_of(&UNKNOWN_CODE);
        assert_eq!(status, *HTTP_STATUS.unknown());
        assert_eq!(status.value(), &0);
        assert!(HTTP_STATUS.get(&UNKNOWN_CODE).is_none());
    }

    #[test]
    fn test_register_new_code() {
        let registered = HTTP_STATUS.register(NamedNumber::new(
            INTERNAL_SERVER_ERROR_CODE,
            "Internal Server Error.",
        ));
        let found = HTTP_STATUS.value_of(&INTERNAL_SERVER_ERROR_CODE);
        assert_eq!(found.value(), registered.value());
        assert!(HTTP_STATUS.contains(&INTERNAL_SERVER_ERROR_CODE));
    }

    #[test]
    fn test_register_replaces_name() {
        let registry = NamedNumberRegistry::new(NamedNumber::new(0_u16, "Unknown"));
        registry.register(NamedNumber::new(1, "One"));
        registry.register(NamedNumber::new(1, "Uno"));
        assert_eq!(registry.value_of(&1).name(), "Uno");
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_equality_and_hash_use_value_only() {
        let a = NamedNumber::new(404, "Not found.");
        let b = NamedNumber::new(404, "Missing");
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_display() {
        let status = NamedNumber::new(404, "Not found.");
        assert_eq!(status.to_string(), "[Value: 404, Name: Not found.]");
    }

    #[test]
    fn test_entries_snapshot() {
        let registry = NamedNumberRegistry::with_entries(
            NamedNumber::new(0_i64, "Unknown"),
            [NamedNumber::new(7, "Seven")],
        );
        let mut values: Vec<i64> = registry.entries().iter().map(|e| *e.value()).collect();
        values.sort_unstable();
        assert_eq!(values, vec![0, 7]);
    }

    #[test]
    fn test_serde_shape() {
        let status = NamedNumber::new(404, "Not found.");
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json, serde_json::json!({"value": 404, "name": "Not found."}));
    }
}
