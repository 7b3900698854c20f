//! Configuration merging
//!
//! Overrides are plain structs whose fields are `Option`s. Merging applies the
//! set fields of the right-hand side onto the left-hand side and returns a new
//! value, leaving both inputs untouched:
//!
//! - nested structs (and `Option`s of them) merge field by field
//! - maps merge key by key
//! - lists and scalars are replaced wholesale
//!
//! [`deep_merge`] offers the same semantics for untyped JSON documents; it layers
//! the configuration files before they are deserialized.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

/// A configuration fragment that can be layered over another one of the same shape.
pub trait Merge: Clone {
    /// Return a new value with `other` applied over `self`.
    fn merge(&self, other: &Self) -> Self;
}

/// Fold fragments left to right, later fragments winning.
pub fn merge_all<'a, T, I>(base: &T, fragments: I) -> T
where
    T: Merge + 'a,
    I: IntoIterator<Item = &'a T>,
{
    fragments
        .into_iter()
        .fold(base.clone(), |acc, fragment| acc.merge(fragment))
}

/// Merge helper for scalar and list fields: the override replaces when set.
pub fn replace<T: Clone>(base: &Option<T>, other: &Option<T>) -> Option<T> {
    other.clone().or_else(|| base.clone())
}

impl<T: Merge> Merge for Option<T> {
    fn merge(&self, other: &Self) -> Self {
        match (self, other) {
            (Some(base), Some(over)) => Some(base.merge(over)),
            (None, Some(over)) => Some(over.clone()),
            (base, None) => base.clone(),
        }
    }
}

impl<V: Clone> Merge for BTreeMap<String, V> {
    fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (key, value) in other {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

/// Recursively merge two JSON values. Objects merge key by key; any other
/// overlay value replaces the base.
pub fn deep_merge(base: &JsonValue, overlay: &JsonValue) -> JsonValue {
    match (base, overlay) {
        (JsonValue::Object(base_map), JsonValue::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let value = match base_map.get(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            JsonValue::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}
