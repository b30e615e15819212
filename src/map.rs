//! Ordered map type for NestedText dictionaries.
//!
//! This module provides [`NtMap`], a wrapper around [`IndexMap`] that keeps
//! dictionary entries in insertion order. NestedText itself imposes no emit
//! order, but preserving source order makes a parse/emit round trip
//! byte-stable and test output predictable, so the emitter iterates entries
//! in the order the parser inserted them.
//!
//! ## Examples
//!
//! ```rust
//! use serde_nestedtext::{NtMap, Value};
//!
//! let mut map = NtMap::new();
//! map.insert("name".to_string(), Value::string("Alice"));
//! map.insert("role".to_string(), Value::string("admin"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "role"]);
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::Value;

/// An insertion-ordered map of string keys to NestedText values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NtMap(IndexMap<String, Value>);

impl NtMap {
    /// Creates an empty `NtMap`.
    #[must_use]
    pub fn new() -> Self {
        NtMap(IndexMap::new())
    }

    /// Creates an empty `NtMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        NtMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns a mutable iterator over the values of the map.
    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, Value> {
        self.0.values_mut()
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, Value>> for NtMap {
    fn from(map: HashMap<String, Value>) -> Self {
        NtMap(map.into_iter().collect())
    }
}

impl From<NtMap> for HashMap<String, Value> {
    fn from(map: NtMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for NtMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NtMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for NtMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        NtMap(IndexMap::from_iter(iter))
    }
}
