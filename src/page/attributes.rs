//! Item-local attribute storage.
//!
//! Arbitrary string keys are accepted on input and normalized to
//! [`AttributeKey`] exactly once, at construction.

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::JsonMap;
use crate::core::AttributeKey;

/// Item-local metadata, keyed by canonical attribute keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    map: FxHashMap<AttributeKey, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by canonical key.
    #[inline]
    pub fn get(&self, key: &AttributeKey) -> Option<&Value> {
        self.map.get(key)
    }

    /// Check whether a key is set (even to a falsy value).
    #[inline]
    pub fn contains(&self, key: &AttributeKey) -> bool {
        self.map.contains_key(key)
    }

    /// Insert a value, returning the previous one if any.
    pub fn insert(&mut self, key: impl Into<AttributeKey>, value: Value) -> Option<Value> {
        self.map.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, &Value)> {
        self.map.iter()
    }
}

impl From<JsonMap> for Attributes {
    fn from(map: JsonMap) -> Self {
        let map = map
            .into_iter()
            .map(|(key, value)| (AttributeKey::from_name(&key), value))
            .collect();
        Self { map }
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: AsRef<str>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(key, value)| (AttributeKey::from_name(key.as_ref()), value.into()))
            .collect();
        Self { map }
    }
}
