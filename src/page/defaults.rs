//! Fallback attribute layer shared by all items of a site.

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::Attributes;
use crate::core::{AttributeKey, LogicalPath};

/// How the defaults provider is organized
///
/// The resolver only ever asks `lookup(path, key)`; whether the answer
/// comes from one flat mapping or a per-path one is the provider's
/// structure, kept configurable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultsLookup {
    /// One flat mapping applies to every item.
    #[default]
    Global,
    /// Per-path mappings, falling back to the flat mapping.
    ByPath,
}

/// Site-wide fallback attributes
///
/// Owned by the site, shared read-only by all of its items.
#[derive(Debug, Clone, Default)]
pub struct PageDefaults {
    lookup: DefaultsLookup,
    global: Attributes,
    by_path: FxHashMap<LogicalPath, Attributes>,
}

impl PageDefaults {
    /// Flat defaults: the same attributes apply to every item.
    pub fn global(attributes: Attributes) -> Self {
        Self {
            lookup: DefaultsLookup::Global,
            global: attributes,
            by_path: FxHashMap::default(),
        }
    }

    /// Path-indexed defaults, with an optional global fallback layer.
    pub fn by_path(fallback: Attributes) -> Self {
        Self {
            lookup: DefaultsLookup::ByPath,
            global: fallback,
            by_path: FxHashMap::default(),
        }
    }

    /// Register defaults for one item path (ByPath organization).
    pub fn insert_for_path(&mut self, path: impl Into<LogicalPath>, attributes: Attributes) {
        self.by_path.insert(path.into(), attributes);
    }

    /// Look up a fallback value for an item.
    pub fn lookup(&self, path: &LogicalPath, key: &AttributeKey) -> Option<&Value> {
        match self.lookup {
            DefaultsLookup::Global => self.global.get(key),
            DefaultsLookup::ByPath => self
                .by_path
                .get(path)
                .and_then(|attributes| attributes.get(key))
                .or_else(|| self.global.get(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_lookup_ignores_path() {
        let defaults = PageDefaults::global([("quux", "stfu")].into_iter().collect());

        for path in ["/a/", "/b/c/"] {
            assert_eq!(
                defaults.lookup(&LogicalPath::new(path), &"quux".into()),
                Some(&Value::from("stfu"))
            );
        }
        assert_eq!(defaults.lookup(&LogicalPath::new("/a/"), &"other".into()), None);
    }

    #[test]
    fn test_by_path_lookup() {
        let mut defaults = PageDefaults::by_path([("shared", "yes")].into_iter().collect());
        defaults.insert_for_path("/posts/", [("layout", "post")].into_iter().collect());

        // Path-specific hit
        assert_eq!(
            defaults.lookup(&LogicalPath::new("/posts/"), &AttributeKey::Layout),
            Some(&Value::from("post"))
        );
        // Other paths miss the per-path layer
        assert_eq!(
            defaults.lookup(&LogicalPath::new("/about/"), &AttributeKey::Layout),
            None
        );
        // Global fallback still applies everywhere
        assert_eq!(
            defaults.lookup(&LogicalPath::new("/about/"), &"shared".into()),
            Some(&Value::from("yes"))
        );
    }
}
