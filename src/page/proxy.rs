//! Read-only page view for filter and layout code.

use serde_json::Value;

use super::Page;
use crate::core::{AttributeKey, LogicalPath};
use crate::site::Site;

/// Read-only view over a page's resolved attributes and content
///
/// Handed to filters and layouts during compilation so they can inspect
/// the item without being able to mutate it. Attribute reads go through
/// the full layering (own attributes, defaults, built-ins).
#[derive(Clone, Copy)]
pub struct PageProxy<'a> {
    page: &'a Page,
    site: &'a Site,
}

impl<'a> PageProxy<'a> {
    pub(crate) fn new(page: &'a Page, site: &'a Site) -> Self {
        Self { page, site }
    }

    /// Resolve an attribute by canonical key.
    pub fn get(&self, key: &AttributeKey) -> Option<Value> {
        self.page.attribute_named(self.site, key)
    }

    /// Resolve an attribute by string name.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.get(&AttributeKey::from_name(name))
    }

    /// The item's original, unfiltered content.
    #[inline]
    pub fn content(&self) -> &'a str {
        self.page.content()
    }

    /// The item's canonical logical path.
    #[inline]
    pub fn path(&self) -> &'a LogicalPath {
        self.page.path()
    }
}

impl std::fmt::Debug for PageProxy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageProxy")
            .field("path", self.page.path())
            .finish_non_exhaustive()
    }
}
