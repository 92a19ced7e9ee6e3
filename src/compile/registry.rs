//! Filter and layout registry.
//!
//! Concrete transforms live outside the core; the engine only needs
//! name-based resolution and an apply/render capability. Misses surface
//! as `None` and the engine turns them into typed unknown-name errors.

use rustc_hash::FxHashMap;

use crate::page::PageProxy;

/// Error type produced by filter and layout implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A named content transform
///
/// Pure with respect to the page: reads go through the proxy, the output
/// is a new string.
pub trait Filter: Send + Sync {
    fn apply(&self, content: &str, page: &PageProxy<'_>) -> Result<String, BoxError>;
}

impl<F> Filter for F
where
    F: Fn(&str, &PageProxy<'_>) -> Result<String, BoxError> + Send + Sync,
{
    fn apply(&self, content: &str, page: &PageProxy<'_>) -> Result<String, BoxError> {
        self(content, page)
    }
}

/// A named layout wrapping pre-filtered content
pub trait Layout: Send + Sync {
    fn render(&self, content: &str, page: &PageProxy<'_>) -> Result<String, BoxError>;
}

/// Name -> implementation lookup for filters and layouts
#[derive(Default)]
pub struct Registry {
    filters: FxHashMap<String, Box<dyn Filter>>,
    layouts: FxHashMap<String, Box<dyn Layout>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter under a name, replacing any previous one.
    pub fn register_filter(&mut self, name: impl Into<String>, filter: impl Filter + 'static) {
        self.filters.insert(name.into(), Box::new(filter));
    }

    /// Register a layout under a name, replacing any previous one.
    pub fn register_layout(&mut self, name: impl Into<String>, layout: impl Layout + 'static) {
        self.layouts.insert(name.into(), Box::new(layout));
    }

    /// Resolve a filter by name.
    pub fn filter(&self, name: &str) -> Option<&dyn Filter> {
        self.filters.get(name).map(Box::as_ref)
    }

    /// Resolve a layout by name.
    pub fn layout(&self, name: &str) -> Option<&dyn Layout> {
        self.layouts.get(name).map(Box::as_ref)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("layouts", &self.layouts.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upcase;

    impl Filter for Upcase {
        fn apply(&self, content: &str, _page: &PageProxy<'_>) -> Result<String, BoxError> {
            Ok(content.to_uppercase())
        }
    }

    #[test]
    fn test_register_and_resolve_filter() {
        let mut registry = Registry::new();
        registry.register_filter("upcase", Upcase);

        assert!(registry.filter("upcase").is_some());
        assert!(registry.filter("unknown").is_none());
    }

    #[test]
    fn test_unknown_layout_is_none() {
        let registry = Registry::new();
        assert!(registry.layout("missing").is_none());
    }
}
