//! Routing strategies - mapping an item to its disk and web paths.

use serde_json::Value;

use crate::core::AttributeKey;
use crate::page::Page;

/// Routing strategy for content items
///
/// Pure and stateless given its configuration: both methods must return
/// the same output for the same item attributes. Returned paths are
/// site-relative (`/…`); the disk path is later rooted under the
/// configured output directory.
pub trait Router: Send + Sync {
    /// Site-relative path of the item's output file on disk.
    fn disk_path_for(&self, page: &Page) -> String;

    /// Web path the item is served under.
    fn web_path_for(&self, page: &Page) -> String;
}

/// Default routing strategy: every item becomes a directory index
///
/// `/posts/hello/` -> disk `/posts/hello/index.html`, web `/posts/hello/`.
/// The extension comes from the item's own `extension` attribute when set,
/// otherwise from the router's configured default.
#[derive(Debug, Clone)]
pub struct TrailingIndexRouter {
    extension: String,
}

impl TrailingIndexRouter {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl Default for TrailingIndexRouter {
    fn default() -> Self {
        Self::new("html")
    }
}

impl Router for TrailingIndexRouter {
    fn disk_path_for(&self, page: &Page) -> String {
        let extension = page
            .attributes()
            .get(&AttributeKey::Extension)
            .and_then(Value::as_str)
            .unwrap_or(&self.extension);
        format!("{}index.{}", page.path(), extension)
    }

    fn web_path_for(&self, page: &Page) -> String {
        page.path().as_str().to_string()
    }
}
