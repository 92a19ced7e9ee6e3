//! Page types: the content item, attribute layering, routing, and the
//! read-only proxy handed to filter/layout code.

mod attributes;
mod defaults;
mod proxy;
mod route;

pub use attributes::Attributes;
pub use defaults::{DefaultsLookup, PageDefaults};
pub use proxy::PageProxy;

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::compile::CompileStage;
use crate::core::{AttributeKey, LogicalPath};
use crate::freshness::{self, Freshness};
use crate::site::Site;
use crate::store::StoreError;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// One unit of content being built
///
/// Created from `(content, attributes, path)`; attribute keys and the
/// logical path are normalized at construction. A page does not own its
/// site - methods that delegate (routing, resolution, persistence,
/// compilation) take the owning [`Site`] explicitly.
///
/// `modified`/`created` are recomputed on each compile relative to the
/// previous output (the memoized one when available, otherwise whatever
/// the backing store kept).
#[derive(Debug, Clone)]
pub struct Page {
    content: String,
    attributes: Attributes,
    path: LogicalPath,
    compiled: FxHashMap<CompileStage, String>,
    modified: bool,
    created: bool,
}

impl Page {
    pub fn new(content: impl Into<String>, attributes: Attributes, path: impl AsRef<str>) -> Self {
        Self {
            content: content.into(),
            attributes,
            path: LogicalPath::new(path.as_ref()),
            compiled: FxHashMap::default(),
            modified: false,
            created: false,
        }
    }

    /// Original, unfiltered content.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Item-local attributes (no defaults layered in).
    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Canonical logical path (always `/…/`).
    #[inline]
    pub fn path(&self) -> &LogicalPath {
        &self.path
    }

    /// Memoized output of one compilation stage.
    pub fn compiled(&self, stage: CompileStage) -> Option<&str> {
        self.compiled.get(&stage).map(String::as_str)
    }

    /// Final compiled output (post-filter stage), if compiled.
    pub fn compiled_output(&self) -> Option<&str> {
        self.compiled(CompileStage::PostFilter)
    }

    /// Whether the last compile produced output differing from the prior
    /// version.
    #[inline]
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// Whether the last compile found no prior version at all.
    #[inline]
    pub fn created(&self) -> bool {
        self.created
    }

    // ------------------------------------------------------------------------
    // Attribute resolution
    // ------------------------------------------------------------------------

    /// Resolve an attribute through the full layering.
    ///
    /// Lookup order, first hit wins: own attributes, then the site's page
    /// defaults, then built-in fallbacks (`extension` falls back to the
    /// configured output extension). `None` means unresolved everywhere -
    /// callers must not conflate it with an attribute explicitly set to a
    /// falsy value.
    pub fn attribute_named(&self, site: &Site, key: &AttributeKey) -> Option<Value> {
        if let Some(value) = self.attributes.get(key) {
            return Some(value.clone());
        }
        if let Some(value) = site.page_defaults().lookup(&self.path, key) {
            return Some(value.clone());
        }
        builtin_attribute(site, key)
    }

    /// Read-only view over resolved attributes and content.
    pub fn to_proxy<'a>(&'a self, site: &'a Site) -> PageProxy<'a> {
        PageProxy::new(self, site)
    }

    // ------------------------------------------------------------------------
    // Path resolution
    // ------------------------------------------------------------------------

    /// Absolute output location on disk, rooted under the configured
    /// output directory.
    pub fn disk_path(&self, site: &Site) -> PathBuf {
        route::disk_path(self, site)
    }

    /// Web path the compiled item is served under.
    pub fn web_path(&self, site: &Site) -> String {
        route::web_path(self, site)
    }

    // ------------------------------------------------------------------------
    // Persistence (each call is one guarded store bracket)
    // ------------------------------------------------------------------------

    /// Persist this item's source content.
    pub fn save(&self, site: &Site) -> Result<(), StoreError> {
        site.store().loading(|source| source.save(self))
    }

    /// Move this item to a new logical path (normalized like any other).
    pub fn move_to(&mut self, site: &Site, new_path: impl Into<LogicalPath>) -> Result<(), StoreError> {
        let new_path = new_path.into();
        site.store().loading(|source| source.move_to(self, &new_path))?;
        self.path = new_path;
        Ok(())
    }

    /// Delete this item from the backing store.
    pub fn delete(&self, site: &Site) -> Result<(), StoreError> {
        site.store().loading(|source| source.delete(self))
    }

    /// Whether the persisted output is stale relative to the source.
    ///
    /// Conservative: a store that cannot report mtimes makes the item
    /// outdated.
    pub fn outdated(&self, site: &Site) -> bool {
        site.store()
            .loading(|source| freshness::is_outdated(source.mtimes(&self.path).as_ref()))
    }

    // ------------------------------------------------------------------------
    // Crate-internal (compilation commit)
    // ------------------------------------------------------------------------

    /// Commit a successful compilation: replace memoized stage output and
    /// recompute the incremental flags. Never called on failure, so stale
    /// output survives a failed compile untouched.
    pub(crate) fn commit(&mut self, compiled: FxHashMap<CompileStage, String>, freshness: Freshness) {
        self.compiled = compiled;
        self.created = freshness == Freshness::Created;
        self.modified = freshness != Freshness::Unchanged;
    }
}

/// Built-in fallbacks for a small fixed set of well-known keys.
fn builtin_attribute(site: &Site, key: &AttributeKey) -> Option<Value> {
    match key {
        AttributeKey::Extension => Some(Value::String(site.config().extension.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::config::SiteConfig;
    use crate::site::Router;
    use crate::store::{DataSource, MemoryStore};

    // ------------------------------------------------------------------------
    // Test doubles (mirroring the collaborators a real build wires up)
    // ------------------------------------------------------------------------

    struct TestRouter;

    impl Router for TestRouter {
        fn disk_path_for(&self, page: &Page) -> String {
            format!("/disk{}index.html", page.path())
        }

        fn web_path_for(&self, page: &Page) -> String {
            format!("/web{}", page.path())
        }
    }

    #[derive(Default)]
    struct StoreCalls {
        ups: AtomicUsize,
        downs: AtomicUsize,
        saves: AtomicUsize,
        moves: AtomicUsize,
        deletes: AtomicUsize,
    }

    struct TestDataSource {
        calls: Arc<StoreCalls>,
    }

    impl DataSource for TestDataSource {
        fn up(&self) {
            self.calls.ups.fetch_add(1, Ordering::SeqCst);
        }

        fn down(&self) {
            self.calls.downs.fetch_add(1, Ordering::SeqCst);
        }

        fn save(&self, _page: &Page) -> Result<(), StoreError> {
            self.calls.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn move_to(&self, _page: &Page, _new_path: &LogicalPath) -> Result<(), StoreError> {
            self.calls.moves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn delete(&self, _page: &Page) -> Result<(), StoreError> {
            self.calls.deletes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn write_output(&self, _page: &Page, _output: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn tmp_config() -> SiteConfig {
        SiteConfig {
            output_dir: "tmp".into(),
            extension: "html".to_string(),
        }
    }

    fn test_site(defaults: Attributes) -> (Site, Arc<StoreCalls>) {
        let calls = Arc::new(StoreCalls::default());
        let site = Site::new(
            tmp_config(),
            Box::new(TestDataSource {
                calls: Arc::clone(&calls),
            }),
            Box::new(TestRouter),
            PageDefaults::global(defaults),
        );
        (site, calls)
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    #[test]
    fn test_new_normalizes_path() {
        let page = Page::new("content", Attributes::new(), "foo");
        assert_eq!(page.path().as_str(), "/foo/");
    }

    #[test]
    fn test_new_normalizes_attribute_keys() {
        let attributes: Attributes = [("foo", "bar")].into_iter().collect();
        let page = Page::new("content", attributes, "/foo/");
        assert_eq!(
            page.attributes()
                .get(&AttributeKey::from_name("foo"))
                .and_then(Value::as_str),
            Some("bar")
        );
    }

    // ------------------------------------------------------------------------
    // Attribute resolution
    // ------------------------------------------------------------------------

    #[test]
    fn test_attribute_named_layering() {
        let (site, _) = test_site([("quux", "stfu")].into_iter().collect());

        let page = Page::new("content", [("foo", "bar")].into_iter().collect(), "/foo/");
        assert_eq!(
            page.attribute_named(&site, &"foo".into()),
            Some(Value::from("bar"))
        );
        assert_eq!(
            page.attribute_named(&site, &AttributeKey::Extension),
            Some(Value::from("html"))
        );
        assert_eq!(
            page.attribute_named(&site, &"quux".into()),
            Some(Value::from("stfu"))
        );

        let page = Page::new("content", [("extension", "php")].into_iter().collect(), "/foo/");
        assert_eq!(page.attribute_named(&site, &"foo".into()), None);
        assert_eq!(
            page.attribute_named(&site, &AttributeKey::Extension),
            Some(Value::from("php"))
        );
        assert_eq!(
            page.attribute_named(&site, &"quux".into()),
            Some(Value::from("stfu"))
        );
    }

    #[test]
    fn test_attribute_named_falsy_is_not_absent() {
        let (site, _) = test_site(Attributes::new());
        let page = Page::new("content", [("draft", false)].into_iter().collect(), "/foo/");

        assert_eq!(
            page.attribute_named(&site, &"draft".into()),
            Some(Value::Bool(false))
        );
        assert_eq!(page.attribute_named(&site, &"missing".into()), None);
    }

    // ------------------------------------------------------------------------
    // Path resolution
    // ------------------------------------------------------------------------

    #[test]
    fn test_disk_path_for_normal_page() {
        let (site, _) = test_site(Attributes::new());
        let page = Page::new("content", [("attr", "ibutes")].into_iter().collect(), "/path/");

        assert_eq!(page.disk_path(&site), Path::new("tmp/disk/path/index.html"));
        assert_eq!(page.web_path(&site), "/web/path/");
    }

    #[test]
    fn test_disk_path_for_page_with_custom_path() {
        let (site, _) = test_site(Attributes::new());
        let page = Page::new(
            "content",
            [("custom_path", "/noobs/something.txt")].into_iter().collect(),
            "/path/",
        );

        assert_eq!(page.disk_path(&site), Path::new("tmp/noobs/something.txt"));
        assert_eq!(page.web_path(&site), "/noobs/something.txt");
    }

    // ------------------------------------------------------------------------
    // Proxy
    // ------------------------------------------------------------------------

    #[test]
    fn test_to_proxy() {
        let (site, _) = test_site(Attributes::new());
        let page = Page::new("content", [("foo", "bar")].into_iter().collect(), "/foo/");

        let proxy = page.to_proxy(&site);
        assert_eq!(proxy.attribute("foo"), Some(Value::from("bar")));
        assert_eq!(proxy.content(), "content");
        assert_eq!(proxy.path().as_str(), "/foo/");
    }

    // ------------------------------------------------------------------------
    // Persistence delegation (each call is one open/close pair)
    // ------------------------------------------------------------------------

    #[test]
    fn test_save() {
        let (site, calls) = test_site(Attributes::new());
        let page = Page::new("content", [("attr", "ibutes")].into_iter().collect(), "/path/");

        assert_eq!(calls.saves.load(Ordering::SeqCst), 0);
        page.save(&site).unwrap();

        assert_eq!(calls.saves.load(Ordering::SeqCst), 1);
        assert_eq!(calls.ups.load(Ordering::SeqCst), 1);
        assert_eq!(calls.downs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_move_to() {
        let (site, calls) = test_site(Attributes::new());
        let mut page = Page::new("content", Attributes::new(), "/path/");

        page.move_to(&site, "/new_path/").unwrap();

        assert_eq!(calls.moves.load(Ordering::SeqCst), 1);
        assert_eq!(page.path().as_str(), "/new_path/");
    }

    #[test]
    fn test_delete() {
        let (site, calls) = test_site(Attributes::new());
        let page = Page::new("content", Attributes::new(), "/path/");

        page.delete(&site).unwrap();

        assert_eq!(calls.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(calls.ups.load(Ordering::SeqCst), 1);
        assert_eq!(calls.downs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_operations_do_not_accumulate_loads() {
        let (site, calls) = test_site(Attributes::new());
        let mut page = Page::new("content", Attributes::new(), "/path/");

        page.save(&site).unwrap();
        page.move_to(&site, "/elsewhere/").unwrap();
        page.delete(&site).unwrap();

        // Three independent brackets, three balanced pairs
        assert_eq!(calls.ups.load(Ordering::SeqCst), 3);
        assert_eq!(calls.downs.load(Ordering::SeqCst), 3);
        assert_eq!(site.store().load_depth(), 0);
    }

    // ------------------------------------------------------------------------
    // Outdatedness
    // ------------------------------------------------------------------------

    #[test]
    fn test_outdated_against_memory_store() {
        let site = Site::new(
            tmp_config(),
            Box::new(MemoryStore::new()),
            Box::new(TestRouter),
            PageDefaults::default(),
        );
        let page = Page::new("content", Attributes::new(), "/path/");

        // Nothing stored: conservatively outdated
        assert!(page.outdated(&site));

        page.save(&site).unwrap();
        // Saved but never written: still outdated
        assert!(page.outdated(&site));

        site.store()
            .loading(|source| source.write_output(&page, "output"))
            .unwrap();
        assert!(!page.outdated(&site));
    }
}
