//! Backing-store abstraction and the reference-counted access guard.
//!
//! Every operation that needs the backing store "open" goes through
//! [`StoreHandle::loading`], which brackets the call chain with
//! [`DataSource::up`]/[`DataSource::down`]. Nested brackets on the same
//! handle share one open/close pair; the close is guaranteed on every exit
//! path, including errors and unwinding, and errors from the body are
//! propagated unchanged.

mod memory;

pub use memory::MemoryStore;

use parking_lot::Mutex;
use thiserror::Error;

use crate::core::LogicalPath;
use crate::debug;
use crate::freshness::Mtimes;
use crate::page::Page;

/// Backing-store errors surfaced by [`DataSource`] operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no item stored at `{0}`")]
    Missing(LogicalPath),

    #[error("page at `{0}` has no compiled content to write")]
    Uncompiled(LogicalPath),

    #[error("backing store I/O failure")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Backend(String),
}

/// Persistence backend for content items
///
/// `up`/`down` are the open/close bracket; the guard guarantees balanced
/// calls, so implementations may assume `down` follows every `up`.
/// `stored_output` and `mtimes` are optional capabilities: stores that
/// cannot answer return `None` and the caller degrades conservatively.
pub trait DataSource: Send + Sync {
    /// Open the backing store. Called once per outermost `loading` chain.
    fn up(&self);

    /// Close the backing store. Called when the outermost chain unwinds.
    fn down(&self);

    /// Persist an item's source content.
    fn save(&self, page: &Page) -> Result<(), StoreError>;

    /// Move an item to a new logical path.
    fn move_to(&self, page: &Page, new_path: &LogicalPath) -> Result<(), StoreError>;

    /// Delete an item.
    fn delete(&self, page: &Page) -> Result<(), StoreError>;

    /// Write an item's compiled output.
    fn write_output(&self, page: &Page, output: &str) -> Result<(), StoreError>;

    /// Previously persisted compiled output, if this store keeps one.
    fn stored_output(&self, path: &LogicalPath) -> Option<String> {
        let _ = path;
        None
    }

    /// Source/output mtimes, if this store can report them.
    fn mtimes(&self, path: &LogicalPath) -> Option<Mtimes> {
        let _ = path;
        None
    }
}

/// Reference-counted handle around a [`DataSource`]
///
/// Owns the open/close reference count for one store instance. All items
/// of a site share the one handle owned by the site.
pub struct StoreHandle {
    source: Box<dyn DataSource>,
    refs: Mutex<usize>,
}

impl StoreHandle {
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source,
            refs: Mutex::new(0),
        }
    }

    /// Run `body` with the backing store loaded.
    ///
    /// Opens the store on the 0->1 transition and closes it on 1->0; the
    /// decrement runs on every exit path, so an error (or panic) inside
    /// `body` still unwinds the bracket before propagating.
    pub fn loading<R>(&self, body: impl FnOnce(&dyn DataSource) -> R) -> R {
        let _token = LoadToken::acquire(self);
        body(self.source.as_ref())
    }

    /// Current nesting depth of `loading` brackets.
    pub fn load_depth(&self) -> usize {
        *self.refs.lock()
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("refs", &self.load_depth())
            .finish_non_exhaustive()
    }
}

/// RAII token for one `loading` bracket.
struct LoadToken<'a> {
    handle: &'a StoreHandle,
}

impl<'a> LoadToken<'a> {
    fn acquire(handle: &'a StoreHandle) -> Self {
        let mut refs = handle.refs.lock();
        if *refs == 0 {
            handle.source.up();
            debug!("store"; "backing store loaded");
        }
        *refs += 1;
        Self { handle }
    }
}

impl Drop for LoadToken<'_> {
    fn drop(&mut self) {
        let mut refs = self.handle.refs.lock();
        *refs -= 1;
        if *refs == 0 {
            self.handle.source.down();
            debug!("store"; "backing store unloaded");
        }
    }
}
