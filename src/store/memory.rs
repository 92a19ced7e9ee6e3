//! In-memory backing store.
//!
//! The reference [`DataSource`] implementation: keeps source content and
//! compiled output per logical path, with write timestamps so the
//! outdatedness check has something to compare. Useful for tests and for
//! drivers that materialize content from elsewhere.

use std::time::SystemTime;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::{DataSource, StoreError};
use crate::core::LogicalPath;
use crate::freshness::Mtimes;
use crate::page::Page;

#[derive(Debug, Default, Clone)]
struct StoredItem {
    content: String,
    output: Option<String>,
    saved_at: Option<SystemTime>,
    written_at: Option<SystemTime>,
}

/// In-memory [`DataSource`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<FxHashMap<LogicalPath, StoredItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an item exists at the given path.
    pub fn contains(&self, path: &LogicalPath) -> bool {
        self.items.lock().contains_key(path)
    }

    /// Get the stored source content for a path.
    pub fn stored_content(&self, path: &LogicalPath) -> Option<String> {
        self.items.lock().get(path).map(|item| item.content.clone())
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl DataSource for MemoryStore {
    fn up(&self) {}

    fn down(&self) {}

    fn save(&self, page: &Page) -> Result<(), StoreError> {
        let mut items = self.items.lock();
        let item = items.entry(page.path().clone()).or_default();
        item.content = page.content().to_string();
        item.saved_at = Some(SystemTime::now());
        Ok(())
    }

    fn move_to(&self, page: &Page, new_path: &LogicalPath) -> Result<(), StoreError> {
        let mut items = self.items.lock();
        let item = items
            .remove(page.path())
            .ok_or_else(|| StoreError::Missing(page.path().clone()))?;
        items.insert(new_path.clone(), item);
        Ok(())
    }

    fn delete(&self, page: &Page) -> Result<(), StoreError> {
        self.items
            .lock()
            .remove(page.path())
            .map(|_| ())
            .ok_or_else(|| StoreError::Missing(page.path().clone()))
    }

    fn write_output(&self, page: &Page, output: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock();
        let item = items.entry(page.path().clone()).or_default();
        item.output = Some(output.to_string());
        item.written_at = Some(SystemTime::now());
        Ok(())
    }

    fn stored_output(&self, path: &LogicalPath) -> Option<String> {
        self.items.lock().get(path).and_then(|item| item.output.clone())
    }

    fn mtimes(&self, path: &LogicalPath) -> Option<Mtimes> {
        let items = self.items.lock();
        let item = items.get(path)?;
        let source = item.saved_at?;
        Some(Mtimes {
            source,
            output: item.written_at,
        })
    }
}
