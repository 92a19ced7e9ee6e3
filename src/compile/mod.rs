//! Compilation engine for content items.
//!
//! Applies the ordered stages (pre-filters, layout, post-filters) to one
//! item at a time, memoizes per-stage output, and classifies the result
//! for incremental rebuilds. Compiling one item may recursively trigger
//! compilation of another (a layout inlining a second item); the
//! engine-owned compilation stack turns self-dependence into a typed
//! cycle error instead of unbounded recursion.

mod error;
mod registry;
mod stage;

pub use error::CompileError;
pub use registry::{BoxError, Filter, Layout, Registry};
pub use stage::CompileStage;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;
use smallvec::SmallVec;

use crate::core::{AttributeKey, LogicalPath};
use crate::debug;
use crate::freshness;
use crate::page::{Page, PageProxy};
use crate::site::Site;
use crate::store::StoreError;

/// Compilation engine, one per build run
///
/// Owns the filter/layout registry and the cycle-detection stack. The
/// stack is engine state, not ambient state: recursive compilation goes
/// through the same engine instance.
pub struct Engine {
    registry: Registry,
    stack: Mutex<Vec<LogicalPath>>,
}

impl Engine {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            stack: Mutex::new(Vec::new()),
        }
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Snapshot of the in-progress compilation stack (outermost first).
    pub fn stack(&self) -> Vec<LogicalPath> {
        self.stack.lock().clone()
    }

    /// Compile one item through all stages.
    ///
    /// On success the item's memoized stage output is replaced and its
    /// `created`/`modified` flags recomputed against the prior output. On
    /// failure the item keeps whatever compiled content it had - stages
    /// run against a scratch buffer that is only committed at the end.
    pub fn compile(&self, site: &Site, page: &mut Page) -> Result<(), CompileError> {
        let _frame = StackFrame::push(&self.stack, page.path())?;

        // Legacy single-list filter declaration: deliberate hard stop.
        if page
            .attribute_named(site, &AttributeKey::Filters)
            .is_some_and(|value| !value.is_null())
        {
            return Err(CompileError::NoLongerSupported);
        }

        debug!("compile"; "compiling {}", page.path());
        let (compiled, output) = self.run_stages(site, page)?;

        // Previous output: the memoized one if this page was compiled
        // before, otherwise whatever the backing store kept.
        let prior = match page.compiled_output() {
            Some(previous) => Some(previous.to_string()),
            None => site
                .store()
                .loading(|source| source.stored_output(page.path())),
        };

        let freshness = freshness::classify(prior.as_deref(), &output);
        page.commit(compiled, freshness);
        Ok(())
    }

    /// Write an item's compiled output through the backing store.
    ///
    /// Honors the `skip_output` attribute: returns `Ok(false)` without
    /// touching the store when set.
    pub fn write(&self, site: &Site, page: &Page) -> Result<bool, StoreError> {
        if page
            .attribute_named(site, &AttributeKey::SkipOutput)
            .is_some_and(|value| is_truthy(&value))
        {
            debug!("compile"; "skipping output for {}", page.path());
            return Ok(false);
        }

        let output = page
            .compiled_output()
            .ok_or_else(|| StoreError::Uncompiled(page.path().clone()))?;
        site.store()
            .loading(|source| source.write_output(page, output))?;
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Stages
    // ------------------------------------------------------------------------

    fn run_stages(
        &self,
        site: &Site,
        page: &Page,
    ) -> Result<(FxHashMap<CompileStage, String>, String), CompileError> {
        let proxy = page.to_proxy(site);
        let mut compiled = FxHashMap::default();

        let pre = self.apply_filters(CompileStage::PreFilter, &proxy, page.content().to_string())?;
        compiled.insert(CompileStage::PreFilter, pre.clone());

        let laid_out = self.apply_layout(&proxy, pre)?;
        compiled.insert(CompileStage::Layout, laid_out.clone());

        let post = self.apply_filters(CompileStage::PostFilter, &proxy, laid_out)?;
        compiled.insert(CompileStage::PostFilter, post.clone());

        Ok((compiled, post))
    }

    fn apply_filters(
        &self,
        stage: CompileStage,
        proxy: &PageProxy<'_>,
        input: String,
    ) -> Result<String, CompileError> {
        let mut content = input;
        for name in filter_names(proxy, stage) {
            let filter = self
                .registry
                .filter(&name)
                .ok_or_else(|| CompileError::UnknownFilter(name.clone()))?;
            debug!("compile"; "applying filter `{}` ({} stage) to {}", name, stage, proxy.path());
            content = filter.apply(&content, proxy).map_err(|source| {
                CompileError::Stage {
                    stage,
                    name: name.clone(),
                    source,
                }
            })?;
        }
        Ok(content)
    }

    fn apply_layout(&self, proxy: &PageProxy<'_>, input: String) -> Result<String, CompileError> {
        let Some(value) = proxy.get(&AttributeKey::Layout) else {
            return Ok(input);
        };
        if value.is_null() {
            return Ok(input);
        }
        let Some(name) = value.as_str() else {
            return Err(CompileError::UnknownLayout(value.to_string()));
        };

        let layout = self
            .registry
            .layout(name)
            .ok_or_else(|| CompileError::UnknownLayout(name.to_string()))?;
        debug!("compile"; "applying layout `{}` to {}", name, proxy.path());
        layout
            .render(&input, proxy)
            .map_err(|source| CompileError::Stage {
                stage: CompileStage::Layout,
                name: name.to_string(),
                source,
            })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Registry::new())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry)
            .field("stack", &self.stack())
            .finish()
    }
}

/// Filter names declared for a stage, through the full attribute layering.
///
/// A single string is accepted as a one-element list; non-string entries
/// are ignored.
fn filter_names(proxy: &PageProxy<'_>, stage: CompileStage) -> SmallVec<[String; 4]> {
    let Some(key) = stage.filters_key() else {
        return SmallVec::new();
    };
    match proxy.get(&key) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(name)) => {
            let mut names = SmallVec::new();
            names.push(name);
            names
        }
        _ => SmallVec::new(),
    }
}

/// Attribute truthiness: anything but `null` and `false`.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// RAII frame on the cycle-detection stack.
///
/// Push fails if the path is already being compiled; the pop runs on
/// every exit path, success or failure, so an aborted compilation never
/// corrupts the stack.
struct StackFrame<'a> {
    stack: &'a Mutex<Vec<LogicalPath>>,
}

impl<'a> StackFrame<'a> {
    fn push(stack: &'a Mutex<Vec<LogicalPath>>, path: &LogicalPath) -> Result<Self, CompileError> {
        let mut frames = stack.lock();
        if frames.contains(path) {
            let mut trace = frames.clone();
            trace.push(path.clone());
            return Err(CompileError::Cyclic(trace));
        }
        frames.push(path.clone());
        Ok(Self { stack })
    }
}

impl Drop for StackFrame<'_> {
    fn drop(&mut self) {
        self.stack.lock().pop();
    }
}
