//! Loam - content build core for static sites.
//!
//! Models the unit of work of a static-content build: a [`Page`] loaded
//! from a backing store, resolved to output locations, pushed through a
//! filter/layout pipeline, and classified for incremental rebuilds.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                 Site (aggregate)              │
//! │  config     router     defaults     store    │
//! └──────┬──────────┬──────────┬──────────┬───────┘
//!        │          │          │          │
//!   Page ── attribute_named ── disk/web path
//!        │
//!   Engine::compile: pre-filters -> layout -> post-filters
//!        │
//!   freshness: created / modified / unchanged
//! ```
//!
//! Collaborators (router, backing store, filters, layouts) are capability
//! traits; the core never assumes a concrete storage format.

pub mod compile;
pub mod config;
pub mod core;
pub mod freshness;
pub mod logger;
pub mod page;
pub mod site;
pub mod store;

pub use compile::{BoxError, CompileError, CompileStage, Engine, Filter, Layout, Registry};
pub use config::{ConfigError, SiteConfig};
pub use core::{AttributeKey, LogicalPath};
pub use freshness::{ContentHash, Freshness, Mtimes};
pub use page::{Attributes, DefaultsLookup, JsonMap, Page, PageDefaults, PageProxy};
pub use site::{Router, Site, TrailingIndexRouter};
pub use store::{DataSource, MemoryStore, StoreError, StoreHandle};
