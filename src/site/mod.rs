//! Site aggregation root.
//!
//! A [`Site`] owns the pieces every page delegates to: the build
//! configuration, the routing strategy, the fallback attribute layer, and
//! the guarded backing store. The core only ever reads from it.

mod router;

pub use router::{Router, TrailingIndexRouter};

use crate::config::SiteConfig;
use crate::page::PageDefaults;
use crate::store::{DataSource, StoreHandle};

/// Aggregation root for one site build
pub struct Site {
    config: SiteConfig,
    store: StoreHandle,
    router: Box<dyn Router>,
    page_defaults: PageDefaults,
}

impl Site {
    pub fn new(
        config: SiteConfig,
        data_source: Box<dyn DataSource>,
        router: Box<dyn Router>,
        page_defaults: PageDefaults,
    ) -> Self {
        Self {
            config,
            store: StoreHandle::new(data_source),
            router,
            page_defaults,
        }
    }

    #[inline]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    #[inline]
    pub fn router(&self) -> &dyn Router {
        self.router.as_ref()
    }

    #[inline]
    pub fn page_defaults(&self) -> &PageDefaults {
        &self.page_defaults
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
