//! Path resolution - item to disk/web output mapping.
//!
//! A `custom_path` attribute overrides the routing strategy verbatim;
//! otherwise the site's router decides. Disk paths are rooted under the
//! configured output directory. No normalization beyond path-joining -
//! the router is responsible for producing router-correct paths.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::AttributeKey;
use crate::page::Page;
use crate::site::Site;

/// Resolve the on-disk output path for an item.
pub(crate) fn disk_path(page: &Page, site: &Site) -> PathBuf {
    let site_relative = match custom_path(page, site) {
        Some(custom) => custom,
        None => site.router().disk_path_for(page),
    };
    join_under(&site.config().output_dir, &site_relative)
}

/// Resolve the web path for an item.
pub(crate) fn web_path(page: &Page, site: &Site) -> String {
    match custom_path(page, site) {
        Some(custom) => custom,
        None => site.router().web_path_for(page),
    }
}

/// The `custom_path` override, resolved through the full attribute layering.
fn custom_path(page: &Page, site: &Site) -> Option<String> {
    page.attribute_named(site, &AttributeKey::CustomPath)
        .and_then(|value| value.as_str().map(str::to_string))
}

/// Join a site-relative path (`/…`) under the output directory.
///
/// `Path::join` would discard the base for absolute paths, so the leading
/// slash is stripped first.
fn join_under(output_dir: &Path, site_relative: &str) -> PathBuf {
    output_dir.join(site_relative.trim_start_matches('/'))
}
