//! Canonical attribute keys.
//!
//! Items accept arbitrary string keys on input; keys are normalized once
//! at construction to this symbolic form so the rest of the core never
//! compares raw strings.

use std::sync::Arc;

/// Canonical key of an item attribute
///
/// Well-known keys drive core behavior (routing, filter stages, output
/// decisions); everything else is carried verbatim as [`Custom`].
///
/// [`Custom`]: AttributeKey::Custom
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// Layout name applied between the filter stages.
    Layout,
    /// Output file extension (built-in fallback comes from config).
    Extension,
    /// Verbatim web path override; also anchors the disk path.
    CustomPath,
    /// When truthy, compiled output is never written to disk.
    SkipOutput,
    /// Ordered filter names for the pre-compilation stage.
    FiltersPre,
    /// Ordered filter names for the post-compilation stage.
    FiltersPost,
    /// Deprecated single-list filter declaration. Recognized only so
    /// compilation can reject it explicitly.
    Filters,
    /// Any other key, carried as-is.
    Custom(Arc<str>),
}

impl AttributeKey {
    /// Normalize an arbitrary string key to its canonical form.
    pub fn from_name(name: &str) -> Self {
        match name {
            "layout" => Self::Layout,
            "extension" => Self::Extension,
            "custom_path" => Self::CustomPath,
            "skip_output" => Self::SkipOutput,
            "filters_pre" => Self::FiltersPre,
            "filters_post" => Self::FiltersPost,
            "filters" => Self::Filters,
            other => Self::Custom(Arc::from(other)),
        }
    }

    /// Get the canonical string name of this key.
    pub fn name(&self) -> &str {
        match self {
            Self::Layout => "layout",
            Self::Extension => "extension",
            Self::CustomPath => "custom_path",
            Self::SkipOutput => "skip_output",
            Self::FiltersPre => "filters_pre",
            Self::FiltersPost => "filters_post",
            Self::Filters => "filters",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for AttributeKey {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
