//! Compilation stages.

use crate::core::AttributeKey;

/// One ordered transformation step applied to an item's content
///
/// Ordering is fixed: pre-filters strictly precede layout application,
/// which strictly precedes post-filters, regardless of attribute contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileStage {
    /// Filters applied to the raw content.
    PreFilter,
    /// Layout wrapped around the pre-filtered content.
    Layout,
    /// Filters applied to the laid-out content.
    PostFilter,
}

impl CompileStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreFilter => "pre",
            Self::Layout => "layout",
            Self::PostFilter => "post",
        }
    }

    /// The attribute key declaring this stage's filter list, for the two
    /// filter stages.
    pub(crate) fn filters_key(self) -> Option<AttributeKey> {
        match self {
            Self::PreFilter => Some(AttributeKey::FiltersPre),
            Self::PostFilter => Some(AttributeKey::FiltersPost),
            Self::Layout => None,
        }
    }
}

impl std::fmt::Display for CompileStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
