//! Logical path type for type-safe item addressing.
//!
//! A logical path locates a content item inside the site tree, independent
//! of any on-disk or on-web rendering of it.

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Canonical logical path of a content item
///
/// Invariants:
/// - Always starts with `/`
/// - Always ends with `/`
///
/// Constructor inputs missing either slash are normalized, so a malformed
/// path is unrepresentable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalPath(Arc<str>);

impl LogicalPath {
    /// Create a logical path, normalizing leading/trailing slashes.
    ///
    /// `"foo"` -> `/foo/`, `"/foo"` -> `/foo/`, `""` -> `/`
    pub fn new(input: &str) -> Self {
        let trimmed = input.trim();

        // Handle root path specially
        if trimmed.is_empty() || trimmed == "/" {
            return Self(Arc::from("/"));
        }

        // Add leading slash if missing
        let with_leading = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        // Add trailing slash if missing
        let normalized = if with_leading.ends_with('/') {
            with_leading
        } else {
            format!("{with_leading}/")
        };

        Self(Arc::from(normalized))
    }

    /// Get the path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the root path (`/`).
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "/"
    }

    /// Get the parent path.
    ///
    /// `/posts/hello/` -> `/posts/`, `/posts/` -> `/`, `/` -> `None`
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.0.trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.rfind('/') {
            Some(0) => Some(Self(Arc::from("/"))),
            Some(idx) => Some(Self(Arc::from(format!("{}/", &trimmed[..idx])))),
            None => Some(Self(Arc::from("/"))),
        }
    }
}

impl std::fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for LogicalPath {
    fn default() -> Self {
        Self::new("/")
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LogicalPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for LogicalPath {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for LogicalPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for LogicalPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for LogicalPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for LogicalPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LogicalPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}
