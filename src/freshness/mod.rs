//! Freshness detection: content-hash (blake3) comparison and mtime-based
//! outdatedness for incremental rebuilds.
//!
//! Compilation compares the newly produced output against the previously
//! known one by hash; backing stores that can report timestamps feed the
//! outdatedness check, and stores that cannot are treated conservatively.

use std::time::SystemTime;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash a chunk of content.
    pub fn of(content: impl AsRef<[u8]>) -> Self {
        Self(*blake3::hash(content.as_ref()).as_bytes())
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string (for debugging/display).
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display first 16 chars of hex for brevity
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Incremental-build classification of a compiled item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No prior output existed.
    Created,
    /// Prior output existed and differs from the new output.
    Modified,
    /// Prior output is identical to the new output.
    Unchanged,
}

/// Classify newly compiled output against the prior version, if any.
pub fn classify(prior: Option<&str>, new: &str) -> Freshness {
    match prior {
        None => Freshness::Created,
        Some(old) if ContentHash::of(old) == ContentHash::of(new) => Freshness::Unchanged,
        Some(_) => Freshness::Modified,
    }
}

/// Source/output modification times reported by a backing store
#[derive(Debug, Clone, Copy)]
pub struct Mtimes {
    /// When the source content was last written.
    pub source: SystemTime,
    /// When the compiled output was last written, if ever.
    pub output: Option<SystemTime>,
}

/// Check whether an item is outdated relative to its persisted output.
///
/// A store that cannot report mtimes (`None`) makes the item outdated, so
/// it is rebuilt rather than silently skipped.
pub fn is_outdated(mtimes: Option<&Mtimes>) -> bool {
    let Some(times) = mtimes else {
        return true;
    };
    let Some(output_time) = times.output else {
        return true;
    };
    times.source > output_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_content_hash_equality() {
        assert_eq!(ContentHash::of("hello"), ContentHash::of("hello"));
        assert_ne!(ContentHash::of("hello"), ContentHash::of("goodbye"));
    }

    #[test]
    fn test_content_hash_display() {
        let hash = ContentHash::of("hello");
        assert_eq!(format!("{hash}").len(), 16);
    }

    #[test]
    fn test_classify_created() {
        assert_eq!(classify(None, "output"), Freshness::Created);
    }

    #[test]
    fn test_classify_modified() {
        assert_eq!(classify(Some("old"), "new"), Freshness::Modified);
    }

    #[test]
    fn test_classify_unchanged() {
        assert_eq!(classify(Some("same"), "same"), Freshness::Unchanged);
    }

    #[test]
    fn test_outdated_without_mtimes() {
        assert!(is_outdated(None));
    }

    #[test]
    fn test_outdated_without_output() {
        let times = Mtimes {
            source: SystemTime::now(),
            output: None,
        };
        assert!(is_outdated(Some(&times)));
    }

    #[test]
    fn test_outdated_stale_output() {
        let output = SystemTime::now();
        let times = Mtimes {
            source: output + Duration::from_secs(5),
            output: Some(output),
        };
        assert!(is_outdated(Some(&times)));
    }

    #[test]
    fn test_fresh_output() {
        let source = SystemTime::now();
        let times = Mtimes {
            source,
            output: Some(source + Duration::from_secs(5)),
        };
        assert!(!is_outdated(Some(&times)));
    }
}
