//! Asset identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A process-wide unique asset identifier.
///
/// IDs are allocated from a monotonic counter starting at 1 and are never
/// reused, so a cache keyed by `AssetId` cannot confuse a dropped asset with
/// a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(u64);

impl AssetId {
    /// Allocate the next identifier.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_and_nonzero() {
        let a = AssetId::next();
        let b = AssetId::next();
        assert!(a.raw() >= 1);
        assert!(b > a);
    }

    #[test]
    fn test_display() {
        let id = AssetId::next();
        assert_eq!(id.to_string(), format!("asset#{}", id.raw()));
    }
}
