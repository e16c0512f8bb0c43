//! Version tracking between source objects and their derived mirrors.
//!
//! A source embeds a [`CacheState`] and calls [`CacheState::mark_dirty`] on
//! every mutation. Each derived object keeps a [`SyncState`] naming its
//! source and the source version it was last built from. Several consumers
//! can mirror one source because each keeps its own `SyncState`.

use crate::id::AssetId;

/// Anything that has an identity and a version.
pub trait Cacheable {
    /// Identity of the source.
    fn cache_id(&self) -> AssetId;

    /// Current version. Changes on every mutation.
    fn version(&self) -> u64;
}

/// Version counter embedded in a source object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheState {
    version: u64,
}

impl CacheState {
    /// A fresh state at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current version.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Record a mutation.
    pub fn mark_dirty(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// Per-consumer record of the last mirrored source version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncState {
    source: AssetId,
    synced_version: Option<u64>,
}

impl SyncState {
    /// A record for `source` that has never been synced.
    #[must_use]
    pub fn new(source: AssetId) -> Self {
        Self {
            source,
            synced_version: None,
        }
    }

    /// The source this record tracks.
    #[must_use]
    pub fn source(&self) -> AssetId {
        self.source
    }

    /// The source version last mirrored, if any.
    #[must_use]
    pub fn synced_version(&self) -> Option<u64> {
        self.synced_version
    }

    /// Whether `source` has changed since the last sync.
    #[must_use]
    pub fn is_dirty<S: Cacheable + ?Sized>(&self, source: &S) -> bool {
        debug_assert_eq!(source.cache_id(), self.source, "sync state used with a foreign source");
        self.synced_version != Some(source.version())
    }

    /// Record that `source` has been mirrored at its current version.
    pub fn mark_updated<S: Cacheable + ?Sized>(&mut self, source: &S) {
        self.synced_version = Some(source.version());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Source {
        id: AssetId,
        state: CacheState,
    }

    impl Cacheable for Source {
        fn cache_id(&self) -> AssetId {
            self.id
        }

        fn version(&self) -> u64 {
            self.state.version()
        }
    }

    fn source() -> Source {
        Source {
            id: AssetId::next(),
            state: CacheState::new(),
        }
    }

    #[test]
    fn test_new_sync_state_is_dirty() {
        let src = source();
        let sync = SyncState::new(src.id);
        assert!(sync.is_dirty(&src));
        assert_eq!(sync.synced_version(), None);
    }

    #[test]
    fn test_mark_updated_then_mutate() {
        let mut src = source();
        let mut sync = SyncState::new(src.id);
        sync.mark_updated(&src);
        assert!(!sync.is_dirty(&src));

        src.state.mark_dirty();
        assert!(sync.is_dirty(&src));
        sync.mark_updated(&src);
        assert!(!sync.is_dirty(&src));
    }

    #[test]
    fn test_two_consumers_track_independently() {
        let mut src = source();
        let mut first = SyncState::new(src.id);
        let mut second = SyncState::new(src.id);
        first.mark_updated(&src);
        second.mark_updated(&src);

        src.state.mark_dirty();
        first.mark_updated(&src);
        assert!(!first.is_dirty(&src));
        assert!(second.is_dirty(&src));
    }
}
