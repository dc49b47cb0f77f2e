//! Client-local cache of the user's Spaces
//!
//! Mirrors the last `list_my_spaces` response. Never a source of truth: it
//! is replaced wholesale on each refetch and pruned when a dissolve
//! succeeds, so a dissolved Space does not linger in the UI until the next
//! full refresh.

use super::space::Space;
use super::types::SpaceId;

/// The list of Spaces the user belongs to, in server-defined order.
/// No client sort is applied; do not assume recency ordering.
#[derive(Debug, Clone, Default)]
pub struct SpaceDirectory {
    spaces: Vec<Space>,
}

impl SpaceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache with a fresh server snapshot
    pub fn replace_all(&mut self, spaces: Vec<Space>) {
        self.spaces = spaces;
    }

    /// Remove one Space from the cache. Returns true if it was present.
    pub fn prune(&mut self, space_id: SpaceId) -> bool {
        let before = self.spaces.len();
        self.spaces.retain(|s| s.id != space_id);
        self.spaces.len() != before
    }

    pub fn get(&self, space_id: SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == space_id)
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}
