// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared-memory segment lifecycle.
//!
//! Bulk payloads (rendered images, large value blobs) travel in named segments
//! owned by the collaborator. The protocol core only routes "release these
//! keys" requests to the right hook and hands out key numbers.

use indexmap::IndexSet;
use tracing::debug;

/// Segment families known to this protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Values,
    Image,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 2] = [SegmentKind::Values, SegmentKind::Image];

    /// Type name used on the wire and in segment names.
    pub fn type_name(self) -> &'static str {
        match self {
            SegmentKind::Values => "Values",
            SegmentKind::Image => "Image",
        }
    }

    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == type_name)
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Name under which a segment is published, e.g. `Image-12`.
pub fn segment_name(kind: SegmentKind, key: i32) -> String {
    format!("{}-{}", kind.type_name(), key)
}

/// Release hooks implemented by whoever owns the segments.
pub trait SharedMemoryHooks {
    fn release_values(&mut self, keys: &[i32]);
    fn release_images(&mut self, keys: &[i32]);
}

/// Route a release request by type name.
///
/// Unknown type names are ignored: a newer peer may use segment types this
/// build does not know about.
pub fn release<H>(hooks: &mut H, type_name: &str, keys: &[i32]) -> Option<SegmentKind>
where
    H: SharedMemoryHooks + ?Sized,
{
    let kind = SegmentKind::from_type_name(type_name);
    match kind {
        Some(SegmentKind::Values) => hooks.release_values(keys),
        Some(SegmentKind::Image) => hooks.release_images(keys),
        None => debug!(type_name, ?keys, "ignoring release for unknown segment type"),
    }
    kind
}

/// Hands out process-unique segment keys, starting at 1.
#[derive(Debug, Default)]
pub struct KeyAllocator {
    last: i32,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_key(&mut self) -> i32 {
        self.last = self.last.wrapping_add(1).max(1);
        self.last
    }
}

/// Bookkeeping of segments that have been published and not yet released.
#[derive(Debug, Default)]
pub struct SegmentRegistry {
    keys: KeyAllocator,
    live: IndexSet<(SegmentKind, i32)>,
}

impl SegmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a key for a new segment of `kind`.
    pub fn register(&mut self, kind: SegmentKind) -> i32 {
        let key = self.keys.next_key();
        self.live.insert((kind, key));
        debug!(segment = %segment_name(kind, key), "registered shared memory segment");
        key
    }

    /// Forget the given keys, returning how many were actually live.
    pub fn release(&mut self, kind: SegmentKind, keys: &[i32]) -> usize {
        keys.iter().filter(|key| self.live.shift_remove(&(kind, **key))).count()
    }

    pub fn is_live(&self, kind: SegmentKind, key: i32) -> bool {
        self.live.contains(&(kind, key))
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
#[path = "shared_memory_tests.rs"]
mod tests;
