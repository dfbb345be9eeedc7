//! # Mesh Rebuild Scheduling
//!
//! Voxel edits and chunk creation mark chunks dirty; the scheduler remembers
//! which chunks need a new mesh and hands them out in bounded batches so a burst
//! of edits never stalls a frame.
//!
//! ## Lifecycle
//! 1. `mark` inserts a chunk coordinate. Marking an already dirty chunk does
//!    nothing, so a chunk dirtied several times in one frame is rebuilt once.
//! 2. Once per frame `drain(cap)` snapshots and clears the dirty set, returns
//!    the first `cap` coordinates in insertion order, and re-queues the rest.
//! 3. Chunks marked after the drain are picked up by the next one.
//!
//! Every marked chunk is handed out at least once, and a chunk that is not
//! marked again is handed out exactly once.

use std::collections::{HashSet, VecDeque};

use crate::engine_state::voxels::chunk::chunk_coord::ChunkCoord;

/// Tracks chunks whose mesh is stale and releases them in capped batches.
#[derive(Debug, Default)]
pub struct DirtyChunkScheduler {
    /// Membership, for idempotent marking.
    dirty: HashSet<ChunkCoord>,
    /// Insertion order of the members of `dirty`.
    queued_chunks: VecDeque<ChunkCoord>,
}

impl DirtyChunkScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a chunk as needing a mesh rebuild.
    ///
    /// # Returns
    /// `true` if the chunk was not already dirty.
    pub fn mark(&mut self, coord: ChunkCoord) -> bool {
        if self.dirty.insert(coord) {
            self.queued_chunks.push_back(coord);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, coord: &ChunkCoord) -> bool {
        self.dirty.contains(coord)
    }

    pub fn len(&self) -> usize {
        self.queued_chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued_chunks.is_empty()
    }

    /// Takes at most `cap` dirty chunks for rebuilding.
    ///
    /// The whole dirty set is snapshotted and cleared; entries beyond the cap
    /// are re-inserted in their original order so the next call continues where
    /// this one stopped.
    pub fn drain(&mut self, cap: usize) -> Vec<ChunkCoord> {
        if self.queued_chunks.is_empty() {
            return Vec::new();
        }

        let mut snapshot = std::mem::take(&mut self.queued_chunks);
        self.dirty.clear();

        let batch_len = cap.min(snapshot.len());
        let batch: Vec<ChunkCoord> = snapshot.drain(..batch_len).collect();

        for coord in snapshot {
            self.mark(coord);
        }

        batch
    }
}
