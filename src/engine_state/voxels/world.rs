//! # World Module
//!
//! This module provides the `World` struct, the exclusive owner of every chunk
//! and the single source of truth for whether a chunk exists at a coordinate.
//!
//! ## Architecture
//!
//! The world uses sparse storage: chunks are created on demand, generated from
//! the terrain noise exactly once, and kept forever. Unloading is not
//! implemented, so memory grows with the explored area.
//!
//! ## Block access
//!
//! All voxel reads and writes in world coordinates go through the world, which
//! floor-divides to the owning chunk and delegates with local coordinates.
//! Reads outside `[0, CHUNK_HEIGHT)` or in unloaded chunks yield air; writes
//! there are ignored. Chunk-relative accessors accept local coordinates outside
//! the chunk and resolve them through the neighbour.
//!
//! ## Dirty propagation
//!
//! Every real change marks the owning chunk dirty. A change on the `x` or `z`
//! border also marks the loaded neighbour across that border, because the
//! neighbour's culling depends on the changed block.

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, trace};

use crate::engine_state::{
    config::TerrainConfig,
    rendering::{meshing, MeshSink},
    task_management::DirtyChunkScheduler,
};

use super::{
    block::block_type::BlockType,
    chunk::{
        chunk_coord::ChunkCoord, terrain::TerrainGenerator, Chunk, CHUNK_DEPTH, CHUNK_HEIGHT,
        CHUNK_WIDTH,
    },
};

/// A voxel world composed of chunk columns.
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkCoord, Chunk>,
    /// Height-map generator used for every new chunk.
    terrain: TerrainGenerator,
    /// Chunks whose mesh is out of date.
    dirty_chunks: DirtyChunkScheduler,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `seed` - Seed of the terrain noise
    /// * `terrain_config` - Shape parameters of the height map
    pub fn new(seed: u32, terrain_config: TerrainConfig) -> Self {
        debug!("Creating world with seed {}", seed);
        World {
            chunks: HashMap::new(),
            terrain: TerrainGenerator::new(seed, terrain_config),
            dirty_chunks: DirtyChunkScheduler::new(),
        }
    }

    /// Returns the chunk at `coord`, creating and generating it first if needed.
    ///
    /// A newly created chunk is marked dirty so its first mesh gets built, along
    /// with its loaded side neighbours.
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> &Chunk {
        if !self.chunks.contains_key(&coord) {
            trace!("Generating chunk {:?}", coord);
            let chunk = Chunk::generate(coord, &self.terrain);
            self.chunks.insert(coord, chunk);
            self.mark_created(coord);
        }
        &self.chunks[&coord]
    }

    /// Stores a chunk that was built elsewhere, unless one already exists at its
    /// coordinate.
    ///
    /// # Returns
    /// `true` if the chunk was stored.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> bool {
        let coord = chunk.position;
        if self.chunks.contains_key(&coord) {
            return false;
        }
        self.chunks.insert(coord, chunk);
        self.mark_created(coord);
        true
    }

    /// Queues a new chunk and its loaded side neighbours, whose border columns
    /// were last meshed against air.
    fn mark_created(&mut self, coord: ChunkCoord) {
        self.dirty_chunks.mark(coord);
        for (dx, dz) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            self.mark_dirty(coord.offset(dx, dz));
        }
    }

    pub fn get_chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates over every loaded chunk.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// The set of chunks waiting for a mesh rebuild.
    pub fn dirty_chunks(&self) -> &DirtyChunkScheduler {
        &self.dirty_chunks
    }

    /// Marks a loaded chunk dirty. Unloaded coordinates are ignored.
    pub fn mark_dirty(&mut self, coord: ChunkCoord) {
        if self.chunks.contains_key(&coord) {
            self.dirty_chunks.mark(coord);
        }
    }

    /// Block at a world position.
    ///
    /// Air when `position.y` is outside `[0, CHUNK_HEIGHT)` or the chunk is not
    /// loaded.
    pub fn get_block_world(&self, position: Point3<i32>) -> BlockType {
        if !(0..CHUNK_HEIGHT).contains(&position.y) {
            return BlockType::AIR;
        }
        let coord = ChunkCoord::from_world(position.x, position.z);
        self.chunks
            .get(&coord)
            .and_then(|chunk| chunk.get_block_local(coord.to_local(position)))
            .unwrap_or(BlockType::AIR)
    }

    /// Writes a block at a world position.
    ///
    /// # Returns
    /// `true` if a block changed. Writes outside the vertical range, into
    /// unloaded chunks, or of the type already present change nothing.
    pub fn set_block_world(&mut self, position: Point3<i32>, block_type: BlockType) -> bool {
        if !(0..CHUNK_HEIGHT).contains(&position.y) {
            return false;
        }
        let coord = ChunkCoord::from_world(position.x, position.z);
        if !self.chunks.contains_key(&coord) {
            return false;
        }
        self.set_chunk_block(coord, coord.to_local(position), block_type)
    }

    pub fn is_solid_world(&self, position: Point3<i32>) -> bool {
        self.get_block_world(position).is_solid()
    }

    /// Block at a position relative to the chunk at `coord`.
    ///
    /// Local coordinates outside the chunk are resolved in world space, so they
    /// read from the neighbour (or air if it is not loaded).
    pub fn get_chunk_block(&self, coord: ChunkCoord, local: Point3<i32>) -> BlockType {
        if Chunk::contains_local(local) {
            if let Some(block_type) = self
                .chunks
                .get(&coord)
                .and_then(|chunk| chunk.get_block_local(local))
            {
                return block_type;
            }
        }
        self.get_block_world(coord.to_world(local))
    }

    /// Writes a block at a position relative to the chunk at `coord`, with the
    /// same forwarding rules as [`World::get_chunk_block`].
    ///
    /// # Returns
    /// `true` if a block changed.
    pub fn set_chunk_block(
        &mut self,
        coord: ChunkCoord,
        local: Point3<i32>,
        block_type: BlockType,
    ) -> bool {
        if !Chunk::contains_local(local) {
            return self.set_block_world(coord.to_world(local), block_type);
        }

        let changed = match self.chunks.get_mut(&coord) {
            Some(chunk) => chunk.set_block_local(local, block_type).unwrap_or(false),
            None => false,
        };
        if !changed {
            return false;
        }

        self.dirty_chunks.mark(coord);
        if local.x == 0 {
            self.mark_dirty(coord.offset(-1, 0));
        }
        if local.x == CHUNK_WIDTH - 1 {
            self.mark_dirty(coord.offset(1, 0));
        }
        if local.z == 0 {
            self.mark_dirty(coord.offset(0, -1));
        }
        if local.z == CHUNK_DEPTH - 1 {
            self.mark_dirty(coord.offset(0, 1));
        }
        true
    }

    /// Rebuilds the meshes of at most `cap` dirty chunks and hands each one to
    /// `sink`. Dirty chunks beyond the cap stay queued for the next call.
    ///
    /// # Returns
    /// The number of chunks rebuilt.
    pub fn rebuild_dirty<S: MeshSink>(&mut self, cap: usize, sink: &mut S) -> usize {
        let batch = self.dirty_chunks.drain(cap);
        let mut rebuilt = 0;

        for coord in batch {
            if !self.chunks.contains_key(&coord) {
                continue;
            }

            let mesh = meshing::build_chunk_mesh(self, coord);
            let cubes = mesh.as_ref().map(|mesh| mesh.cubes.clone());
            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.mark_meshed(cubes);
            }
            sink.install_chunk_mesh(coord, mesh);
            rebuilt += 1;
        }

        rebuilt
    }
}
