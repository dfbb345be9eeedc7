//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense column of
//! `CHUNK_WIDTH x CHUNK_HEIGHT x CHUNK_DEPTH` blocks, the unit of terrain
//! generation, storage, and mesh rebuild.
//!
//! ## Storage
//!
//! Blocks are stored in a flat vector in `y`, then `z`, then `x` major order:
//! `index = y * CHUNK_WIDTH * CHUNK_DEPTH + z * CHUNK_WIDTH + x`.
//! Local coordinates outside the chunk have no index; [`Chunk::local_index`]
//! reports them as `None`, which callers treat as "ask the neighbour" rather
//! than as an error. The forwarding itself is done by the
//! [`World`](crate::engine_state::voxels::world::World), the only owner that can
//! see the neighbours.
//!
//! ## Mesh state
//!
//! A chunk does not keep its vertex buffers: every rebuild produces a fresh
//! mesh that is moved into the renderer. The chunk only records whether its
//! last mesh is stale and which cubes that mesh contained (its rendered
//! footprint), which is what block targeting intersects against.

use cgmath::Point3;

use super::block::{block_type::BlockType, Block};

pub mod chunk_coord;
pub mod chunk_iteration;
pub mod terrain;

use chunk_coord::ChunkCoord;
use chunk_iteration::ChunkBlockIterator;
use terrain::TerrainGenerator;

/// Size of a chunk along X, in blocks.
pub const CHUNK_WIDTH: i32 = 16;
/// Size of a chunk along Y, in blocks. Chunks span the full world height.
pub const CHUNK_HEIGHT: i32 = 64;
/// Size of a chunk along Z, in blocks.
pub const CHUNK_DEPTH: i32 = 16;
/// The number of blocks in one horizontal layer of a chunk.
pub const CHUNK_LAYER_SIZE: usize = (CHUNK_WIDTH * CHUNK_DEPTH) as usize;
/// The total number of blocks in a chunk.
pub const CHUNK_SIZE: usize = CHUNK_LAYER_SIZE * CHUNK_HEIGHT as usize;

/// A fixed-size column of voxel blocks.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkCoord,

    /// Dense block storage, see the module docs for the layout.
    blocks: Vec<Block>,

    /// Whether the voxels changed since the last mesh was handed out.
    mesh_stale: bool,

    /// World positions of the cubes in the last mesh handed to the renderer,
    /// or `None` when the chunk has never been meshed or meshed to nothing.
    rendered_cubes: Option<Vec<Point3<i32>>>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    pub fn empty(position: ChunkCoord) -> Self {
        Chunk {
            position,
            blocks: vec![Block::default(); CHUNK_SIZE],
            mesh_stale: true,
            rendered_cubes: None,
        }
    }

    /// Creates a chunk and fills it from the terrain generator.
    ///
    /// Terrain generation is part of construction, so it runs exactly once per
    /// chunk.
    pub fn generate(position: ChunkCoord, terrain: &TerrainGenerator) -> Self {
        let mut chunk = Self::empty(position);
        chunk.generate_terrain(terrain);
        chunk
    }

    fn generate_terrain(&mut self, terrain: &TerrainGenerator) {
        let (origin_x, origin_z) = self.position.origin();
        for z in 0..CHUNK_DEPTH {
            for x in 0..CHUNK_WIDTH {
                let height = terrain.column_height(origin_x + x, origin_z + z);
                for y in 0..CHUNK_HEIGHT {
                    let block_type = TerrainGenerator::block_for_height(y, height);
                    if block_type == BlockType::AIR {
                        break;
                    }
                    if let Some(index) = Self::local_index(x, y, z) {
                        self.blocks[index] = Block::new(block_type);
                    }
                }
            }
        }
    }

    /// Flat index of a local position, or `None` when any coordinate is
    /// outside `[0, size)` on its axis.
    pub fn local_index(x: i32, y: i32, z: i32) -> Option<usize> {
        if !(0..CHUNK_WIDTH).contains(&x)
            || !(0..CHUNK_HEIGHT).contains(&y)
            || !(0..CHUNK_DEPTH).contains(&z)
        {
            return None;
        }
        Some(y as usize * CHUNK_LAYER_SIZE + z as usize * CHUNK_WIDTH as usize + x as usize)
    }

    /// Whether a local position lies inside this chunk.
    pub fn contains_local(local: Point3<i32>) -> bool {
        Self::local_index(local.x, local.y, local.z).is_some()
    }

    /// Block at a local position, or `None` when the position is outside the
    /// chunk and must be resolved through a neighbour.
    pub fn get_block_local(&self, local: Point3<i32>) -> Option<BlockType> {
        Self::local_index(local.x, local.y, local.z).map(|index| self.blocks[index].get_block_type())
    }

    /// Writes a block at a local position.
    ///
    /// # Returns
    /// - `None` if the position is outside the chunk
    /// - `Some(false)` if the block already had that type (nothing written)
    /// - `Some(true)` if the block changed; the mesh is marked stale
    pub fn set_block_local(&mut self, local: Point3<i32>, block_type: BlockType) -> Option<bool> {
        let index = Self::local_index(local.x, local.y, local.z)?;
        if self.blocks[index].get_block_type() == block_type {
            return Some(false);
        }
        self.blocks[index] = Block::new(block_type);
        self.mesh_stale = true;
        Some(true)
    }

    /// Iterates over every non-air block with its local position.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    pub(crate) fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether the voxels changed since the last mesh was handed out.
    pub fn is_mesh_stale(&self) -> bool {
        self.mesh_stale
    }

    /// The cubes of the last mesh handed to the renderer, in world space.
    pub fn rendered_cubes(&self) -> Option<&[Point3<i32>]> {
        self.rendered_cubes.as_deref()
    }

    /// Records the footprint of a freshly built mesh and clears staleness.
    pub(crate) fn mark_meshed(&mut self, cubes: Option<Vec<Point3<i32>>>) {
        self.rendered_cubes = cubes;
        self.mesh_stale = false;
    }
}
