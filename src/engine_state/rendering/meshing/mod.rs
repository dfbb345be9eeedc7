//! Mesh generation for voxel chunks.
//!
//! Culling is done per cube, not per face: a solid block is emitted as a whole
//! unit cube as soon as any one of its six neighbours is not solid, and emitted
//! not at all when it is fully enclosed. Neighbour lookups go through the world,
//! so blocks on a chunk border are culled against the adjacent chunk (an
//! unloaded neighbour counts as air).
//!
//! Faces are not merged; every visible block costs 24 vertices and 36 indices.

mod mesh;

pub use mesh::*;

use log::trace;

use crate::engine_state::voxels::{
    block::block_side::BlockSide, chunk::chunk_coord::ChunkCoord, world::World,
};

/// Builds the mesh of the chunk at `coord` from the current voxel contents.
///
/// # Returns
/// - `None` if the chunk is not loaded or no block in it is visible
/// - `Some(mesh)` otherwise
pub fn build_chunk_mesh(world: &World, coord: ChunkCoord) -> Option<ChunkMesh> {
    let chunk = world.get_chunk(coord)?;
    let mut mesh = ChunkMesh::new();

    for (local, block_type) in chunk.iter_blocks() {
        if !block_type.is_solid() {
            continue;
        }

        let world_position = coord.to_world(local);
        let exposed = BlockSide::all()
            .into_iter()
            .any(|side| !world.is_solid_world(world_position + side.normal()));

        if exposed {
            mesh.push_cube(world_position, block_type.color());
        }
    }

    trace!(
        "Meshed chunk {:?}: {} cubes, {} vertices",
        coord,
        mesh.cube_count(),
        mesh.vertices.len()
    );

    if mesh.is_empty() {
        None
    } else {
        Some(mesh)
    }
}
