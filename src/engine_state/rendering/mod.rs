//! # Rendering Contract
//!
//! The engine does not draw anything. It builds chunk meshes and hands them to a
//! [`MeshSink`], the renderer-side consumer. Each hand-off replaces whatever
//! the sink held for that chunk: `Some(mesh)` installs new geometry, `None`
//! removes it. Ownership of the mesh moves to the sink with the call.
//!
//! [`MeshStore`] is a headless sink that keeps the latest mesh of every chunk in
//! memory; it backs the demo loop and the tests.

use std::collections::HashMap;

pub mod meshing;
pub mod vertex;

pub use meshing::ChunkMesh;
pub use vertex::Vertex;

use crate::engine_state::voxels::chunk::chunk_coord::ChunkCoord;

/// Consumer of rebuilt chunk meshes.
pub trait MeshSink {
    /// Replaces the geometry of `coord` with `mesh`, or removes it when `mesh` is
    /// `None`. The previous geometry must be dropped in the same call.
    fn install_chunk_mesh(&mut self, coord: ChunkCoord, mesh: Option<ChunkMesh>);
}

/// In-memory mesh sink holding the latest mesh per chunk.
#[derive(Debug, Default)]
pub struct MeshStore {
    meshes: HashMap<ChunkCoord, ChunkMesh>,
    installs: usize,
}

impl MeshStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.meshes.get(&coord)
    }

    /// Number of chunks that currently have geometry.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Total number of hand-offs received, including removals.
    pub fn install_count(&self) -> usize {
        self.installs
    }

    pub fn total_vertices(&self) -> usize {
        self.meshes.values().map(|mesh| mesh.vertices.len()).sum()
    }
}

impl MeshSink for MeshStore {
    fn install_chunk_mesh(&mut self, coord: ChunkCoord, mesh: Option<ChunkMesh>) {
        self.installs += 1;
        match mesh {
            Some(mesh) => {
                self.meshes.insert(coord, mesh);
            }
            None => {
                self.meshes.remove(&coord);
            }
        }
    }
}

impl<S: MeshSink + ?Sized> MeshSink for &mut S {
    fn install_chunk_mesh(&mut self, coord: ChunkCoord, mesh: Option<ChunkMesh>) {
        (**self).install_chunk_mesh(coord, mesh)
    }
}
