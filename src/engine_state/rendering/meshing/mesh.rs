//! Mesh data for one chunk.
//!
//! A `ChunkMesh` is a plain value: it is built from scratch on every rebuild and
//! then moved into the renderer, which owns and disposes of it.

use cgmath::Point3;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::block_side::BlockSide;

/// Vertices emitted per cube: four per face.
pub const VERTICES_PER_CUBE: usize = 24;
/// Indices emitted per cube: two triangles per face.
pub const INDICES_PER_CUBE: usize = 36;

/// The merged geometry of every visible cube in a chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// The vertex data, in world space
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
    /// World position of the minimum corner of every cube in the mesh
    pub cubes: Vec<Point3<i32>>,
}

impl ChunkMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a whole unit cube spanning `[origin, origin + 1]` on every axis,
    /// uniformly tinted with `color`.
    pub fn push_cube(&mut self, origin: Point3<i32>, color: [f32; 3]) {
        let base = [origin.x as f32, origin.y as f32, origin.z as f32];

        for side in BlockSide::all() {
            let first_index = self.vertices.len() as u32;
            let normal = side.normal();
            let normal = [normal.x as f32, normal.y as f32, normal.z as f32];

            for corner in side.corners() {
                self.vertices.push(Vertex::new(
                    [
                        base[0] + corner[0],
                        base[1] + corner[1],
                        base[2] + corner[2],
                    ],
                    normal,
                    color,
                ));
            }

            self.indices.extend_from_slice(&[
                first_index,
                first_index + 1,
                first_index + 2,
                first_index + 2,
                first_index + 3,
                first_index,
            ]);
        }

        self.cubes.push(origin);
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_cube_spans_one_unit_from_its_origin() {
        let mut mesh = ChunkMesh::new();
        mesh.push_cube(Point3::new(-3, 10, 7), [1.0, 0.0, 0.0]);

        assert_eq!(mesh.vertices.len(), VERTICES_PER_CUBE);
        assert_eq!(mesh.indices.len(), INDICES_PER_CUBE);
        assert_eq!(mesh.cubes, vec![Point3::new(-3, 10, 7)]);

        for vertex in &mesh.vertices {
            assert!(vertex.position[0] == -3.0 || vertex.position[0] == -2.0);
            assert!(vertex.position[1] == 10.0 || vertex.position[1] == 11.0);
            assert!(vertex.position[2] == 7.0 || vertex.position[2] == 8.0);
            assert_eq!(vertex.color, [1.0, 0.0, 0.0]);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn indices_continue_across_cubes() {
        let mut mesh = ChunkMesh::new();
        mesh.push_cube(Point3::new(0, 0, 0), [0.0; 3]);
        mesh.push_cube(Point3::new(1, 0, 0), [0.0; 3]);
        assert_eq!(mesh.indices[INDICES_PER_CUBE], VERTICES_PER_CUBE as u32);
        assert_eq!(*mesh.indices.iter().max().unwrap() as usize, 2 * VERTICES_PER_CUBE - 1);
    }
}
