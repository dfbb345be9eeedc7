//! # Chunk Coordinates
//!
//! Chunks are columns: the world is only subdivided on X and Z, so a chunk is
//! identified by two integers. World positions map to chunk coordinates with
//! floor division, which keeps negative coordinates on the correct side of zero
//! (world x = -1 lives in chunk x = -1 at local x = 15, not in chunk 0).

use cgmath::{Point3, Vector3};

use super::{CHUNK_DEPTH, CHUNK_WIDTH};

/// The position of a chunk in chunk space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk containing the world block column `(wx, wz)`.
    pub fn from_world(wx: i32, wz: i32) -> Self {
        Self {
            x: wx.div_euclid(CHUNK_WIDTH),
            z: wz.div_euclid(CHUNK_DEPTH),
        }
    }

    /// The chunk containing a continuous world-space position.
    pub fn from_world_position(position: Point3<f32>) -> Self {
        Self::from_world(position.x.floor() as i32, position.z.floor() as i32)
    }

    /// World coordinates `(x, z)` of local `(0, 0)` in this chunk.
    pub fn origin(&self) -> (i32, i32) {
        (self.x * CHUNK_WIDTH, self.z * CHUNK_DEPTH)
    }

    /// Translates a world block position to this chunk's local frame.
    ///
    /// The result is only in range when the position lies inside this chunk.
    pub fn to_local(&self, world: Point3<i32>) -> Point3<i32> {
        let (ox, oz) = self.origin();
        Point3::new(world.x - ox, world.y, world.z - oz)
    }

    /// Translates a local block position of this chunk to world space.
    pub fn to_world(&self, local: Point3<i32>) -> Point3<i32> {
        let (ox, oz) = self.origin();
        Point3::new(local.x + ox, local.y, local.z + oz)
    }

    /// The chunk offset from this one by `(dx, dz)` chunks.
    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Chebyshev (chessboard) distance in chunks.
    pub fn chebyshev_distance(&self, other: &ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}

impl std::ops::Add<Vector3<i32>> for ChunkCoord {
    type Output = ChunkCoord;

    /// Offsets by the X and Z components; Y is ignored since chunks are columns.
    fn add(self, rhs: Vector3<i32>) -> ChunkCoord {
        self.offset(rhs.x, rhs.z)
    }
}
