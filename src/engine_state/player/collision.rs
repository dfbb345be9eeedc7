//! Axis-aligned boxes and their overlap with the voxel grid.
//!
//! Voxel `(x, y, z)` occupies the unit cube `[x, x + 1] × [y, y + 1] × [z, z + 1]`.
//! Overlap is strict: boxes that only touch along a face do not intersect, which
//! is what lets a player rest exactly on (or an epsilon above) a floor.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::world::World;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Aabb { min, max }
    }

    /// The box of a player whose eye is at `eye`: `width` wide on X and Z and
    /// hanging `height` below the eye.
    pub fn from_eye(eye: Point3<f32>, width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Aabb {
            min: Point3::new(eye.x - half, eye.y - height, eye.z - half),
            max: Point3::new(eye.x + half, eye.y, eye.z + half),
        }
    }

    /// The unit cube occupied by a voxel.
    pub fn voxel(voxel: Point3<i32>) -> Self {
        let min = voxel.cast::<f32>().unwrap_or(Point3::new(0.0, 0.0, 0.0));
        Aabb {
            min,
            max: min + Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Strict overlap test; shared faces do not count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Integer range of voxels on one axis whose unit cube overlaps `[min, max]`.
    fn voxel_span(min: f32, max: f32) -> std::ops::Range<i32> {
        (min.floor() as i32)..(max.ceil() as i32)
    }

    /// Every solid voxel of `world` whose unit cube overlaps this box.
    pub fn overlapping_solid_voxels(&self, world: &World) -> Vec<Point3<i32>> {
        let mut voxels = Vec::new();
        for y in Self::voxel_span(self.min.y, self.max.y) {
            for z in Self::voxel_span(self.min.z, self.max.z) {
                for x in Self::voxel_span(self.min.x, self.max.x) {
                    let voxel = Point3::new(x, y, z);
                    if world.is_solid_world(voxel) {
                        voxels.push(voxel);
                    }
                }
            }
        }
        voxels
    }
}
