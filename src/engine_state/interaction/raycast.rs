//! Ray casting against rendered chunk geometry.
//!
//! Rays are tested against the cubes each chunk last handed to the renderer,
//! not against the voxel array, so targeting always matches what is on screen.
//! A cube that contains the ray origin is never hit: only faces the ray enters
//! from outside count.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::{
    player::Aabb,
    voxels::{
        chunk::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
        world::World,
    },
};

/// The nearest front face a ray hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the origin, in units of the (normalised) direction.
    pub distance: f32,
    /// World-space point on the hit face.
    pub point: Point3<f32>,
    /// Outward normal of the hit face.
    pub normal: Vector3<f32>,
    /// The cube that was hit.
    pub cube: Point3<i32>,
}

/// Slab test of a ray against a box.
///
/// # Returns
/// `(t_near, t_far, near_axis)`, or `None` when the ray misses the box or the
/// box lies entirely behind the origin. `t_near` is negative when the origin is
/// inside the box.
fn ray_aabb(origin: Point3<f32>, direction: Vector3<f32>, aabb: &Aabb) -> Option<(f32, f32, usize)> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut near_axis = 0;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let (min, max) = (aabb.min[axis], aabb.max[axis]);

        if d.abs() < 1e-8 {
            if o < min || o > max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (min - o) * inv;
            let b = (max - o) * inv;
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        };

        if t0 > t_near {
            t_near = t0;
            near_axis = axis;
        }
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some((t_near, t_far, near_axis))
}

/// Front-face hit of a ray on one unit cube.
pub fn ray_unit_cube(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    cube: Point3<i32>,
) -> Option<RayHit> {
    let (t_near, _, axis) = ray_aabb(origin, direction, &Aabb::voxel(cube))?;
    if t_near < 0.0 || !t_near.is_finite() {
        return None;
    }

    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    normal[axis] = -direction[axis].signum();

    Some(RayHit {
        distance: t_near,
        point: origin + direction * t_near,
        normal,
        cube,
    })
}

/// Finds the nearest rendered cube hit by a ray, at any distance.
///
/// `direction` does not need to be normalised; a zero direction hits nothing.
pub fn cast_ray(world: &World, origin: Point3<f32>, direction: Vector3<f32>) -> Option<RayHit> {
    if direction.magnitude2() <= f32::EPSILON {
        return None;
    }
    let direction = direction.normalize();
    let mut nearest: Option<RayHit> = None;

    for chunk in world.chunks() {
        let cubes = match chunk.rendered_cubes() {
            Some(cubes) => cubes,
            None => continue,
        };

        let (ox, oz) = chunk.position.origin();
        let bounds = Aabb::new(
            Point3::new(ox as f32, 0.0, oz as f32),
            Point3::new(
                (ox + CHUNK_WIDTH) as f32,
                CHUNK_HEIGHT as f32,
                (oz + CHUNK_DEPTH) as f32,
            ),
        );
        match ray_aabb(origin, direction, &bounds) {
            Some((t_near, _, _)) if nearest.map_or(true, |hit| t_near <= hit.distance) => {}
            _ => continue,
        }

        for &cube in cubes {
            if let Some(hit) = ray_unit_cube(origin, direction, cube) {
                if nearest.map_or(true, |best| hit.distance < best.distance) {
                    nearest = Some(hit);
                }
            }
        }
    }

    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::TerrainConfig;
    use crate::engine_state::rendering::MeshStore;
    use crate::engine_state::voxels::{
        block::block_type::BlockType,
        chunk::{chunk_coord::ChunkCoord, Chunk},
    };

    #[test]
    fn hits_the_entered_face() {
        let hit = ray_unit_cube(
            Point3::new(-2.0, 0.5, 0.5),
            Vector3::new(1.0, 0.0, 0.0),
            Point3::new(0, 0, 0),
        )
        .unwrap();
        assert_eq!(hit.distance, 2.0);
        assert_eq!(hit.normal, Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(hit.point, Point3::new(0.0, 0.5, 0.5));
    }

    #[test]
    fn cubes_behind_or_around_the_origin_are_ignored() {
        let forward = Vector3::new(0.0, 0.0, 1.0);
        assert!(ray_unit_cube(Point3::new(0.5, 0.5, 3.0), forward, Point3::new(0, 0, 0)).is_none());
        assert!(ray_unit_cube(Point3::new(0.5, 0.5, 0.5), forward, Point3::new(0, 0, 0)).is_none());
        assert!(ray_unit_cube(Point3::new(5.0, 0.5, -3.0), forward, Point3::new(0, 0, 0)).is_none());
    }

    #[test]
    fn cast_ray_picks_the_nearest_rendered_cube() {
        let mut world = World::new(0, TerrainConfig::default());
        world.insert_chunk(Chunk::empty(ChunkCoord::new(0, 0)));
        world.insert_chunk(Chunk::empty(ChunkCoord::new(1, 0)));
        world.set_block_world(Point3::new(20, 5, 4), BlockType::STONE);
        world.set_block_world(Point3::new(12, 5, 4), BlockType::STONE);

        let origin = Point3::new(2.5, 5.5, 4.5);
        let east = Vector3::new(3.0, 0.0, 0.0);

        // Nothing is rendered until the meshes are rebuilt.
        assert!(cast_ray(&world, origin, east).is_none());

        world.rebuild_dirty(usize::MAX, &mut MeshStore::new());
        let hit = cast_ray(&world, origin, east).unwrap();
        assert_eq!(hit.cube, Point3::new(12, 5, 4));
        assert!((hit.distance - 9.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn zero_direction_hits_nothing() {
        let world = World::new(0, TerrainConfig::default());
        assert!(cast_ray(&world, Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0)).is_none());
    }
}
