//! Breaking and placing blocks.
//!
//! Both edits start from the nearest rendered face along the view ray. The hit
//! point lies exactly on a face, so it is nudged by `TARGET_EPSILON` along the
//! face normal before flooring: inwards to find the block to break, outwards to
//! find the cell to place into.

use cgmath::{Point3, Vector3};
use log::debug;

use crate::engine_state::{
    config::TARGET_EPSILON,
    player::Aabb,
    voxels::{block::block_type::BlockType, world::World},
};

use super::raycast::{cast_ray, RayHit};

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedReason {
    /// The target cell already holds a block.
    Occupied,
    /// The new block would overlap the viewer.
    IntersectsViewer,
}

/// Result of a break or place request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    Broken {
        position: Point3<i32>,
        previous: BlockType,
    },
    Placed {
        position: Point3<i32>,
        block_type: BlockType,
    },
    Blocked {
        position: Point3<i32>,
        reason: BlockedReason,
    },
    /// The nearest hit is farther than the reach.
    OutOfReach { distance: f32 },
    /// The ray hit no rendered geometry.
    NoTarget,
    /// The target resolved to a cell the write did not change, for example one
    /// outside the loaded world.
    Unchanged,
}

impl EditOutcome {
    /// Whether the edit changed a voxel.
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Broken { .. } | EditOutcome::Placed { .. })
    }
}

/// A view ray for targeting.
#[derive(Debug, Clone, Copy)]
pub struct Targeting {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
    pub reach: f32,
}

impl Targeting {
    fn find(&self, world: &World) -> Result<RayHit, EditOutcome> {
        let hit = cast_ray(world, self.origin, self.direction).ok_or(EditOutcome::NoTarget)?;
        if hit.distance > self.reach {
            return Err(EditOutcome::OutOfReach {
                distance: hit.distance,
            });
        }
        Ok(hit)
    }
}

fn offset_cell(hit: &RayHit, along_normal: f32) -> Point3<i32> {
    let p = hit.point + hit.normal * along_normal;
    Point3::new(p.x.floor() as i32, p.y.floor() as i32, p.z.floor() as i32)
}

/// Breaks the targeted block.
pub fn break_block(world: &mut World, targeting: &Targeting) -> EditOutcome {
    let hit = match targeting.find(world) {
        Ok(hit) => hit,
        Err(outcome) => return outcome,
    };

    let position = offset_cell(&hit, -TARGET_EPSILON);
    let previous = world.get_block_world(position);
    if !world.set_block_world(position, BlockType::AIR) {
        return EditOutcome::Unchanged;
    }

    debug!("Broke {:?} at {:?}", previous, position);
    EditOutcome::Broken { position, previous }
}

/// Places `block_type` against the targeted face, unless the cell is taken or
/// the block would overlap `viewer`.
pub fn place_block(
    world: &mut World,
    targeting: &Targeting,
    viewer: &Aabb,
    block_type: BlockType,
) -> EditOutcome {
    let hit = match targeting.find(world) {
        Ok(hit) => hit,
        Err(outcome) => return outcome,
    };

    let position = offset_cell(&hit, TARGET_EPSILON);
    let reason = if world.get_block_world(position) != BlockType::AIR {
        Some(BlockedReason::Occupied)
    } else if Aabb::voxel(position).intersects(viewer) {
        Some(BlockedReason::IntersectsViewer)
    } else {
        None
    };
    if let Some(reason) = reason {
        debug!("Placement at {:?} blocked: {:?}", position, reason);
        return EditOutcome::Blocked { position, reason };
    }

    if !world.set_block_world(position, block_type) {
        return EditOutcome::Unchanged;
    }

    debug!("Placed {:?} at {:?}", block_type, position);
    EditOutcome::Placed {
        position,
        block_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::TerrainConfig;
    use crate::engine_state::rendering::MeshStore;
    use crate::engine_state::voxels::chunk::{chunk_coord::ChunkCoord, Chunk};

    fn world_with_block(at: Point3<i32>) -> World {
        let mut world = World::new(0, TerrainConfig::default());
        world.insert_chunk(Chunk::empty(ChunkCoord::new(0, 0)));
        world.set_block_world(at, BlockType::STONE);
        world.rebuild_dirty(usize::MAX, &mut MeshStore::new());
        world
    }

    fn looking_east(reach: f32) -> Targeting {
        Targeting {
            origin: Point3::new(2.5, 5.5, 4.5),
            direction: Vector3::new(1.0, 0.0, 0.0),
            reach,
        }
    }

    fn far_viewer() -> Aabb {
        Aabb::from_eye(Point3::new(2.5, 5.5, 4.5), 0.6, 1.8)
    }

    #[test]
    fn break_removes_the_hit_block() {
        let mut world = world_with_block(Point3::new(6, 5, 4));
        let outcome = break_block(&mut world, &looking_east(6.0));
        assert_eq!(
            outcome,
            EditOutcome::Broken {
                position: Point3::new(6, 5, 4),
                previous: BlockType::STONE
            }
        );
        assert_eq!(world.get_block_world(Point3::new(6, 5, 4)), BlockType::AIR);
    }

    #[test]
    fn place_fills_the_cell_in_front_of_the_face() {
        let mut world = world_with_block(Point3::new(6, 5, 4));
        let outcome = place_block(&mut world, &looking_east(6.0), &far_viewer(), BlockType::WOOD);
        assert_eq!(
            outcome,
            EditOutcome::Placed {
                position: Point3::new(5, 5, 4),
                block_type: BlockType::WOOD
            }
        );
        assert!(outcome.is_applied());
    }

    #[test]
    fn targets_beyond_reach_are_rejected() {
        let mut world = world_with_block(Point3::new(12, 5, 4));
        match break_block(&mut world, &looking_east(6.0)) {
            EditOutcome::OutOfReach { distance } => assert!((distance - 9.5).abs() < 1e-5),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(world.get_block_world(Point3::new(12, 5, 4)), BlockType::STONE);
    }

    #[test]
    fn stale_geometry_resolves_to_occupied() {
        let mut world = world_with_block(Point3::new(6, 5, 4));
        // Written after the last rebuild, so the ray still hits the old face.
        world.set_block_world(Point3::new(5, 5, 4), BlockType::DIRT);
        let outcome = place_block(&mut world, &looking_east(6.0), &far_viewer(), BlockType::WOOD);
        assert_eq!(
            outcome,
            EditOutcome::Blocked {
                position: Point3::new(5, 5, 4),
                reason: BlockedReason::Occupied
            }
        );
        assert_eq!(world.get_block_world(Point3::new(5, 5, 4)), BlockType::DIRT);
    }

    #[test]
    fn placing_into_the_viewer_is_blocked() {
        let mut world = world_with_block(Point3::new(4, 5, 4));
        let viewer = Aabb::from_eye(Point3::new(3.5, 6.5, 4.5), 0.6, 1.8);
        let outcome = place_block(&mut world, &looking_east(6.0), &viewer, BlockType::WOOD);
        assert_eq!(
            outcome,
            EditOutcome::Blocked {
                position: Point3::new(3, 5, 4),
                reason: BlockedReason::IntersectsViewer
            }
        );
        assert_eq!(world.get_block_world(Point3::new(3, 5, 4)), BlockType::AIR);
    }

    #[test]
    fn empty_view_has_no_target() {
        let mut world = world_with_block(Point3::new(6, 5, 4));
        let up = Targeting {
            direction: Vector3::new(0.0, 1.0, 0.0),
            ..looking_east(6.0)
        };
        assert_eq!(break_block(&mut world, &up), EditOutcome::NoTarget);
    }
}
