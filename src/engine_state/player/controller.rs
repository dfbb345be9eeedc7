//! # Kinematic Controller
//!
//! Moves the player through the voxel grid one step at a time.
//!
//! ## Step
//! 1. `dt` is clamped to `max_dt` so a long frame cannot tunnel through a block.
//! 2. Horizontal velocity is rebuilt from input every step (it is not
//!    integrated), so there is no horizontal momentum.
//! 3. Gravity is integrated into the vertical velocity.
//! 4. The displacement is resolved one axis at a time, in the order Y, X, Z.
//!    Each axis is tested on top of the axes already resolved, and a collision
//!    clamps the position flush against the blocking face, `COLLISION_EPSILON`
//!    away from it.
//! 5. A jump is applied only while grounded.
//! 6. Falling below `fall_limit` teleports the player back to the respawn point.
//!
//! Resolving axes in a fixed order makes corner collisions from diagonal motion
//! slightly asymmetric.

use cgmath::{InnerSpace, Point3, Vector3, Zero};
use log::{trace, warn};

use crate::engine_state::{
    config::{PhysicsConfig, COLLISION_EPSILON},
    voxels::world::World,
    InputSnapshot,
};

use super::collision::Aabb;

const AXIS_X: usize = 0;
const AXIS_Y: usize = 1;
const AXIS_Z: usize = 2;

/// Squared length below which a direction is treated as zero. Well under the
/// flattened forward vector at the pitch clamp, which is about `1e-8`.
const MIN_DIRECTION_LENGTH2: f32 = 1e-12;

/// Position and vertical motion of the player.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    /// Eye position in world space. The feet are `player_height` below it.
    pub position: Point3<f32>,
    /// Vertical velocity in blocks/s, positive upwards.
    pub vertical_velocity: f32,
    /// Whether the last vertical move was stopped by the ground.
    pub grounded: bool,
}

/// Gravity, walking, jumping, and collision for a single player.
#[derive(Debug)]
pub struct PlayerController {
    state: KinematicState,
    config: PhysicsConfig,
}

impl PlayerController {
    /// Creates a controller with the player at the configured respawn point.
    pub fn new(config: PhysicsConfig) -> Self {
        let spawn = Point3::from(config.respawn_point);
        PlayerController {
            state: KinematicState {
                position: spawn,
                vertical_velocity: 0.0,
                grounded: false,
            },
            config,
        }
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// The eye position.
    pub fn position(&self) -> Point3<f32> {
        self.state.position
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Moves the player without any collision checks and stops vertical motion.
    pub fn teleport(&mut self, position: Point3<f32>) {
        self.state.position = position;
        self.state.vertical_velocity = 0.0;
        self.state.grounded = false;
    }

    /// The player's bounding box at its current position.
    pub fn bounding_box(&self) -> Aabb {
        self.bounding_box_at(self.state.position)
    }

    fn bounding_box_at(&self, eye: Point3<f32>) -> Aabb {
        Aabb::from_eye(eye, self.config.player_width, self.config.player_height)
    }

    /// Horizontal velocity requested by the movement flags, given the camera's
    /// forward vector. Zero while the pointer is not locked.
    pub fn horizontal_velocity(&self, input: &InputSnapshot, forward: Vector3<f32>) -> Vector3<f32> {
        if !input.pointer_locked {
            return Vector3::zero();
        }

        let flat = Vector3::new(forward.x, 0.0, forward.z);
        if flat.magnitude2() <= MIN_DIRECTION_LENGTH2 {
            return Vector3::zero();
        }
        let forward = flat.normalize();
        let right = forward.cross(Vector3::unit_y());

        let mut direction = Vector3::zero();
        if input.move_forward {
            direction += forward;
        }
        if input.move_backward {
            direction -= forward;
        }
        if input.move_right {
            direction += right;
        }
        if input.move_left {
            direction -= right;
        }

        if direction.magnitude2() <= MIN_DIRECTION_LENGTH2 {
            return Vector3::zero();
        }
        direction.normalize() * self.config.move_speed
    }

    /// Advances the player by one step.
    ///
    /// # Arguments
    /// * `dt` - Elapsed time in seconds, clamped to `[0, max_dt]`
    /// * `input` - Movement and jump flags for this step
    /// * `forward` - The camera's forward vector
    /// * `world` - The voxels to collide with
    pub fn step(&mut self, dt: f32, input: &InputSnapshot, forward: Vector3<f32>, world: &World) {
        let dt = dt.max(0.0).min(self.config.max_dt);

        let horizontal = self.horizontal_velocity(input, forward);
        self.state.vertical_velocity -= self.config.gravity * dt;

        let displacement = Vector3::new(
            horizontal.x * dt,
            self.state.vertical_velocity * dt,
            horizontal.z * dt,
        );

        self.resolve_axis(AXIS_Y, displacement.y, world);
        self.resolve_axis(AXIS_X, displacement.x, world);
        self.resolve_axis(AXIS_Z, displacement.z, world);

        if input.pointer_locked && input.jump && self.state.grounded {
            self.state.vertical_velocity = self.config.jump_speed;
            self.state.grounded = false;
        }

        if self.state.position.y < self.config.fall_limit {
            warn!(
                "Player fell below {} at {:?}, respawning",
                self.config.fall_limit, self.state.position
            );
            self.teleport(Point3::from(self.config.respawn_point));
        }
    }

    /// Applies `delta` along one axis and pushes the player back out of any
    /// solid voxel it ends up in.
    ///
    /// # Returns
    /// `true` if the move was blocked.
    fn resolve_axis(&mut self, axis: usize, delta: f32, world: &World) -> bool {
        if delta == 0.0 {
            return false;
        }
        if axis == AXIS_Y {
            self.state.grounded = false;
        }

        let mut candidate = self.state.position;
        candidate[axis] += delta;

        let blocking = self.bounding_box_at(candidate).overlapping_solid_voxels(world);
        if blocking.is_empty() {
            self.state.position = candidate;
            return false;
        }

        // Distance from the eye to the box's lower and upper faces on this axis.
        let half_width = self.config.player_width / 2.0;
        let (below, above) = if axis == AXIS_Y {
            (self.config.player_height, 0.0)
        } else {
            (half_width, half_width)
        };

        if delta > 0.0 {
            let face = blocking
                .iter()
                .map(|voxel| voxel[axis] as f32)
                .fold(f32::INFINITY, f32::min);
            candidate[axis] = face - COLLISION_EPSILON - above;
        } else {
            let face = blocking
                .iter()
                .map(|voxel| voxel[axis] as f32 + 1.0)
                .fold(f32::NEG_INFINITY, f32::max);
            candidate[axis] = face + COLLISION_EPSILON + below;
        }

        trace!(
            "Blocked on axis {} by {} voxels, clamped to {}",
            axis,
            blocking.len(),
            candidate[axis]
        );

        self.state.position = candidate;
        if axis == AXIS_Y {
            self.state.vertical_velocity = 0.0;
            self.state.grounded = delta < 0.0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Rad};

    use crate::engine_state::camera_state::camera::{Camera, SAFE_FRAC_PI_2};
    use crate::engine_state::config::TerrainConfig;
    use crate::engine_state::voxels::{
        block::block_type::BlockType,
        chunk::{chunk_coord::ChunkCoord, Chunk},
    };

    const FLOOR_Y: i32 = 10;

    /// An empty chunk at the origin with a stone floor filling layer `FLOOR_Y`.
    fn floor_world() -> World {
        let mut world = World::new(0, TerrainConfig::default());
        world.insert_chunk(Chunk::empty(ChunkCoord::new(0, 0)));
        for x in 0..16 {
            for z in 0..16 {
                world.set_block_world(Point3::new(x, FLOOR_Y, z), BlockType::STONE);
            }
        }
        world
    }

    fn locked() -> InputSnapshot {
        InputSnapshot {
            pointer_locked: true,
            ..InputSnapshot::default()
        }
    }

    fn standing_controller() -> PlayerController {
        let mut controller = PlayerController::new(PhysicsConfig::default());
        let height = controller.config().player_height;
        controller.teleport(Point3::new(8.5, FLOOR_Y as f32 + 1.0 + height, 8.5));
        controller
    }

    #[test]
    fn settles_on_the_floor_in_one_step() {
        let world = floor_world();
        let mut controller = standing_controller();

        controller.step(1.0 / 60.0, &locked(), Vector3::unit_x(), &world);

        let state = controller.state();
        assert!(state.grounded);
        assert_eq!(state.vertical_velocity, 0.0);
        let feet = state.position.y - controller.config().player_height;
        assert!((feet - (FLOOR_Y as f32 + 1.0 + COLLISION_EPSILON)).abs() < 1e-4);
    }

    #[test]
    fn jump_from_rest_applies_jump_speed_on_the_same_step() {
        let world = floor_world();
        let mut controller = standing_controller();
        controller.step(1.0 / 60.0, &locked(), Vector3::unit_x(), &world);

        let jump = InputSnapshot {
            jump: true,
            ..locked()
        };
        controller.step(1.0 / 60.0, &jump, Vector3::unit_x(), &world);

        assert_eq!(controller.state().vertical_velocity, controller.config().jump_speed);
        assert!(!controller.state().grounded);
    }

    #[test]
    fn cannot_jump_in_mid_air() {
        let world = floor_world();
        let mut controller = PlayerController::new(PhysicsConfig::default());
        controller.teleport(Point3::new(8.5, 40.0, 8.5));
        let jump = InputSnapshot {
            jump: true,
            ..locked()
        };
        controller.step(0.02, &jump, Vector3::unit_x(), &world);
        assert!(controller.state().vertical_velocity < 0.0);
    }

    #[test]
    fn walls_stop_horizontal_motion() {
        let mut world = floor_world();
        for y in FLOOR_Y + 1..FLOOR_Y + 4 {
            for z in 0..16 {
                world.set_block_world(Point3::new(10, y, z), BlockType::WOOD);
            }
        }
        let mut controller = standing_controller();
        let walk = InputSnapshot {
            move_forward: true,
            ..locked()
        };

        for _ in 0..60 {
            controller.step(0.05, &walk, Vector3::unit_x(), &world);
        }

        let half = controller.config().player_width / 2.0;
        let expected = 10.0 - COLLISION_EPSILON - half;
        assert!((controller.position().x - expected).abs() < 1e-4);
        assert!(controller.state().grounded);
    }

    #[test]
    fn unlocked_pointer_ignores_movement_but_keeps_gravity() {
        let world = floor_world();
        let mut controller = PlayerController::new(PhysicsConfig::default());
        controller.teleport(Point3::new(8.5, 30.0, 8.5));
        let input = InputSnapshot {
            move_forward: true,
            ..InputSnapshot::default()
        };

        controller.step(0.05, &input, Vector3::unit_x(), &world);

        assert_eq!(controller.position().x, 8.5);
        assert!(controller.position().y < 30.0);
    }

    #[test]
    fn long_frames_are_clamped() {
        let world = World::new(0, TerrainConfig::default());
        let mut controller = PlayerController::new(PhysicsConfig::default());
        controller.teleport(Point3::new(0.5, 40.0, 0.5));
        controller.step(10.0, &locked(), Vector3::unit_x(), &world);

        let config = controller.config();
        let expected_velocity = -config.gravity * config.max_dt;
        assert!((controller.state().vertical_velocity - expected_velocity).abs() < 1e-5);
    }

    #[test]
    fn falling_out_of_the_world_respawns() {
        let world = World::new(0, TerrainConfig::default());
        let mut controller = PlayerController::new(PhysicsConfig::default());
        controller.teleport(Point3::new(0.5, -49.99, 0.5));
        controller.step(0.05, &locked(), Vector3::unit_x(), &world);

        assert_eq!(controller.position(), Point3::from(controller.config().respawn_point));
        assert_eq!(controller.state().vertical_velocity, 0.0);
    }

    #[test]
    fn walking_still_works_at_the_pitch_clamp() {
        let controller = PlayerController::new(PhysicsConfig::default());
        let walk = InputSnapshot {
            move_forward: true,
            ..locked()
        };
        let speed = controller.config().move_speed;

        for pitch in [-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2] {
            let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Rad(pitch));
            let velocity = controller.horizontal_velocity(&walk, camera.forward());
            assert!((velocity.x - speed).abs() < 1e-3, "pitch {}: {:?}", pitch, velocity);
            assert_eq!(velocity.y, 0.0);
        }
    }

    #[test]
    fn zero_dt_keeps_the_player_grounded() {
        let world = floor_world();
        let mut controller = standing_controller();
        controller.step(1.0 / 60.0, &locked(), Vector3::unit_x(), &world);
        assert!(controller.state().grounded);

        let before = controller.position();
        controller.step(0.0, &locked(), Vector3::unit_x(), &world);
        assert!(controller.state().grounded);
        assert_eq!(controller.position(), before);

        let jump = InputSnapshot {
            jump: true,
            ..locked()
        };
        controller.step(0.0, &jump, Vector3::unit_x(), &world);
        assert_eq!(controller.state().vertical_velocity, controller.config().jump_speed);
    }

    #[test]
    fn ceilings_stop_a_jump_without_grounding() {
        let mut world = floor_world();
        let ceiling_y = FLOOR_Y + 3;
        for x in 0..16 {
            for z in 0..16 {
                world.set_block_world(Point3::new(x, ceiling_y, z), BlockType::STONE);
            }
        }
        let mut controller = standing_controller();
        let jump = InputSnapshot {
            jump: true,
            ..locked()
        };
        controller.step(1.0 / 60.0, &jump, Vector3::unit_x(), &world);
        assert_eq!(controller.state().vertical_velocity, controller.config().jump_speed);

        controller.step(0.05, &locked(), Vector3::unit_x(), &world);

        let state = controller.state();
        assert_eq!(state.vertical_velocity, 0.0);
        assert!(!state.grounded);
        assert!((state.position.y - (ceiling_y as f32 - COLLISION_EPSILON)).abs() < 1e-4);
    }

    #[test]
    fn diagonal_moves_into_a_corner_resolve_x_before_z() {
        let mut world = floor_world();
        for y in FLOOR_Y + 1..FLOOR_Y + 3 {
            world.set_block_world(Point3::new(10, y, 10), BlockType::WOOD);
        }

        let mut controller = standing_controller();
        let dt = 0.02;
        let config = controller.config().clone();
        let half = config.player_width / 2.0;
        let step = config.move_speed * std::f32::consts::FRAC_1_SQRT_2 * dt;
        // Both box faces sit half a step short of the corner block.
        let start = 10.0 - half - step / 2.0;
        controller.teleport(Point3::new(
            start,
            FLOOR_Y as f32 + 1.0 + COLLISION_EPSILON + config.player_height,
            start,
        ));

        let walk = InputSnapshot {
            move_forward: true,
            ..locked()
        };
        controller.step(dt, &walk, Vector3::new(1.0, 0.0, 1.0).normalize(), &world);

        let position = controller.position();
        assert!((position.x - (start + step)).abs() < 1e-4);
        assert!((position.z - (10.0 - COLLISION_EPSILON - half)).abs() < 1e-4);
        assert!(controller.state().grounded);
    }

    #[test]
    fn diagonal_input_is_normalised() {
        let controller = PlayerController::new(PhysicsConfig::default());
        let input = InputSnapshot {
            move_forward: true,
            move_right: true,
            ..locked()
        };
        let velocity = controller.horizontal_velocity(&input, Vector3::new(1.0, 0.5, 0.0));
        assert!((velocity.magnitude() - controller.config().move_speed).abs() < 1e-5);
        assert_eq!(velocity.y, 0.0);
        assert!(velocity.x > 0.0 && velocity.z > 0.0);
    }
}
