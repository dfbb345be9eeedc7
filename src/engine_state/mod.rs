//! # Engine State Module
//!
//! The core engine module that owns the simulation and advances it one frame
//! at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - The viewpoint shared with the renderer
//! * `config` - Tunable constants and their grouping into `EngineConfig`
//! * `interaction` - Block targeting, editing, and the hotbar
//! * `player` - Kinematic movement and collision
//! * `rendering` - Chunk meshing and the mesh sink contract
//! * `task_management` - Scheduling of mesh rebuilds
//! * `voxels` - Blocks, chunks, terrain, streaming, and the world index
//!
//! ## Frame Order
//!
//! [`EngineState::step`] always runs, in this order:
//! 1. View and hotbar input
//! 2. Chunk streaming around the player
//! 3. Kinematic movement and collision
//! 4. Block edits from this frame's clicks
//! 5. A capped drain of dirty chunks into the mesh sink
//!
//! Edits made in step 4 are therefore meshed in the same frame when the cap
//! allows it.

use log::{debug, info};

use camera_state::CameraState;
use config::EngineConfig;
use interaction::{break_block, place_block, EditOutcome, Hotbar, Targeting};
use player::PlayerController;
use rendering::MeshSink;
use voxels::{streaming::ChunkStreamer, world::World};

pub mod camera_state;
pub mod config;
pub mod interaction;
pub mod player;
pub mod rendering;
pub mod task_management;
pub mod voxels;

/// A pointer button that can trigger a block edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Breaks the targeted block.
    Left,
    /// Places the selected block against the targeted face.
    Right,
}

/// Everything the engine reads from the input devices for one step.
///
/// Movement flags are levels (held keys); `clicks`, `wheel_delta`, and
/// `hotbar_slot` are events that happened since the previous step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    /// Whether the pointer is captured by the view. Movement, look, and edits
    /// are ignored while it is not.
    pub pointer_locked: bool,
    /// Pointer movement since the previous step, if any.
    pub look_delta: Option<(f64, f64)>,
    /// Pointer buttons pressed since the previous step, in order.
    pub clicks: Vec<PointerButton>,
    /// Accumulated wheel movement since the previous step.
    pub wheel_delta: f32,
    /// A hotbar slot chosen directly, for example with a number key.
    pub hotbar_slot: Option<usize>,
}

/// What happened during one [`EngineState::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    /// Chunks generated by streaming.
    pub chunks_created: usize,
    /// Chunk meshes rebuilt and handed to the sink.
    pub meshes_rebuilt: usize,
    /// Outcome of every click, in click order.
    pub edits: Vec<EditOutcome>,
    /// Dirty chunks left for later frames.
    pub pending_rebuilds: usize,
}

/// The main state container for the engine.
///
/// Owns the world and every subsystem that reads or mutates it. There is no
/// global state: a host creates one `EngineState` and calls
/// [`step`](EngineState::step) once per frame.
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::{config::EngineConfig, rendering::MeshStore, EngineState, InputSnapshot};
///
/// let mut engine_state = EngineState::new(EngineConfig::default());
/// let mut meshes = MeshStore::new();
///
/// let stats = engine_state.step(1.0 / 60.0, &InputSnapshot::default(), &mut meshes);
/// assert!(stats.chunks_created > 0);
/// assert_eq!(stats.meshes_rebuilt, meshes.install_count());
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    world: World,
    /// Loads chunks around the player
    streamer: ChunkStreamer,
    /// Player position, velocity, and collision
    controller: PlayerController,
    /// Camera following the player's eye
    camera_state: CameraState,
    /// Selected block type for placement
    hotbar: Hotbar,
    config: EngineConfig,
}

impl EngineState {
    /// Creates a new engine state with an empty world and the player at the
    /// respawn point. Nothing is generated until the first step.
    ///
    /// # Arguments
    ///
    /// * `config` - The settings every subsystem is built from
    pub fn new(config: EngineConfig) -> Self {
        info!(
            "Creating engine state (seed {}, stream radius {})",
            config.world.seed, config.world.stream_radius
        );

        let world = World::new(config.world.seed, config.terrain.clone());
        let streamer = ChunkStreamer::new(config.world.stream_radius);
        let controller = PlayerController::new(config.physics.clone());
        let camera_state = CameraState::new(controller.position());

        EngineState {
            world,
            streamer,
            controller,
            camera_state,
            hotbar: Hotbar::new(config.interaction.hotbar.clone()),
            config,
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// # Arguments
    ///
    /// * `dt` - Seconds since the previous frame
    /// * `input` - The input gathered since the previous frame
    /// * `sink` - Receives every chunk mesh rebuilt this frame
    pub fn step<S: MeshSink>(&mut self, dt: f32, input: &InputSnapshot, sink: &mut S) -> FrameStats {
        self.apply_view_input(input);

        let chunks_created = self
            .streamer
            .sync_around_viewer(self.controller.position(), &mut self.world);

        self.controller
            .step(dt, input, self.camera_state.camera.forward(), &self.world);
        if let Some(chunk) = self.camera_state.follow(self.controller.position()) {
            debug!("Player entered chunk {:?}", chunk);
        }

        let edits = self.apply_clicks(input);

        let meshes_rebuilt = self
            .world
            .rebuild_dirty(self.config.world.rebuild_cap, sink);

        FrameStats {
            chunks_created,
            meshes_rebuilt,
            edits,
            pending_rebuilds: self.world.dirty_chunks().len(),
        }
    }

    fn apply_view_input(&mut self, input: &InputSnapshot) {
        if let Some(slot) = input.hotbar_slot {
            self.hotbar.select(slot);
        }
        self.hotbar.scroll(input.wheel_delta);

        if !input.pointer_locked {
            return;
        }
        if let Some((delta_x, delta_y)) = input.look_delta {
            self.camera_state.camera.apply_look_delta(
                delta_x,
                delta_y,
                self.config.interaction.look_sensitivity,
            );
        }
    }

    fn apply_clicks(&mut self, input: &InputSnapshot) -> Vec<EditOutcome> {
        if !input.pointer_locked {
            return Vec::new();
        }

        let mut edits = Vec::with_capacity(input.clicks.len());
        for button in &input.clicks {
            let targeting = Targeting {
                origin: self.camera_state.camera.position,
                direction: self.camera_state.camera.forward(),
                reach: self.config.interaction.reach,
            };
            let outcome = match button {
                PointerButton::Left => break_block(&mut self.world, &targeting),
                PointerButton::Right => place_block(
                    &mut self.world,
                    &targeting,
                    &self.controller.bounding_box(),
                    self.hotbar.selected(),
                ),
            };
            edits.push(outcome);
        }
        edits
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlayerController {
        &mut self.controller
    }

    pub fn camera(&self) -> &camera_state::Camera {
        &self.camera_state.camera
    }

    pub fn camera_mut(&mut self) -> &mut camera_state::Camera {
        &mut self.camera_state.camera
    }

    pub fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        interaction::BlockedReason,
        rendering::MeshStore,
        voxels::block::block_type::BlockType,
    };
    use cgmath::{Point3, Rad};

    fn small_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.world.stream_radius = 1;
        config.world.rebuild_cap = 64;
        config
    }

    fn locked() -> InputSnapshot {
        InputSnapshot {
            pointer_locked: true,
            ..InputSnapshot::default()
        }
    }

    /// Drops the player onto the centre of column (8, 8) and runs frames until
    /// it stands on the terrain.
    fn settle(engine_state: &mut EngineState, sink: &mut MeshStore) {
        engine_state
            .controller_mut()
            .teleport(Point3::new(8.5, 56.0, 8.5));
        for _ in 0..400 {
            engine_state.step(0.05, &locked(), sink);
            if engine_state.controller().state().grounded {
                return;
            }
        }
        panic!("player never landed");
    }

    #[test]
    fn first_step_streams_and_meshes() {
        let mut engine_state = EngineState::new(small_config());
        let mut sink = MeshStore::new();
        let stats = engine_state.step(0.016, &InputSnapshot::default(), &mut sink);

        assert_eq!(stats.chunks_created, 9);
        assert_eq!(stats.meshes_rebuilt, 9);
        assert_eq!(stats.pending_rebuilds, 0);
        assert_eq!(sink.len(), 9);
    }

    #[test]
    fn rebuild_cap_defers_work_to_later_frames() {
        let mut config = small_config();
        config.world.rebuild_cap = 4;
        let mut engine_state = EngineState::new(config);
        let mut sink = MeshStore::new();

        let first = engine_state.step(0.016, &InputSnapshot::default(), &mut sink);
        assert_eq!(first.meshes_rebuilt, 4);
        assert_eq!(first.pending_rebuilds, 5);

        let second = engine_state.step(0.016, &InputSnapshot::default(), &mut sink);
        let third = engine_state.step(0.016, &InputSnapshot::default(), &mut sink);
        assert_eq!(second.meshes_rebuilt + third.meshes_rebuilt, 5);
        assert_eq!(sink.install_count(), 9);
    }

    #[test]
    fn looking_down_and_placing_under_the_feet_is_blocked() {
        let mut engine_state = EngineState::new(small_config());
        let mut sink = MeshStore::new();
        settle(&mut engine_state, &mut sink);

        engine_state.camera_mut().pitch = -Rad(camera_state::camera::SAFE_FRAC_PI_2);
        let place = InputSnapshot {
            clicks: vec![PointerButton::Right],
            ..locked()
        };
        let stats = engine_state.step(0.016, &place, &mut sink);

        match stats.edits.as_slice() {
            [EditOutcome::Blocked {
                reason: BlockedReason::IntersectsViewer,
                ..
            }] => {}
            other => panic!("unexpected edits {:?}", other),
        }
    }

    #[test]
    fn breaking_below_then_rebuilding_removes_the_cube() {
        let mut engine_state = EngineState::new(small_config());
        let mut sink = MeshStore::new();
        settle(&mut engine_state, &mut sink);

        engine_state.camera_mut().pitch = -Rad(camera_state::camera::SAFE_FRAC_PI_2);
        let dig = InputSnapshot {
            clicks: vec![PointerButton::Left],
            ..locked()
        };
        let stats = engine_state.step(0.016, &dig, &mut sink);

        let position = match stats.edits.as_slice() {
            [EditOutcome::Broken { position, .. }] => *position,
            other => panic!("unexpected edits {:?}", other),
        };
        assert_eq!(engine_state.world().get_block_world(position), BlockType::AIR);
        assert!(stats.meshes_rebuilt >= 1);
    }

    #[test]
    fn clicks_without_pointer_lock_do_nothing() {
        let mut engine_state = EngineState::new(small_config());
        let mut sink = MeshStore::new();
        let input = InputSnapshot {
            clicks: vec![PointerButton::Left, PointerButton::Right],
            ..InputSnapshot::default()
        };
        let stats = engine_state.step(0.016, &input, &mut sink);
        assert!(stats.edits.is_empty());
    }

    #[test]
    fn wheel_and_slot_input_select_the_hotbar() {
        let mut engine_state = EngineState::new(small_config());
        let mut sink = MeshStore::new();
        let input = InputSnapshot {
            hotbar_slot: Some(3),
            ..InputSnapshot::default()
        };
        engine_state.step(0.016, &input, &mut sink);
        assert_eq!(engine_state.hotbar().selected(), BlockType::WOOD);

        let input = InputSnapshot {
            wheel_delta: 1.0,
            ..InputSnapshot::default()
        };
        engine_state.step(0.016, &input, &mut sink);
        assert_eq!(engine_state.hotbar().selected(), BlockType::LEAVES);
        assert_eq!(engine_state.camera().position, engine_state.controller().position());
    }
}
