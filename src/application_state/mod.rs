//! # Application State Management
//!
//! The headless host around the engine. It owns the engine state, the input
//! manager, and an in-memory mesh sink, measures frame time, and advances the
//! engine once per frame.
//!
//! - `input_state` - Device events and per-frame input transitions
//! - `input_manager` - Event intake and translation into engine input
//! - `script` - Timed input events driving the demo loop

pub mod input_manager;
pub mod input_state;
pub mod script;

use log::{debug, info};
use web_time::{Duration, Instant};

use input_manager::{translate_processed_input, InputManager};
use input_state::InputEvent;
use script::InputScript;

use crate::engine_state::{
    config::EngineConfig, rendering::MeshStore, EngineState, FrameStats,
};

/// Target duration of one frame in the demo loop.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// The running application: engine, input, and rendered meshes.
pub struct ApplicationState {
    /// The core engine state and logic
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Latest mesh of every chunk, standing in for a renderer
    pub mesh_store: MeshStore,

    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: Instant,

    /// Number of frames run so far
    pub frame: u64,
}

impl ApplicationState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine_state: EngineState::new(config),
            input_manager: InputManager::new(),
            mesh_store: MeshStore::new(),
            last_wait_time: Instant::now(),
            frame: 0,
        }
    }

    /// Forwards a device event to the input manager.
    pub fn intake_input(&mut self, event: &InputEvent) {
        self.input_manager.intake_input(event);
    }

    /// Runs one frame with the time measured since the previous one.
    pub fn about_to_wait(&mut self) -> FrameStats {
        let now = Instant::now();
        let wait_dt = now - self.last_wait_time;
        self.last_wait_time = now;
        self.run_frame(wait_dt.as_secs_f32())
    }

    /// Runs one frame with an explicit time step.
    pub fn run_frame(&mut self, dt: f32) -> FrameStats {
        let processed_input = self.input_manager.get_and_reset_processed_input();
        let snapshot = translate_processed_input(&processed_input);

        let stats = self.engine_state.step(dt, &snapshot, &mut self.mesh_store);
        self.frame += 1;

        debug!(
            "Frame {}: {} chunks created, {} meshes rebuilt, {} pending, edits {:?}",
            self.frame, stats.chunks_created, stats.meshes_rebuilt, stats.pending_rebuilds, stats.edits
        );
        stats
    }
}

/// Totals over a run of the demo loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub chunks_created: usize,
    pub meshes_rebuilt: usize,
    pub edits_applied: usize,
    pub edits_rejected: usize,
}

impl RunSummary {
    fn record(&mut self, stats: &FrameStats) {
        self.frames += 1;
        self.chunks_created += stats.chunks_created;
        self.meshes_rebuilt += stats.meshes_rebuilt;
        for edit in &stats.edits {
            if edit.is_applied() {
                self.edits_applied += 1;
            } else {
                self.edits_rejected += 1;
            }
        }
    }
}

/// Runs the engine for `frames` frames, feeding the events of `script` on the
/// frames they are scheduled for.
///
/// Frames are paced to [`FRAME_DURATION`] when `paced` is set; otherwise every
/// frame advances the simulation by exactly `FRAME_DURATION`.
pub fn run_headless(
    config: EngineConfig,
    script: &InputScript,
    frames: u64,
    paced: bool,
) -> (ApplicationState, RunSummary) {
    let mut app = ApplicationState::new(config);
    let mut summary = RunSummary::default();

    for frame in 0..frames {
        let frame_start = Instant::now();
        for event in script.events_at(frame) {
            app.intake_input(event);
        }

        let stats = if paced {
            app.about_to_wait()
        } else {
            app.run_frame(FRAME_DURATION.as_secs_f32())
        };
        summary.record(&stats);

        if paced {
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                std::thread::sleep(FRAME_DURATION - elapsed);
            }
        }
    }

    let position = app.engine_state.controller().position();
    info!(
        "Ran {} frames: {} chunks loaded, {} meshes installed ({} vertices), player at ({:.2}, {:.2}, {:.2})",
        summary.frames,
        app.engine_state.world().chunk_count(),
        app.mesh_store.len(),
        app.mesh_store.total_vertices(),
        position.x,
        position.y,
        position.z
    );
    (app, summary)
}
