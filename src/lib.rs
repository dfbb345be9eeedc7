#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The world and physics core of a voxel sandbox: chunked block storage,
//! procedural terrain, incremental chunk meshing, first-person movement with
//! voxel collision, and ray-based block editing.
//!
//! Drawing, windowing, and device capture stay outside this crate. The engine
//! hands rebuilt chunk meshes to a [`MeshSink`](engine_state::rendering::MeshSink),
//! takes one [`InputSnapshot`](engine_state::InputSnapshot) per frame, and
//! exposes its camera for the renderer to draw from.
//!
//! ## Key Modules
//!
//! * `application_state` - A headless host: input intake, frame timing, and the demo loop
//! * `engine_state` - The simulation: world, streaming, meshing, movement, and edits
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(err) = voxel_world::run() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```
//!
//! Driving the engine directly:
//!
//! ```rust
//! use voxel_world::engine_state::{config::EngineConfig, rendering::MeshStore, EngineState, InputSnapshot};
//!
//! let mut engine_state = EngineState::new(EngineConfig::default());
//! let mut meshes = MeshStore::new();
//! for _ in 0..10 {
//!     engine_state.step(1.0 / 60.0, &InputSnapshot::default(), &mut meshes);
//! }
//! assert!(meshes.len() > 0);
//! ```

use log::info;

use application_state::script::InputScript;
use engine_state::config::{ConfigError, EngineConfig};

pub mod application_state;
pub mod engine_state;

/// Number of frames the demo loop runs for.
pub const DEMO_FRAMES: u64 = 600;

/// Initializes logging, loads the configuration, and runs the scripted demo
/// loop in real time.
///
/// The configuration is read from the file named by `VOXEL_WORLD_CONFIG` when
/// that variable is set.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
    let config = EngineConfig::from_env()?;

    let (_, summary) =
        application_state::run_headless(config, &InputScript::demo(), DEMO_FRAMES, true);
    info!(
        "Demo finished: {} chunks created, {} meshes rebuilt, {} edits applied, {} rejected",
        summary.chunks_created,
        summary.meshes_rebuilt,
        summary.edits_applied,
        summary.edits_rejected
    );
    Ok(())
}
