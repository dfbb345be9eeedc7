//! # Engine Configuration
//!
//! Every tunable of the simulation lives here as a named constant, and the
//! constants are grouped into [`EngineConfig`] so a host can override them.
//! The defaults are what the engine runs with when nothing is configured.
//!
//! A configuration can be read from JSON; any field left out keeps its default:
//!
//! ```
//! use voxel_world::engine_state::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "world": { "stream_radius": 2 } }"#).unwrap();
//! assert_eq!(config.world.stream_radius, 2);
//! assert_eq!(config.world.rebuild_cap, 4);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::{interaction::hotbar::DEFAULT_HOTBAR, voxels::block::block_type::BlockType};

/// Environment variable naming a JSON file read by [`EngineConfig::from_env`].
pub const CONFIG_ENV_VAR: &str = "VOXEL_WORLD_CONFIG";

/// Seed fed to the terrain noise.
pub const DEFAULT_SEED: u32 = 1337;
/// Chebyshev radius, in chunks, kept loaded around the viewer.
pub const DEFAULT_STREAM_RADIUS: i32 = 4;
/// Maximum number of chunk meshes rebuilt per frame.
pub const DEFAULT_REBUILD_CAP: usize = 4;

/// Scale applied to world coordinates before sampling the height noise.
pub const DEFAULT_TERRAIN_FREQUENCY: f64 = 0.05;
/// Height variation, in blocks, produced by the noise.
pub const DEFAULT_TERRAIN_AMPLITUDE: f64 = 8.0;
/// Baseline surface height, in blocks.
pub const DEFAULT_TERRAIN_HEIGHT_OFFSET: f64 = 24.0;

/// Downward acceleration in blocks/s².
pub const DEFAULT_GRAVITY: f32 = 25.0;
/// Initial upward velocity of a jump in blocks/s.
pub const DEFAULT_JUMP_SPEED: f32 = 8.0;
/// Horizontal walking speed in blocks/s.
pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
/// Distance from the eye down to the feet.
pub const DEFAULT_PLAYER_HEIGHT: f32 = 1.8;
/// Horizontal extent of the player box on X and Z.
pub const DEFAULT_PLAYER_WIDTH: f32 = 0.6;
/// Upper bound on the integration step.
pub const DEFAULT_MAX_DT: f32 = 0.05;
/// Eye height below which the player is respawned.
pub const DEFAULT_FALL_LIMIT: f32 = -50.0;
/// Where the player reappears after falling out of the world.
pub const DEFAULT_RESPAWN_POINT: [f32; 3] = [8.0, 56.0, 8.0];

/// Gap left between the player box and a face it was clamped against.
pub const COLLISION_EPSILON: f32 = 0.001;

/// Maximum ray length, in blocks, for breaking and placing.
pub const DEFAULT_REACH: f32 = 6.0;
/// Offset along the hit normal used to pick the block behind or in front of a
/// targeted face.
pub const TARGET_EPSILON: f32 = 0.01;
/// Radians of rotation per unit of pointer movement.
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 0.002;

/// Errors produced while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for [`EngineConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but holds a value the engine cannot run with.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// World-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Terrain noise seed.
    pub seed: u32,
    /// Chebyshev radius, in chunks, kept loaded around the viewer.
    pub stream_radius: i32,
    /// Maximum number of mesh rebuilds per frame.
    pub rebuild_cap: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            stream_radius: DEFAULT_STREAM_RADIUS,
            rebuild_cap: DEFAULT_REBUILD_CAP,
        }
    }
}

/// Height-map terrain settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Scale applied to world coordinates before sampling the noise.
    pub frequency: f64,
    /// Height variation produced by the noise.
    pub amplitude: f64,
    /// Baseline surface height.
    pub height_offset: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_TERRAIN_FREQUENCY,
            amplitude: DEFAULT_TERRAIN_AMPLITUDE,
            height_offset: DEFAULT_TERRAIN_HEIGHT_OFFSET,
        }
    }
}

/// Player movement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub jump_speed: f32,
    pub move_speed: f32,
    pub player_height: f32,
    pub player_width: f32,
    pub max_dt: f32,
    pub fall_limit: f32,
    pub respawn_point: [f32; 3],
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            jump_speed: DEFAULT_JUMP_SPEED,
            move_speed: DEFAULT_MOVE_SPEED,
            player_height: DEFAULT_PLAYER_HEIGHT,
            player_width: DEFAULT_PLAYER_WIDTH,
            max_dt: DEFAULT_MAX_DT,
            fall_limit: DEFAULT_FALL_LIMIT,
            respawn_point: DEFAULT_RESPAWN_POINT,
        }
    }
}

/// Block targeting and view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum distance at which a block can be broken or placed against.
    pub reach: f32,
    /// Radians of camera rotation per unit of pointer movement.
    pub look_sensitivity: f32,
    /// Block types offered for placement, in slot order.
    pub hotbar: Vec<BlockType>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            reach: DEFAULT_REACH,
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
            hotbar: DEFAULT_HOTBAR.to_vec(),
        }
    }
}

/// The full set of engine settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub world: WorldConfig,
    pub terrain: TerrainConfig,
    pub physics: PhysicsConfig,
    pub interaction: InteractionConfig,
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading configuration from {:?}", path);
                Self::from_path(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Rejects values the simulation cannot make progress with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.rebuild_cap == 0 {
            return Err(ConfigError::Invalid(
                "world.rebuild_cap must be at least 1".to_string(),
            ));
        }
        if self.world.stream_radius < 0 {
            return Err(ConfigError::Invalid(
                "world.stream_radius must not be negative".to_string(),
            ));
        }
        if self.physics.player_height <= 0.0 || self.physics.player_width <= 0.0 {
            return Err(ConfigError::Invalid(
                "player dimensions must be positive".to_string(),
            ));
        }
        if self.interaction.reach <= 0.0 {
            return Err(ConfigError::Invalid(
                "interaction.reach must be positive".to_string(),
            ));
        }
        if self.physics.max_dt <= 0.0 {
            return Err(ConfigError::Invalid(
                "physics.max_dt must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{ "physics": { "gravity": 9.5 }, "world": { "seed": 7 } }"#)
                .unwrap();
        assert_eq!(config.physics.gravity, 9.5);
        assert_eq!(config.physics.jump_speed, DEFAULT_JUMP_SPEED);
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.rebuild_cap, DEFAULT_REBUILD_CAP);
    }

    #[test]
    fn zero_rebuild_cap_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{ "world": { "rebuild_cap": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn hotbar_is_read_by_variant_name() {
        let config =
            EngineConfig::from_json_str(r#"{ "interaction": { "hotbar": ["STONE", "WOOD"] } }"#)
                .unwrap();
        assert_eq!(config.interaction.hotbar, vec![BlockType::STONE, BlockType::WOOD]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{ world: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
