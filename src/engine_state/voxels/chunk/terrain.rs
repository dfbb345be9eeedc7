//! # Terrain Generation
//!
//! Height-map terrain from seeded 2D Perlin noise. Each column gets a surface
//! height `h = floor(noise(wx * f, wz * f) * amplitude + height_offset)` and is
//! filled bottom-up with stone, three layers of dirt, and a grass cap.

use noise::{NoiseFn, Perlin};

use crate::engine_state::config::TerrainConfig;
use crate::engine_state::voxels::block::block_type::BlockType;

/// Number of dirt layers between the stone and the grass.
pub const DIRT_DEPTH: i32 = 3;

/// Samples column heights and block types for terrain generation.
///
/// Two generators built with the same seed and config produce identical
/// terrain.
pub struct TerrainGenerator {
    perlin: Perlin,
    config: TerrainConfig,
}

impl TerrainGenerator {
    /// Creates a generator for the given seed and shape parameters.
    pub fn new(seed: u32, config: TerrainConfig) -> Self {
        Self {
            perlin: Perlin::new(seed),
            config,
        }
    }

    /// Surface height of the world column `(wx, wz)`.
    pub fn column_height(&self, wx: i32, wz: i32) -> i32 {
        let sample = self.perlin.get([
            wx as f64 * self.config.frequency,
            wz as f64 * self.config.frequency,
        ]);
        (sample * self.config.amplitude + self.config.height_offset).floor() as i32
    }

    /// Block type at height `y` of a column whose surface is at `height`.
    pub fn block_for_height(y: i32, height: i32) -> BlockType {
        if y < height - DIRT_DEPTH {
            BlockType::STONE
        } else if y < height {
            BlockType::DIRT
        } else if y == height {
            BlockType::GRASS
        } else {
            BlockType::AIR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_layers() {
        let h = 20;
        assert_eq!(TerrainGenerator::block_for_height(0, h), BlockType::STONE);
        assert_eq!(TerrainGenerator::block_for_height(16, h), BlockType::STONE);
        assert_eq!(TerrainGenerator::block_for_height(17, h), BlockType::DIRT);
        assert_eq!(TerrainGenerator::block_for_height(19, h), BlockType::DIRT);
        assert_eq!(TerrainGenerator::block_for_height(20, h), BlockType::GRASS);
        assert_eq!(TerrainGenerator::block_for_height(21, h), BlockType::AIR);
    }

    #[test]
    fn same_seed_same_heights() {
        let a = TerrainGenerator::new(42, TerrainConfig::default());
        let b = TerrainGenerator::new(42, TerrainConfig::default());
        for (wx, wz) in [(0, 0), (-17, 5), (123, -64), (7, 7)] {
            assert_eq!(a.column_height(wx, wz), b.column_height(wx, wz));
        }
    }

    #[test]
    fn heights_stay_near_the_offset() {
        let config = TerrainConfig::default();
        let generator = TerrainGenerator::new(3, config.clone());
        for wx in -40..40 {
            let h = generator.column_height(wx, wx * 3);
            assert!(h as f64 >= config.height_offset - config.amplitude - 1.0);
            assert!(h as f64 <= config.height_offset + config.amplitude);
        }
    }
}
