//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and the
//! static attribute table attached to each of them.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion from the compact integer
/// representation stored inside chunks back to the rich enum type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
pub enum BlockType {
    /// Empty space. Never solid, never rendered.
    AIR,

    /// Top layer of every terrain column.
    GRASS,

    /// The few layers directly under the grass.
    DIRT,

    /// Everything deeper than the dirt layers.
    STONE,

    /// Placeable building material.
    WOOD,

    /// Placeable building material.
    LEAVES,
}

/// Static attributes of a block type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockAttributes {
    /// Whether the block collides with the player and is rendered.
    pub solid: bool,
    /// Flat placeholder shading applied to every face of the block.
    pub color: [f32; 3],
}

impl BlockType {
    /// Number of block types.
    pub const COUNT: usize = 6;

    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// Unknown values decode to `AIR`. Chunks only ever store values produced
    /// from a `BlockType`, so this fallback is never hit through the public API.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        num::FromPrimitive::from_u8(btype).unwrap_or(BlockType::AIR)
    }

    /// Returns the static attributes of this block type.
    ///
    /// The `match` is exhaustive, so adding a variant without giving it
    /// attributes is a compile error.
    pub const fn attributes(self) -> BlockAttributes {
        match self {
            BlockType::AIR => BlockAttributes {
                solid: false,
                color: [0.0, 0.0, 0.0],
            },
            BlockType::GRASS => BlockAttributes {
                solid: true,
                color: [0.376, 0.702, 0.259],
            },
            BlockType::DIRT => BlockAttributes {
                solid: true,
                color: [0.545, 0.353, 0.169],
            },
            BlockType::STONE => BlockAttributes {
                solid: true,
                color: [0.502, 0.502, 0.502],
            },
            BlockType::WOOD => BlockAttributes {
                solid: true,
                color: [0.588, 0.435, 0.2],
            },
            BlockType::LEAVES => BlockAttributes {
                solid: true,
                color: [0.133, 0.545, 0.133],
            },
        }
    }

    /// Shorthand for `self.attributes().solid`.
    pub const fn is_solid(self) -> bool {
        self.attributes().solid
    }

    /// Shorthand for `self.attributes().color`.
    pub const fn color(self) -> [f32; 3] {
        self.attributes().color
    }
}
