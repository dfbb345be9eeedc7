//! # Block Module
//!
//! Block type definitions, the static attribute registry, block faces, and the
//! compact per-voxel cell stored inside chunks.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Represents a single voxel cell in a chunk.
///
/// The block type is stored as a compact `BlockTypeSize`; attributes are looked
/// up from the decoded `BlockType`.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Decodes the stored block type.
    pub fn get_block_type(&self) -> BlockType {
        BlockType::get_block_type_from_int(self.block_type)
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::new(BlockType::AIR)
    }
}
