//! # Chunk Iteration Module
//!
//! Iteration over the non-air blocks of a chunk in storage order, yielding each
//! block with its local position. The mesher walks chunks through this iterator
//! so it never has to touch air.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_type::BlockType;

use super::{Chunk, CHUNK_LAYER_SIZE, CHUNK_SIZE, CHUNK_WIDTH};

/// An iterator over all non-air blocks in a chunk.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next flat offset to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_offset: 0,
        }
    }

    fn position_of(offset: usize) -> Point3<i32> {
        let y = offset / CHUNK_LAYER_SIZE;
        let in_layer = offset % CHUNK_LAYER_SIZE;
        let z = in_layer / CHUNK_WIDTH as usize;
        let x = in_layer % CHUNK_WIDTH as usize;
        Point3::new(x as i32, y as i32, z as i32)
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = self.chunk_ref.blocks();
        while self.current_offset < CHUNK_SIZE {
            let offset = self.current_offset;
            self.current_offset += 1;

            let block_type = blocks[offset].get_block_type();
            if block_type != BlockType::AIR {
                return Some((Self::position_of(offset), block_type));
            }
        }
        None
    }
}
