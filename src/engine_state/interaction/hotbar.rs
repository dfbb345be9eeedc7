//! The selected placement material.

use log::debug;

use crate::engine_state::voxels::block::block_type::BlockType;

/// Block types offered for placement, in slot order.
pub const DEFAULT_HOTBAR: [BlockType; 5] = [
    BlockType::GRASS,
    BlockType::DIRT,
    BlockType::STONE,
    BlockType::WOOD,
    BlockType::LEAVES,
];

/// An ordered set of placeable block types with one of them selected.
#[derive(Debug, Clone)]
pub struct Hotbar {
    slots: Vec<BlockType>,
    selected: usize,
}

impl Hotbar {
    /// Creates a hotbar with the first slot selected.
    ///
    /// Air is dropped from `slots`; if nothing is left the default slots are
    /// used instead.
    pub fn new(slots: Vec<BlockType>) -> Self {
        let slots: Vec<BlockType> = slots
            .into_iter()
            .filter(|block_type| *block_type != BlockType::AIR)
            .collect();
        if slots.is_empty() {
            return Self::default();
        }
        Hotbar { slots, selected: 0 }
    }

    pub fn slots(&self) -> &[BlockType] {
        &self.slots
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The block type new blocks are placed with.
    pub fn selected(&self) -> BlockType {
        self.slots[self.selected]
    }

    /// Selects a slot directly.
    ///
    /// # Returns
    /// `false`, with the selection unchanged, if `slot` does not exist
    pub fn select(&mut self, slot: usize) -> bool {
        if slot >= self.slots.len() {
            return false;
        }
        self.selected = slot;
        debug!("Selected hotbar slot {} ({:?})", slot, self.selected());
        true
    }

    /// Moves the selection by one slot per wheel event, wrapping at both ends.
    /// Positive deltas advance, negative deltas go back, zero does nothing.
    pub fn scroll(&mut self, wheel_delta: f32) {
        let len = self.slots.len();
        if wheel_delta > 0.0 {
            self.select((self.selected + 1) % len);
        } else if wheel_delta < 0.0 {
            self.select((self.selected + len - 1) % len);
        }
    }
}

impl Default for Hotbar {
    fn default() -> Self {
        Hotbar {
            slots: DEFAULT_HOTBAR.to_vec(),
            selected: 0,
        }
    }
}
