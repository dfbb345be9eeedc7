//! # Block Interaction
//!
//! Targeting and editing of voxels from the player's viewpoint:
//!
//! * `raycast` - nearest front-face hit against rendered chunk geometry
//! * `edit` - break and place requests and their outcomes
//! * `hotbar` - the block type used for placement

pub mod edit;
pub mod hotbar;
pub mod raycast;

pub use edit::{break_block, place_block, BlockedReason, EditOutcome, Targeting};
pub use hotbar::Hotbar;
pub use raycast::{cast_ray, RayHit};
