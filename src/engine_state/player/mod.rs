//! # Player
//!
//! First-person movement: the kinematic state of the player and the swept,
//! axis-separated collision that keeps it out of solid voxels.

pub mod collision;
pub mod controller;

pub use collision::Aabb;
pub use controller::{KinematicState, PlayerController};
