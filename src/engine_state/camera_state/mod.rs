//! # Camera State Management
//!
//! The camera is the viewpoint contract shared with the renderer: each step the
//! engine moves it to the player's eye and applies the frame's look delta, and
//! block targeting casts its rays from it.

use cgmath::Point3;

use super::voxels::chunk::chunk_coord::ChunkCoord;

pub mod camera;

pub use camera::Camera;

/// Tracks the camera together with the chunk it currently occupies.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// Chunk containing the camera, refreshed by [`CameraState::follow`]
    chunk_position: ChunkCoord,
}

impl CameraState {
    /// Creates a camera at `position`, looking along +X.
    pub fn new(position: Point3<f32>) -> Self {
        CameraState {
            camera: Camera::new(position, cgmath::Deg(0.0), cgmath::Deg(0.0)),
            chunk_position: ChunkCoord::from_world_position(position),
        }
    }

    /// Moves the camera to a new eye position.
    ///
    /// # Returns
    /// `Some(chunk)` if the camera entered a different chunk, `None` otherwise
    pub fn follow(&mut self, eye: Point3<f32>) -> Option<ChunkCoord> {
        self.camera.position = eye;
        let chunk = ChunkCoord::from_world_position(eye);
        if chunk != self.chunk_position {
            self.chunk_position = chunk;
            Some(chunk)
        } else {
            None
        }
    }

    pub fn chunk_position(&self) -> ChunkCoord {
        self.chunk_position
    }
}
