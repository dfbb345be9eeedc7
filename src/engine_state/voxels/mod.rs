//! # Voxel World
//!
//! Representation and storage of the block world.
//!
//! ## Architecture
//!
//! * **Block**: block types, their static attributes, and cube faces
//! * **Chunk**: fixed-size columns of blocks, generated from terrain noise
//! * **World**: the sparse chunk map and all world-coordinate block access
//! * **Streaming**: keeps chunks loaded around the viewer
//!
//! ## Data Flow
//!
//! 1. The streamer asks the world to ensure the chunks around the viewer
//! 2. The world generates missing chunks and marks them dirty
//! 3. Edits go through the world, which dirties the owning chunk and any
//!    bordering neighbour
//! 4. Once per frame a capped batch of dirty chunks is re-meshed and handed to
//!    the renderer

pub mod block;
pub mod chunk;
pub mod streaming;
pub mod world;
