//! Keeps the terrain around the viewer loaded.
//!
//! Every chunk within Chebyshev distance `radius` of the viewer's chunk is
//! ensured to exist. Chunks are never evicted, so the loaded area only grows as
//! the viewer explores.

use cgmath::Point3;
use log::info;

use super::{chunk::chunk_coord::ChunkCoord, world::World};

/// Loads chunks in a square around the viewer.
#[derive(Debug)]
pub struct ChunkStreamer {
    radius: i32,
    /// Viewer chunk at the last sync, `None` before the first one.
    last_center: Option<ChunkCoord>,
}

impl ChunkStreamer {
    pub fn new(radius: i32) -> Self {
        ChunkStreamer {
            radius: radius.max(0),
            last_center: None,
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Ensures every chunk within the radius of `position` exists.
    ///
    /// The square is only walked when the viewer's chunk differs from the last
    /// call; ensuring is idempotent, so skipping changes nothing but cost.
    ///
    /// # Returns
    /// The number of chunks created by this call.
    pub fn sync_around_viewer(&mut self, position: Point3<f32>, world: &mut World) -> usize {
        let center = ChunkCoord::from_world_position(position);
        if self.last_center == Some(center) {
            return 0;
        }
        self.last_center = Some(center);

        let before = world.chunk_count();
        for dz in -self.radius..=self.radius {
            for dx in -self.radius..=self.radius {
                world.ensure_chunk(center.offset(dx, dz));
            }
        }
        let created = world.chunk_count() - before;

        if created > 0 {
            info!(
                "Streamed {} chunks around {:?} ({} loaded)",
                created,
                center,
                world.chunk_count()
            );
        }
        created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::TerrainConfig;

    #[test]
    fn loads_the_full_square_once() {
        let mut world = World::new(1, TerrainConfig::default());
        let mut streamer = ChunkStreamer::new(2);

        assert_eq!(streamer.sync_around_viewer(Point3::new(8.0, 30.0, 8.0), &mut world), 25);
        assert!(world.contains_chunk(ChunkCoord::new(-2, 2)));
        assert!(!world.contains_chunk(ChunkCoord::new(3, 0)));

        assert_eq!(streamer.sync_around_viewer(Point3::new(9.0, 30.0, 9.0), &mut world), 0);
    }

    #[test]
    fn moving_one_chunk_adds_one_edge() {
        let mut world = World::new(1, TerrainConfig::default());
        let mut streamer = ChunkStreamer::new(1);
        streamer.sync_around_viewer(Point3::new(0.5, 30.0, 0.5), &mut world);
        assert_eq!(streamer.sync_around_viewer(Point3::new(16.5, 30.0, 0.5), &mut world), 3);
        assert_eq!(world.chunk_count(), 12);

        // Walking back creates nothing; nothing was evicted.
        assert_eq!(streamer.sync_around_viewer(Point3::new(0.5, 30.0, 0.5), &mut world), 0);
        assert_eq!(world.chunk_count(), 12);
    }
}
