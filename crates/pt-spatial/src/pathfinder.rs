//! Path queries against live world collaborators.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use pt_core::TileCoord;

use crate::{
    CacheConfig, GridRouter, PassabilityCache, Path, Router, SpatialResult, StructureSource,
    Terrain, Window,
};

/// Owns the collaborators a search needs and answers `find_path`.
///
/// Every query builds its own [`PassabilityCache`] centred on `start`, so
/// concurrent queries never share mutable state and world edits are seen on
/// the next call.
pub struct Pathfinder<R: Router = GridRouter> {
    router:     R,
    terrain:    Arc<dyn Terrain>,
    structures: Arc<dyn StructureSource>,
    config:     CacheConfig,
}

impl Pathfinder<GridRouter> {
    pub fn new(
        terrain: Arc<dyn Terrain>,
        structures: Arc<dyn StructureSource>,
        config: CacheConfig,
    ) -> Self {
        Self::with_router(GridRouter, terrain, structures, config)
    }
}

impl<R: Router> Pathfinder<R> {
    pub fn with_router(
        router: R,
        terrain: Arc<dyn Terrain>,
        structures: Arc<dyn StructureSource>,
        config: CacheConfig,
    ) -> Self {
        Self { router, terrain, structures, config }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// A cache refreshed around `origin` from the current world state.
    pub fn snapshot(&self, origin: TileCoord) -> PassabilityCache {
        let mut cache = PassabilityCache::new(self.config.clone());
        let window = Window::centered(origin, self.config.side);
        let structures = self.structures.structures_in(window);
        let stats = cache.refresh(origin, &*self.terrain, &structures);
        debug!(
            %origin,
            blocked_tiles = stats.blocked_tiles,
            blocked_edges = stats.blocked_edges,
            ignored = stats.ignored_structures,
            "passability cache refreshed"
        );
        cache
    }

    /// Route from `start` to `goal` over a freshly refreshed cache.
    pub fn find_path(&self, start: TileCoord, goal: TileCoord) -> SpatialResult<Path> {
        let t0 = Instant::now();
        let cache = self.snapshot(start);
        let result = self.router.route(&cache, start, goal);
        match &result {
            Ok(path) => debug!(
                %start, %goal,
                steps = path.steps(),
                expanded = path.expanded,
                elapsed_us = t0.elapsed().as_micros() as u64,
                "path found"
            ),
            Err(err) => debug!(
                %start, %goal, %err,
                elapsed_us = t0.elapsed().as_micros() as u64,
                "path search failed"
            ),
        }
        result
    }
}
