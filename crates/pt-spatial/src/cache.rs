//! Windowed passability flags.
//!
//! # Layout
//!
//! One byte per tile, row-major over a `side × side` [`Window`] centred on
//! the refresh origin.  Each byte carries three independent bits:
//!
//! | Bit     | Meaning                              |
//! |---------|--------------------------------------|
//! | `NORTH` | the tile's north edge is blocked     |
//! | `WEST`  | the tile's west edge is blocked      |
//! | `TILE`  | the tile itself cannot be entered    |
//!
//! East and south edges are never stored.  They are answered from the
//! neighbour's west and north bits, so a wall reads the same from both sides.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{trace, warn};

use pt_core::{Direction, TileCoord};

use crate::{SpatialError, SpatialResult, Structure, Terrain, WallEdge, Window};

const NORTH: u8 = 1;
const WEST: u8 = 1 << 1;
const TILE: u8 = 1 << 2;

// ── CacheConfig ───────────────────────────────────────────────────────────────

/// Passability window parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    /// Window side length in tiles.
    pub side:       u32,
    /// Largest allowed height difference between any two corners of a tile.
    pub max_slope:  f32,
    /// A tile whose four corners all lie below this height is blocked.
    pub min_height: f32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { side: 512, max_slope: 3.0, min_height: -1.5 }
    }
}

// ── RefreshStats ──────────────────────────────────────────────────────────────

/// Counters from one [`PassabilityCache::refresh`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub blocked_tiles:      usize,
    pub blocked_edges:      usize,
    /// Structures ignored for being open, off layer 0, or outside the window.
    pub ignored_structures: usize,
}

// ── PassabilityCache ──────────────────────────────────────────────────────────

/// Per-tile blocking flags over a bounded window.
///
/// Built fresh for every path query by [`Pathfinder`][crate::Pathfinder];
/// read-only for the duration of one search.
#[derive(Debug)]
pub struct PassabilityCache {
    config: CacheConfig,
    window: Window,
    flags:  Vec<u8>,
    /// Set after the first out-of-window query has been logged.
    warned: AtomicBool,
}

impl PassabilityCache {
    /// An all-open cache centred on the origin tile.  Call
    /// [`refresh`][Self::refresh] before querying.
    pub fn new(config: CacheConfig) -> Self {
        let window = Window::centered(TileCoord::default(), config.side);
        Self {
            flags: vec![0; window.area()],
            window,
            config,
            warned: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The window captured by the last refresh.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Raw flag buffer, row-major over [`window`][Self::window].
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    /// Re-centre on `origin`, clear every flag, then re-derive blocking from
    /// `terrain` and `structures`.
    pub fn refresh(
        &mut self,
        origin: TileCoord,
        terrain: &dyn Terrain,
        structures: &[Structure],
    ) -> RefreshStats {
        self.window = Window::centered(origin, self.config.side);
        self.flags.clear();
        self.flags.resize(self.window.area(), 0);
        self.warned.store(false, Ordering::Relaxed);

        let side = (self.config.side as usize).max(1);
        let window = self.window;
        let config = &self.config;

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.flags
                .par_chunks_mut(side)
                .enumerate()
                .for_each(|(row, flags)| sample_row(config, window, terrain, row, flags));
        }
        #[cfg(not(feature = "parallel"))]
        for (row, flags) in self.flags.chunks_mut(side).enumerate() {
            sample_row(config, window, terrain, row, flags);
        }

        let mut stats = RefreshStats {
            blocked_tiles: self.flags.iter().filter(|&&f| f & TILE != 0).count(),
            ..RefreshStats::default()
        };

        for s in structures {
            let Some(idx) = self.window.index_of(s.tile) else {
                trace!(tile = %s.tile, "structure outside passability window");
                stats.ignored_structures += 1;
                continue;
            };
            if !s.blocks_ground() {
                stats.ignored_structures += 1;
                continue;
            }
            self.flags[idx] |= match s.edge {
                WallEdge::North => NORTH,
                WallEdge::West => WEST,
            };
            stats.blocked_edges += 1;
        }

        stats
    }

    /// Can an agent cross edge `dir` of `tile`?  `Direction::None` asks
    /// whether the tile itself can be entered.
    ///
    /// Diagonals are not cached: see [`GridRouter`][crate::GridRouter].
    pub fn is_passable(&self, tile: TileCoord, dir: Direction) -> SpatialResult<bool> {
        match dir {
            Direction::None => Ok(self.cell(tile)? & TILE == 0),
            Direction::North => Ok(self.cell(tile)? & NORTH == 0),
            Direction::West => Ok(self.cell(tile)? & WEST == 0),
            Direction::East => self.is_passable(tile.offset(Direction::East), Direction::West),
            Direction::South => self.is_passable(tile.offset(Direction::South), Direction::North),
            diagonal => Err(SpatialError::DiagonalQuery(diagonal)),
        }
    }

    /// Lenient [`is_passable`][Self::is_passable]: any error reads as
    /// blocked.  The first out-of-window query per refresh is logged.
    pub fn passable(&self, tile: TileCoord, dir: Direction) -> bool {
        match self.is_passable(tile, dir) {
            Ok(open) => open,
            Err(err @ SpatialError::OutOfBounds { .. }) => {
                if !self.warned.swap(true, Ordering::Relaxed) {
                    warn!(%err, "passability query outside cached window; treating as blocked");
                }
                false
            }
            Err(err) => {
                warn!(%err, "unanswerable passability query; treating as blocked");
                false
            }
        }
    }

    fn cell(&self, tile: TileCoord) -> SpatialResult<u8> {
        self.window
            .index_of(tile)
            .map(|i| self.flags[i])
            .ok_or(SpatialError::OutOfBounds { tile, window: self.window })
    }
}

// ── Terrain sampling ──────────────────────────────────────────────────────────

fn sample_row(
    config: &CacheConfig,
    window: Window,
    terrain: &dyn Terrain,
    row: usize,
    flags: &mut [u8],
) {
    let y = window.min.y + row as i32;
    for (col, flag) in flags.iter_mut().enumerate() {
        let x = window.min.x + col as i32;
        if tile_blocked(config, terrain, TileCoord::new(x, y)) {
            *flag |= TILE;
        }
    }
}

fn tile_blocked(config: &CacheConfig, terrain: &dyn Terrain, tile: TileCoord) -> bool {
    if terrain.tile_kind(tile).is_impassable() {
        return true;
    }

    let (x, y) = (tile.x, tile.y);
    let nw = terrain.corner_height(x, y);
    let ne = terrain.corner_height(x + 1, y);
    let sw = terrain.corner_height(x, y + 1);
    let se = terrain.corner_height(x + 1, y + 1);

    let pairs = [(nw, ne), (nw, sw), (ne, se), (sw, se), (nw, se), (ne, sw)];
    if pairs.iter().any(|&(a, b)| (a - b).abs() > config.max_slope) {
        return true;
    }

    [nw, ne, sw, se].iter().all(|&h| h < config.min_height)
}
