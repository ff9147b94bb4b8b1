//! Integer tile coordinates.

use std::fmt;

use crate::{Direction, TILE_SIZE, WorldPos};

/// A tile on the world grid, identified by value.
///
/// `TileCoord` is the key type for every per-tile map in the pathfinder
/// (search arena index, ignore sets), so it is `Copy + Eq + Hash + Ord`.
/// Ordering is row-major (`y` then `x`), which keeps sorted tile lists in
/// reading order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring tile one step in `dir`.  `Direction::None` returns
    /// `self`.
    #[inline]
    pub fn offset(self, dir: Direction) -> TileCoord {
        let (dx, dy) = dir.offset();
        TileCoord::new(self.x + dx, self.y + dy)
    }

    /// Number of 8-connected moves between `self` and `other`.
    #[inline]
    pub fn chebyshev(self, other: TileCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Squared Euclidean distance in tiles.  Exact in integers, so it can
    /// be used directly as a heap key.
    #[inline]
    pub fn dist_sq(self, other: TileCoord) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// World-space position of the tile centre.
    #[inline]
    pub fn center(self) -> WorldPos {
        let half = TILE_SIZE * 0.5;
        WorldPos::new(
            self.x as f32 * TILE_SIZE + half,
            self.y as f32 * TILE_SIZE + half,
        )
    }

    /// Direction of the single step from `self` to `next`, or
    /// `Direction::None` if the tiles are not 8-adjacent.
    #[inline]
    pub fn step_to(self, next: TileCoord) -> Direction {
        Direction::from_offset(next.x - self.x, next.y - self.y)
    }
}

impl Ord for TileCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for TileCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for TileCoord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
