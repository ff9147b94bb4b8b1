//! Continuous world positions and movement speed.
//!
//! `WorldPos` uses `f32` metres, matching what host clients report for the
//! agent and nearby creatures.  Tiles are square with side [`TILE_SIZE`].

use std::time::Duration;

use crate::{CoreError, CoreResult, TileCoord};

/// Side length of one tile, in metres.
pub const TILE_SIZE: f32 = 4.0;

/// A point on the ground plane, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The tile containing this point.
    #[inline]
    pub fn tile(self) -> TileCoord {
        TileCoord::new(
            (self.x / TILE_SIZE).floor() as i32,
            (self.y / TILE_SIZE).floor() as i32,
        )
    }

    /// Squared distance in metres, for nearest-target ordering.
    #[inline]
    pub fn dist_sq(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: WorldPos) -> f32 {
        self.dist_sq(other).sqrt()
    }

    /// Move `step` metres towards `target`, never overshooting it.
    pub fn step_towards(self, target: WorldPos, step: f32) -> WorldPos {
        let dist = self.distance(target);
        if dist <= step || dist == 0.0 {
            return target;
        }
        let k = step / dist;
        WorldPos::new(
            self.x + (target.x - self.x) * k,
            self.y + (target.y - self.y) * k,
        )
    }
}

impl std::fmt::Display for WorldPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Speed ─────────────────────────────────────────────────────────────────────

/// Top walking speed.  Users configure it in km/h; movement consumes it as
/// metres per tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speed {
    kmh: f32,
}

impl Speed {
    pub const DEFAULT_KMH: f32 = 15.0;

    /// Validate and build a speed.  Zero, negative, and non-finite values
    /// are rejected: a zero speed would never finish a leg.
    pub fn from_kmh(kmh: f32) -> CoreResult<Self> {
        if !kmh.is_finite() || kmh <= 0.0 {
            return Err(CoreError::InvalidSpeed(kmh));
        }
        Ok(Self { kmh })
    }

    #[inline]
    pub fn kmh(self) -> f32 {
        self.kmh
    }

    #[inline]
    pub fn metres_per_sec(self) -> f32 {
        self.kmh * 1000.0 / 3600.0
    }

    /// Distance covered in one movement tick of length `tick`.
    #[inline]
    pub fn per_tick(self, tick: Duration) -> f32 {
        self.metres_per_sec() * tick.as_secs_f32()
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self { kmh: Self::DEFAULT_KMH }
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} km/h ({:.2} m/s)", self.kmh, self.metres_per_sec())
    }
}
