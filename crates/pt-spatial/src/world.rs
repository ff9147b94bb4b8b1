//! Host-world collaborators: terrain sampling and placed structures.
//!
//! The pathfinder never owns the world.  Host integrations implement
//! [`Terrain`] and [`StructureSource`] over whatever the game client streams
//! in; the cache reads them once per refresh as a read-only snapshot.
//! [`GridTerrain`] is a small in-memory implementation for tests and demos.

use std::fmt;

use pt_core::TileCoord;

// ── Window ────────────────────────────────────────────────────────────────────

/// A square block of tiles: `min` inclusive, `min + side` exclusive on both
/// axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub min:  TileCoord,
    pub side: u32,
}

impl Window {
    /// The window of side `side` whose centre tile is `origin`.  For even
    /// sides `origin` sits just south-east of the geometric centre.
    pub fn centered(origin: TileCoord, side: u32) -> Self {
        let radius = (side / 2) as i32;
        Self {
            min: TileCoord::new(origin.x - radius, origin.y - radius),
            side,
        }
    }

    /// Exclusive upper corner.
    #[inline]
    pub fn max(&self) -> TileCoord {
        TileCoord::new(self.min.x + self.side as i32, self.min.y + self.side as i32)
    }

    #[inline]
    pub fn contains(&self, tile: TileCoord) -> bool {
        let max = self.max();
        tile.x >= self.min.x && tile.x < max.x && tile.y >= self.min.y && tile.y < max.y
    }

    /// Row-major index of `tile` within the window, or `None` outside it.
    #[inline]
    pub fn index_of(&self, tile: TileCoord) -> Option<usize> {
        if !self.contains(tile) {
            return None;
        }
        let lx = (tile.x - self.min.x) as usize;
        let ly = (tile.y - self.min.y) as usize;
        Some(ly * self.side as usize + lx)
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.side as usize * self.side as usize
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {})", self.min, self.max())
    }
}

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Ground cover of a tile, as far as walking is concerned.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Ground,
    Road,
    Lava,
    ThornBush,
    /// Cave entrance with no door.
    CaveHole,
    /// Any sealed mine door.
    MineDoor,
    /// Terrain the host has not streamed in.
    Unloaded,
}

impl TileKind {
    /// Kinds that block a tile regardless of slope.
    pub fn is_impassable(self) -> bool {
        matches!(
            self,
            TileKind::Lava
                | TileKind::ThornBush
                | TileKind::CaveHole
                | TileKind::MineDoor
                | TileKind::Unloaded
        )
    }
}

/// Per-tile terrain query.
///
/// Heights are sampled at tile **corners**: the north-west corner of tile
/// `(x, y)` is vertex `(x, y)`, its south-east corner is `(x + 1, y + 1)`.
pub trait Terrain: Send + Sync {
    fn corner_height(&self, x: i32, y: i32) -> f32;

    fn tile_kind(&self, tile: TileCoord) -> TileKind;
}

// ── Structures ────────────────────────────────────────────────────────────────

/// Which edge of its tile a wall or fence occupies.  Structures are only
/// ever stored on north and west edges; the host normalises south/east
/// placements onto the neighbouring tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WallEdge {
    North,
    West,
}

/// Category of a placed fence or house wall.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructureKind {
    // Solid
    Wall,
    Fence,
    Gate,
    Palisade,
    StoneWall,
    HedgeHigh,
    Parapet,
    IronBars,
    // Open
    Arch,
    Door,
    DoubleDoor,
    Window,
    NarrowWindow,
    Oriel,
    Balcony,
    Canopy,
    Jetty,
    Portcullis,
    Barred,
    Curb,
    Flowerbed,
    HedgeLow,
    NoWall,
    /// Any unbuilt fence or wall plan.
    Plan,
}

impl StructureKind {
    /// `true` for kinds an agent can walk through.
    pub fn is_open(self) -> bool {
        !matches!(
            self,
            StructureKind::Wall
                | StructureKind::Fence
                | StructureKind::Gate
                | StructureKind::Palisade
                | StructureKind::StoneWall
                | StructureKind::HedgeHigh
                | StructureKind::Parapet
                | StructureKind::IronBars
        )
    }
}

/// A fence or house wall segment on one tile edge.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Structure {
    pub tile:  TileCoord,
    /// Height layer; 0 is ground level.
    pub layer: i32,
    pub edge:  WallEdge,
    pub kind:  StructureKind,
}

impl Structure {
    /// A ground-level segment.
    pub fn ground(tile: TileCoord, edge: WallEdge, kind: StructureKind) -> Self {
        Self { tile, layer: 0, edge, kind }
    }

    /// `true` if this segment stops ground-level movement.
    #[inline]
    pub fn blocks_ground(&self) -> bool {
        self.layer == 0 && !self.kind.is_open()
    }
}

/// Placed-object query.  Implementations may return structures outside
/// `window`; the cache ignores them.
pub trait StructureSource: Send + Sync {
    fn structures_in(&self, window: Window) -> Vec<Structure>;
}

impl StructureSource for Vec<Structure> {
    fn structures_in(&self, window: Window) -> Vec<Structure> {
        self.iter().filter(|s| window.contains(s.tile)).copied().collect()
    }
}

// ── GridTerrain ───────────────────────────────────────────────────────────────

/// A bounded in-memory heightmap.
///
/// Covers `width × height` tiles starting at `min`.  Tiles outside the grid
/// report [`TileKind::Unloaded`], so the grid edge behaves like a wall.
#[derive(Clone, Debug)]
pub struct GridTerrain {
    min:     TileCoord,
    width:   u32,
    height:  u32,
    /// `(width + 1) × (height + 1)` corner heights, row-major.
    corners: Vec<f32>,
    kinds:   Vec<TileKind>,
}

impl GridTerrain {
    /// A level grid at height 0 with every tile `Ground`.
    pub fn flat(min: TileCoord, width: u32, height: u32) -> Self {
        let corners = vec![0.0; (width as usize + 1) * (height as usize + 1)];
        let kinds = vec![TileKind::Ground; width as usize * height as usize];
        Self { min, width, height, corners, kinds }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn tile_index(&self, tile: TileCoord) -> Option<usize> {
        let lx = tile.x - self.min.x;
        let ly = tile.y - self.min.y;
        if lx < 0 || ly < 0 || lx >= self.width as i32 || ly >= self.height as i32 {
            return None;
        }
        Some(ly as usize * self.width as usize + lx as usize)
    }

    fn corner_index(&self, x: i32, y: i32) -> Option<usize> {
        let lx = x - self.min.x;
        let ly = y - self.min.y;
        if lx < 0 || ly < 0 || lx > self.width as i32 || ly > self.height as i32 {
            return None;
        }
        Some(ly as usize * (self.width as usize + 1) + lx as usize)
    }

    /// Set the height of vertex `(x, y)`.  Out-of-grid vertices are ignored.
    pub fn set_corner_height(&mut self, x: i32, y: i32, h: f32) {
        if let Some(i) = self.corner_index(x, y) {
            self.corners[i] = h;
        }
    }

    /// Set all four corners of `tile` to `h`.
    pub fn set_tile_height(&mut self, tile: TileCoord, h: f32) {
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            self.set_corner_height(tile.x + dx, tile.y + dy, h);
        }
    }

    pub fn set_kind(&mut self, tile: TileCoord, kind: TileKind) {
        if let Some(i) = self.tile_index(tile) {
            self.kinds[i] = kind;
        }
    }
}

impl Terrain for GridTerrain {
    fn corner_height(&self, x: i32, y: i32) -> f32 {
        self.corner_index(x, y).map_or(0.0, |i| self.corners[i])
    }

    fn tile_kind(&self, tile: TileCoord) -> TileKind {
        self.tile_index(tile).map_or(TileKind::Unloaded, |i| self.kinds[i])
    }
}
