//! The eight movement directions plus `None` ("the tile itself").
//!
//! Offsets follow the grid convention of [`TileCoord`][crate::TileCoord]:
//! North decreases `y`.  Yaw is measured clockwise from North in degrees.

/// A grid direction.
///
/// `None` is not a move; the passability cache uses it to ask whether a tile
/// is blocked outright.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// The tile itself.
    #[default]
    None,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// The eight directions a path leg can take, cardinals first.
    pub const ALL_MOVES: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Unit `(dx, dy)` offset.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::None      => (0, 0),
            Direction::North     => (0, -1),
            Direction::South     => (0, 1),
            Direction::East      => (1, 0),
            Direction::West      => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Inverse of [`offset`][Self::offset]; anything that is not a unit
    /// step maps to `None`.
    pub fn from_offset(dx: i32, dy: i32) -> Direction {
        match (dx, dy) {
            (0, -1)  => Direction::North,
            (0, 1)   => Direction::South,
            (1, 0)   => Direction::East,
            (-1, 0)  => Direction::West,
            (1, -1)  => Direction::NorthEast,
            (-1, -1) => Direction::NorthWest,
            (1, 1)   => Direction::SouthEast,
            (-1, 1)  => Direction::SouthWest,
            _        => Direction::None,
        }
    }

    /// Facing angle in degrees, clockwise from North.  `None` has no facing.
    pub fn yaw(self) -> Option<f32> {
        match self {
            Direction::None      => None,
            Direction::North     => Some(0.0),
            Direction::NorthEast => Some(45.0),
            Direction::East      => Some(90.0),
            Direction::SouthEast => Some(135.0),
            Direction::South     => Some(180.0),
            Direction::SouthWest => Some(225.0),
            Direction::West      => Some(270.0),
            Direction::NorthWest => Some(315.0),
        }
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.offset();
        dx != 0 && dy != 0
    }

    /// Split a diagonal into its `(vertical, horizontal)` cardinal parts,
    /// e.g. `NorthEast` → `(North, East)`.  `None` for non-diagonals.
    pub fn components(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::NorthEast => Some((Direction::North, Direction::East)),
            Direction::NorthWest => Some((Direction::North, Direction::West)),
            Direction::SouthEast => Some((Direction::South, Direction::East)),
            Direction::SouthWest => Some((Direction::South, Direction::West)),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::None      => "none",
            Direction::North     => "north",
            Direction::South     => "south",
            Direction::East      => "east",
            Direction::West      => "west",
            Direction::NorthEast => "northeast",
            Direction::NorthWest => "northwest",
            Direction::SouthEast => "southeast",
            Direction::SouthWest => "southwest",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
