//! Spatial-subsystem error type.

use thiserror::Error;

use pt_core::{Direction, TileCoord};

use crate::Window;

/// Errors produced by `pt-spatial`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpatialError {
    /// The search exhausted its open set without reaching `to`.  `visited`
    /// is the number of distinct tiles the search created nodes for.
    #[error("no path from {from} to {to} ({visited} tiles visited)")]
    NoPath {
        from:    TileCoord,
        to:      TileCoord,
        visited: usize,
    },

    #[error("tile {tile} is outside the cached window {window}")]
    OutOfBounds { tile: TileCoord, window: Window },

    #[error("passability of diagonal {0} is not cached; ask the router")]
    DiagonalQuery(Direction),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
