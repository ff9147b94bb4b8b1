//! `pt-core`: foundational types for the tile pathing agent.
//!
//! This crate is a dependency of every other `pt-*` crate.  It intentionally
//! has no `pt-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`                                            |
//! | [`grid`]        | `TileCoord`, Chebyshev / squared-Euclidean distances  |
//! | [`direction`]   | `Direction` (8 moves + `None`), offsets and yaw       |
//! | [`geo`]         | `WorldPos`, `Speed`, `TILE_SIZE`                      |
//! | [`time`]        | `TickRate`: fixed movement tick                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Coordinate convention
//!
//! Tiles are indexed `(x, y)` with `y` growing southwards: North is
//! `(0, -1)`, East is `(+1, 0)`.  One tile spans [`geo::TILE_SIZE`] metres.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod direction;
pub mod error;
pub mod geo;
pub mod grid;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use geo::{Speed, TILE_SIZE, WorldPos};
pub use grid::TileCoord;
pub use ids::EntityId;
pub use time::TickRate;
