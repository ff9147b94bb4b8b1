//! `pt-spatial`: passability cache and tile path search.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`world`]      | `Terrain`, `StructureSource`, `TileKind`, `Structure`, `Window`, `GridTerrain` |
//! | [`index`]      | `StructureIndex`: R-tree backed `StructureSource`           |
//! | [`cache`]      | `PassabilityCache`, `CacheConfig`, `RefreshStats`            |
//! | [`router`]     | `Router` trait, `Path`, `GridRouter` (best-first search)     |
//! | [`pathfinder`] | `Pathfinder`: fresh cache + route per query                 |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Query flow
//!
//! ```text
//! Pathfinder::find_path(start, goal)
//!   ① window    = side×side tiles centred on start
//!   ② cache     = PassabilityCache::refresh(terrain, structures in window)
//!   ③ route     = Router::route(&cache, start, goal)
//! ```
//!
//! The cache is rebuilt for every query so terrain edits and newly placed
//! structures are always observed.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Row-parallel terrain sampling in `refresh` via Rayon.     |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod cache;
pub mod error;
pub mod index;
pub mod pathfinder;
pub mod router;
pub mod world;


pub use cache::{CacheConfig, PassabilityCache, RefreshStats};
pub use error::{SpatialError, SpatialResult};
pub use index::StructureIndex;
pub use pathfinder::Pathfinder;
pub use router::{GridRouter, Path, Router};
pub use world::{
    GridTerrain, Structure, StructureKind, StructureSource, Terrain, TileKind, WallEdge, Window,
};
