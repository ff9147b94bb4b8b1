//! `pt-mobility`: walking searched paths at a fixed tick.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`body`]    | `Body` trait (position + orientation actuator), `SimBody`       |
//! | [`engine`]  | `MovementEngine<R>`: `find_path`, `walk_line`, `walk_path`     |
//! | [`config`]  | `MovementConfig`: tick length and speed                        |
//! | [`status`]  | `WalkStatus`: complete / interrupted / no path                 |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                            |
//!
//! # Movement model
//!
//! 1. `walk_path` resolves the goal tile and searches on the blocking pool.
//! 2. Each leg after the first turns the body to face its direction.
//! 3. `walk_line` snaps to the current tile centre, then moves
//!    `speed × tick` metres per tick towards the next centre, sleeping one
//!    tick between updates and waiting out pauses.
//! 4. After each leg the goal is re-read; a moved goal ends the walk as
//!    `Interrupted`.

pub mod body;
pub mod config;
pub mod engine;
pub mod error;
pub mod status;


pub use body::{Body, SimBody};
pub use config::MovementConfig;
pub use engine::MovementEngine;
pub use error::{MobilityError, MobilityResult};
pub use status::WalkStatus;
