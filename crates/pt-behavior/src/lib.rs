//! `pt-behavior`: long-running agent behaviours on top of path walking.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`host`]      | `Host` trait (entities, busy/tool state, actions), `Entity`   |
//! | [`behavior`]  | `Behavior` trait, `BehaviorContext`, `drive`, `RunEnd`        |
//! | [`slot`]      | `BehaviorSlot`: one active behaviour per agent, `RunTicket`  |
//! | [`request`]   | `BehaviorRequest`, `BehaviorKind`                             |
//! | [`walk_to`]   | `WalkTo`: one walk to a fixed tile                           |
//! | [`follow`]    | `Follow`: track a player by name prefix                      |
//! | [`engage`]    | `Engage`: attack the nearest wild creature                   |
//! | [`groom`]     | `Groom`: groom the nearest groomable creature                |
//! | [`targeting`] | eligibility filters, nearest-target and player lookup         |
//! | [`outcome`]   | `ActionOutcome`, `OutcomeRule`, `Outcomes` broadcast channel  |
//! | [`notice`]    | `Notice`, `Notifier`, `LogNotifier`, `NoticeLog`              |
//! | [`config`]    | `BehaviorConfig`                                              |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Run model
//!
//! The agent claims the [`BehaviorSlot`], builds a behaviour from the
//! request and submits [`drive`] to its task pool.  The behaviour loops
//! (find target, approach, act, wait for the outcome) until it runs out of
//! work or its run flag is cleared.  Recoverable failures (no path, failed
//! action, timeout) are handled inside the loop by ignoring the target;
//! they never end the run.

pub mod behavior;
pub mod config;
pub mod engage;
pub mod error;
pub mod follow;
pub mod groom;
pub mod host;
pub mod notice;
pub mod outcome;
pub mod request;
pub mod slot;
pub mod targeting;
pub mod walk_to;

#[cfg(test)]
mod tests;

pub use behavior::{Behavior, BehaviorContext, RunEnd, drive};
pub use config::BehaviorConfig;
pub use engage::Engage;
pub use error::{BehaviorError, BehaviorResult};
pub use follow::Follow;
pub use groom::Groom;
pub use host::{ActionKind, Entity, Host, ToolKind};
pub use notice::{LogNotifier, Notice, NoticeLog, Notifier};
pub use outcome::{ActionOutcome, OutcomeRule, Outcomes};
pub use request::{BehaviorKind, BehaviorRequest};
pub use slot::{BehaviorSlot, RunTicket};
pub use walk_to::WalkTo;
