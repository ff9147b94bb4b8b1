//! `pt-schedule`: worker pool, cooperative checkpoints, and callback loop.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`control`]   | `Control` (exit/pause), `RunFlag`, `Checkpoint`            |
//! | [`pool`]      | `TaskPool`, `PoolConfig`                                   |
//! | [`pending`]   | `PendingTasks` (`BTreeMap<Instant, Vec<Job>>`), `ScheduledTask` |
//! | [`scheduler`] | `Scheduler` loop, `SchedulerHandle`                        |
//! | [`events`]    | `EventProcessors`: text predicates → one-shot jobs        |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`, `Interrupted`        |
//!
//! # Blocking model
//!
//! Behaviours are futures on a small multi-thread runtime.  Every wait
//! (tick sleep, pause, next scheduled task) is an `.await` through a
//! [`Checkpoint`] or the [`Scheduler`], so a waiting behaviour does not
//! occupy a worker thread.  CPU-bound path searches go to the runtime's
//! blocking pool.

pub mod control;
pub mod error;
pub mod events;
pub mod pending;
pub mod pool;
pub mod scheduler;


pub use control::{Checkpoint, Control, RunFlag};
pub use error::{Interrupted, ScheduleError, ScheduleResult};
pub use events::EventProcessors;
pub use pending::{Job, PendingTasks, ScheduledTask};
pub use pool::{PoolConfig, TaskPool};
pub use scheduler::{Scheduler, SchedulerHandle};
