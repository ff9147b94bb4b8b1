use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("task pool is closed")]
    PoolClosed,

    #[error("scheduler has stopped")]
    SchedulerStopped,

    #[error("failed to start worker runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// A cooperative wait was cut short: the agent is exiting or the owning
/// behaviour was switched off.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("interrupted")]
pub struct Interrupted;
