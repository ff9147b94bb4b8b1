use pt_behavior::BehaviorError;
use pt_core::CoreError;
use pt_mobility::MobilityError;
use pt_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Value(#[from] CoreError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("movement error: {0}")]
    Mobility(#[from] MobilityError),

    #[cfg(feature = "serde")]
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
