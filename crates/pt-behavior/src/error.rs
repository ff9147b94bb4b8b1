use thiserror::Error;

use crate::BehaviorKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
    /// Only one behaviour may run per agent.
    #[error("cannot start {requested}: {active} is already running")]
    Conflict {
        active:    BehaviorKind,
        requested: BehaviorKind,
    },

    #[error("invalid behaviour request: {0}")]
    InvalidRequest(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
