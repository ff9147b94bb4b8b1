use pt_core::CoreError;
use pt_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("invalid movement setting: {0}")]
    Config(#[from] CoreError),

    #[error("routing failed: {0}")]
    Routing(#[from] SpatialError),

    #[error("path search task failed: {0}")]
    SearchTask(String),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
