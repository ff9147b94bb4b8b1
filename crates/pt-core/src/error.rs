//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so validation failures raised here surface intact.

use thiserror::Error;

/// The error type for `pt-core` value construction.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid speed {0} km/h: must be finite and positive")]
    InvalidSpeed(f32),

    #[error("invalid tick duration: must be non-zero")]
    InvalidTick,
}

/// Shorthand result type for `pt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
