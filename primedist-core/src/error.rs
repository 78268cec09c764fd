//! Error types shared by the distance algorithms

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur while computing a distance
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DistanceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Out of memory while allocating dynamic programming rows")]
    OutOfMemory,
}

impl DistanceError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl From<TryReserveError> for DistanceError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

pub type DistanceResult<T> = Result<T, DistanceError>;
