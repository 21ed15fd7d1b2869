use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidAlgorithm,
    InvalidSize,
    Cancelled,
    Busy,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("unrecognized sorting algorithm '{0}'")]
    InvalidAlgorithm(String),
    #[error("invalid array size {len}: at most {max} elements are supported")]
    InvalidSize { len: usize, max: usize },
    #[error("sort run was cancelled")]
    Cancelled,
    #[error("a sort run is already in flight")]
    Busy,
    #[error("sort run failed: {0}")]
    Internal(String),
}

impl SortError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SortError::InvalidAlgorithm(_) => ErrorCode::InvalidAlgorithm,
            SortError::InvalidSize { .. } => ErrorCode::InvalidSize,
            SortError::Cancelled => ErrorCode::Cancelled,
            SortError::Busy => ErrorCode::Busy,
            SortError::Internal(_) => ErrorCode::Internal,
        }
    }
}

/// Serialisable form of a [`SortError`] for event sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&SortError> for RunError {
    fn from(value: &SortError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
