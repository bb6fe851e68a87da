//! Error types for the object pool

use thiserror::Error;

/// Errors reported while constructing a pool.
///
/// Run-time conditions (a closed pool, an overflowing release, an
/// over-release) are absorbed by the pool and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Invalid pool parameters: {reason}")]
    InvalidParameters { reason: String },
}

impl PoolError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            reason: reason.into(),
        }
    }
}

pub type PoolResult<T> = Result<T, PoolError>;
