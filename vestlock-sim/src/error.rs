//! Error types for the simulation runtime.

use thiserror::Error;

use vestlock_core::VestError;
use vestlock_store::StoreError;

/// Runtime errors: domain failures plus persistence write failures
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] VestError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl SimError {
    /// The domain failure, if this is one
    pub fn as_lifecycle(&self) -> Option<&VestError> {
        match self {
            Self::Lifecycle(e) => Some(e),
            Self::Store(_) => None,
        }
    }
}

/// Result type alias for runtime operations
pub type SimResult<T> = Result<T, SimError>;
