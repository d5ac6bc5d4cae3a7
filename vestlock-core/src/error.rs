//! Error types for the Vestlock core layer.
//!
//! Failures fall into two classes with different recovery policies:
//! validation failures are reported to the caller and never retried;
//! state-conflict failures signal a stale view of shared state and the
//! correct response is to re-reconcile and re-present, not to retry.

use thiserror::Error;

use crate::types::{InvestmentId, SchemeId};

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VestError {
    #[error("Invalid rate format: {0:?}")]
    InvalidRateFormat(String),

    #[error("No live scheme with id {0}")]
    SchemeNotFound(SchemeId),

    #[error("Amount {amount} outside scheme bounds [{min}, {max}]")]
    AmountOutOfRange { amount: u64, min: u64, max: u64 },

    #[error("Outstanding investment already exists for scheme {scheme_id}")]
    DuplicateActiveCommitment { scheme_id: SchemeId },

    #[error("Investment {0} has not matured")]
    NotMatured(InvestmentId),

    #[error("Investment not found: {0}")]
    InvestmentNotFound(InvestmentId),

    #[error("Claim not found: {0}")]
    ClaimNotFound(InvestmentId),

    #[error("Claim {0} is already cleared")]
    ClaimAlreadyCleared(InvestmentId),
}

impl VestError {
    /// User-input error: report immediately, never retry automatically.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidRateFormat(_)
                | Self::SchemeNotFound(_)
                | Self::AmountOutOfRange { .. }
        )
    }

    /// Stale view of shared state: re-reconcile and re-present, do not
    /// retry the same call.
    pub fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateActiveCommitment { .. }
                | Self::NotMatured(_)
                | Self::InvestmentNotFound(_)
                | Self::ClaimNotFound(_)
                | Self::ClaimAlreadyCleared(_)
        )
    }
}

/// Result type alias for core operations
pub type VestResult<T> = Result<T, VestError>;
