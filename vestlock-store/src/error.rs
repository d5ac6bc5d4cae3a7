//! Error types for the ledger store.
//!
//! Read-side corruption is deliberately not represented here: a corrupt
//! or missing persisted document degrades to an empty collection with a
//! logged warning, per the platform's recovery policy. Only write
//! failures surface as errors.

use thiserror::Error;

/// Ledger store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
