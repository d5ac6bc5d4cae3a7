//! Vestlock Ledger Store
//!
//! Durable persistence for the platform's logical state layout:
//!
//! - `ledger[user] -> ordered list of Investment` (one slice per user)
//! - `withdrawal_claims -> ordered list of WithdrawalClaim` (platform-wide)
//!
//! Two backends implement the [`LedgerStore`] trait:
//!
//! - [`MemoryLedger`]: process-lifetime store for tests and ephemeral runs
//! - [`JsonFileLedger`]: JSON documents under a data directory, written
//!   atomically via temp-file rename
//!
//! Reads are lenient by design: missing or corrupt documents degrade to
//! empty collections with a warning, and malformed records inside an
//! otherwise intact document are skipped individually. Losing a record is
//! recoverable here; failing a reconciliation tick is not.

pub mod error;
pub mod json;
pub mod ledger;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use json::JsonFileLedger;
pub use ledger::LedgerStore;
pub use memory::MemoryLedger;
