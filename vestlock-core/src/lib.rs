//! Vestlock Core - Investment Lifecycle and Timer Reconciliation
//!
//! Core domain layer for the Vestlock simulated investment platform:
//! a user commits an amount to a scheme, a maturity timer runs, and at
//! expiry the principal plus return becomes withdrawable, subject to
//! operator approval of the payout claim.
//!
//! This crate is pure and synchronous. Nothing here owns a clock, a timer
//! or any storage: every operation takes an explicit `now`, and the
//! caller decides cadence and persistence. That is what allows the client
//! loop and the operator loop - running on unsynchronized devices - to
//! re-derive bit-identical state from the same stored facts.
//!
//! # Core guarantees
//!
//! - **Forward-only state machine**: `active` -> `ready_to_withdraw` ->
//!   `withdrawn`; no transition ever moves backward.
//! - **Wall-clock anchoring**: remaining time is derived fresh from the
//!   stored start timestamp, never decremented, so reconciliation is
//!   idempotent and immune to suspension drift.
//! - **Frozen snapshots**: an in-flight investment carries its own copy
//!   of the scheme's rate and duration; later catalog edits never change
//!   the contract.
//! - **Truncating payouts**: returns are floored, never rounded up.
//!
//! # Modules
//!
//! - [`types`]: schemes, applications, investments, claims, identities
//! - [`returns`]: rate parsing and payout arithmetic
//! - [`lifecycle`]: `reconcile` / `commit` / `withdraw`
//! - [`catalog`]: the operator-maintained scheme registry

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod returns;
pub mod types;

pub use catalog::{CatalogStats, SchemeCatalog, SchemeDraft, SchemePatch};
pub use error::{VestError, VestResult};
pub use lifecycle::{commit, reconcile, withdraw};
pub use returns::{
    breakdown, compute_return, compute_total, format_duration, parse_rate, ReturnsBreakdown,
};
pub use types::{
    AdminProfile, Application, ApplicationStatus, ClaimStatus, ClientProfile, Investment,
    InvestmentId, InvestmentStatus, Scheme, SchemeId, User, UserId, WalletRef, WithdrawalClaim,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
