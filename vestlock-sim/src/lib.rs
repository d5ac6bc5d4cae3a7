//! Vestlock Simulation Runtime
//!
//! The two reconciliation loops over the shared ledger store:
//!
//! - [`ClientSession`]: one user's slice, reconciled and persisted on a
//!   fixed cadence; exposes `apply_for_scheme` and `request_withdrawal`.
//! - [`OperatorDesk`]: reads every roster client's slice, independently
//!   re-derives the same lifecycle state, and owns the claim-approval
//!   workflow that mirrors clearances back into user ledgers.
//!
//! Both loops tick against an explicit `now`; the cadence is runtime
//! policy ([`SimConfig`]), not part of the state machine. There is no
//! coordination between the loops - reconciliation is idempotent and
//! wall-clock anchored, so the views converge on the same stored facts.
//!
//! Also here: the fixed identity roster (the authentication collaborator),
//! demo seed data, and claim export rendering.

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod operator;
pub mod roster;
pub mod seed;

use std::sync::Arc;
use tokio::sync::RwLock;

use vestlock_core::SchemeCatalog;

/// Shared handle to the single owned scheme registry.
///
/// Passed into both the commit-validation path and the operator; there
/// is no ambient global catalog.
pub type CatalogHandle = Arc<RwLock<SchemeCatalog>>;

/// Wrap a catalog into a shareable handle
pub fn shared_catalog(catalog: SchemeCatalog) -> CatalogHandle {
    Arc::new(RwLock::new(catalog))
}

pub use client::{ClientSession, ClientSummary};
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use export::{claims_to_csv, claims_to_text};
pub use operator::{OperatorDesk, OwnedInvestment, PlatformStats};
pub use roster::{Role, Roster};
pub use seed::demo_catalog;
