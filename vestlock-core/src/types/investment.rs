//! Investment record and status state machine.
//!
//! The status only ever moves forward:
//! `active` -> `ready_to_withdraw` -> `withdrawn` (terminal).
//! The remaining-time and can-withdraw fields are derived, recomputed from
//! the stored start time by the lifecycle engine; they are persisted only
//! so a freshly loaded slice renders sensibly before the first tick.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::common::{InvestmentId, SchemeId, WalletRef};

/// Investment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    Active,
    ReadyToWithdraw,
    Withdrawn,
}

/// One user's commitment to a scheme, frozen at commitment time.
///
/// Rate and duration are snapshots; later scheme edits never touch an
/// in-flight investment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: InvestmentId,
    pub scheme_id: SchemeId,
    /// Scheme display name at commitment time
    pub scheme_name: String,
    pub amount: u64,
    /// Rate token snapshot, e.g. `"6%"`
    pub return_rate: String,
    /// Duration snapshot in minutes
    pub duration_minutes: u32,
    pub started_at: DateTime<Utc>,
    pub applied_at: DateTime<Utc>,
    /// Derived: milliseconds until maturity, clamped at 0
    pub remaining_ms: i64,
    /// Derived: true exactly when status is `ready_to_withdraw`
    pub can_withdraw: bool,
    pub status: InvestmentStatus,
    /// Projection figures computed at commitment time
    pub expected_return: u64,
    pub expected_total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawn_at: Option<DateTime<Utc>>,
    /// Stamped when the operator clears the matching claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realized_return: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realized_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<WalletRef>,
}

impl Investment {
    /// Maturity instant derived from the stored anchors
    pub fn end_time(&self) -> DateTime<Utc> {
        self.started_at + Duration::milliseconds(i64::from(self.duration_minutes) * 60_000)
    }

    /// Terminal investments are never reconciled again
    pub fn is_terminal(&self) -> bool {
        self.status == InvestmentStatus::Withdrawn
    }

    /// Outstanding means the commitment still blocks a re-commit to the
    /// same scheme: `active` or `ready_to_withdraw`.
    pub fn is_outstanding(&self) -> bool {
        matches!(
            self.status,
            InvestmentStatus::Active | InvestmentStatus::ReadyToWithdraw
        )
    }

    /// Check whether a status transition is valid (forward-only)
    pub fn is_valid_transition(&self, new_status: InvestmentStatus) -> bool {
        match (self.status, new_status) {
            (InvestmentStatus::Active, InvestmentStatus::ReadyToWithdraw) => true,
            (InvestmentStatus::ReadyToWithdraw, InvestmentStatus::Withdrawn) => true,
            // Re-deriving the current state is always allowed
            (a, b) if a == b => true,
            _ => false,
        }
    }
}
