//! Withdrawal claim types.
//!
//! A claim is the operator-facing record of a maturity payout, decoupled
//! from the investment so approval latency never blocks the user's own
//! withdrawal accounting. A claim shares its identifier with the
//! originating investment; that correlation is load-bearing for the
//! approval write-back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{InvestmentId, UserId, WalletRef};

/// Claim approval status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Cleared,
}

impl Default for ClaimStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Operator-visible record of one matured withdrawal awaiting approval.
///
/// Never deleted; cleared claims stay in the record for audit and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalClaim {
    /// Identifier of the originating investment
    pub id: InvestmentId,
    pub owner: UserId,
    /// Owner display name at request time
    pub owner_name: String,
    /// Scheme display name snapshot carried over from the investment
    pub scheme_name: String,
    /// Claimed payout: principal plus realized return
    pub amount: u64,
    pub wallet: WalletRef,
    pub requested_at: DateTime<Utc>,
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared_at: Option<DateTime<Utc>>,
}

impl WithdrawalClaim {
    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }
}
