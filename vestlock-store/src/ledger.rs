//! Ledger store interface.
//!
//! Logical layout:
//! - one ordered investment list per user (that user's slice, written only
//!   by their own session, plus the operator's narrow approval write-back)
//! - one platform-wide ordered list of withdrawal claims
//!
//! Loads are lenient by contract: implementations must turn a missing or
//! corrupt document into an empty collection (with a warning), and skip
//! individual malformed records rather than failing the batch. The stored
//! data is the user's own recoverable simulation state, not critical
//! infrastructure.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::warn;

use vestlock_core::types::{Investment, UserId, WithdrawalClaim};

use crate::error::StoreResult;

/// Durable per-user investment slices and the shared claims record
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load a user's investment slice; empty if absent or unreadable
    async fn load_investments(&self, user: &UserId) -> StoreResult<Vec<Investment>>;

    /// Atomically replace a user's investment slice
    async fn save_investments(
        &self,
        user: &UserId,
        investments: &[Investment],
    ) -> StoreResult<()>;

    /// Load the platform-wide claims record; empty if absent or unreadable
    async fn load_claims(&self) -> StoreResult<Vec<WithdrawalClaim>>;

    /// Atomically replace the platform-wide claims record
    async fn save_claims(&self, claims: &[WithdrawalClaim]) -> StoreResult<()>;

    /// Append one claim to the shared record
    async fn append_claim(&self, claim: &WithdrawalClaim) -> StoreResult<()> {
        let mut claims = self.load_claims().await?;
        claims.push(claim.clone());
        self.save_claims(&claims).await
    }
}

/// Decode a persisted JSON array record-by-record.
///
/// A document that is not a JSON array yields an empty collection; a
/// malformed element is skipped. Both conditions are logged, never fatal.
pub(crate) fn decode_records<T: DeserializeOwned>(raw: &str, context: &str) -> Vec<T> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(error) => {
            warn!(%context, %error, "Corrupt persisted document, substituting empty collection");
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(values.len());
    let mut skipped = 0usize;
    for value in values {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(error) => {
                skipped += 1;
                warn!(%context, %error, "Skipping malformed record");
            }
        }
    }
    if skipped > 0 {
        warn!(%context, count = skipped, "Malformed records skipped during load");
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestlock_core::types::{ClaimStatus, InvestmentId, WalletRef};

    #[test]
    fn test_decode_rejects_non_array() {
        let records: Vec<WithdrawalClaim> = decode_records("{\"oops\": 1}", "claims");
        assert!(records.is_empty());

        let records: Vec<WithdrawalClaim> = decode_records("not json at all", "claims");
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_skips_malformed_records() {
        let claim = WithdrawalClaim {
            id: InvestmentId::new(7),
            owner: UserId::new("demo"),
            owner_name: "Demo User".to_string(),
            scheme_name: "1 Hour Boost".to_string(),
            amount: 1010,
            wallet: WalletRef::new("0xFEDCBA9876543210FEDCBA9876543210"),
            requested_at: chrono::Utc::now(),
            status: ClaimStatus::Pending,
            cleared_at: None,
        };
        let good = serde_json::to_value(&claim).unwrap();
        let raw = serde_json::to_string(&vec![
            good,
            serde_json::json!({"id": "not-a-number"}),
        ])
        .unwrap();

        let records: Vec<WithdrawalClaim> = decode_records(&raw, "claims");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, InvestmentId::new(7));
    }
}
