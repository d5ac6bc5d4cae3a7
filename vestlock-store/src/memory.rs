//! In-memory ledger store.
//!
//! Thread-safe store used by tests and ephemeral simulations; state dies
//! with the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use vestlock_core::types::{Investment, UserId, WithdrawalClaim};

use crate::error::StoreResult;
use crate::ledger::LedgerStore;

/// In-memory ledger store
#[derive(Debug, Default)]
pub struct MemoryLedger {
    investments: Arc<RwLock<HashMap<UserId, Vec<Investment>>>>,
    claims: Arc<RwLock<Vec<WithdrawalClaim>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all stored state
    pub async fn clear(&self) {
        self.investments.write().await.clear();
        self.claims.write().await.clear();
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn load_investments(&self, user: &UserId) -> StoreResult<Vec<Investment>> {
        let investments = self.investments.read().await;
        Ok(investments.get(user).cloned().unwrap_or_default())
    }

    async fn save_investments(
        &self,
        user: &UserId,
        slice: &[Investment],
    ) -> StoreResult<()> {
        let mut investments = self.investments.write().await;
        investments.insert(user.clone(), slice.to_vec());
        Ok(())
    }

    async fn load_claims(&self) -> StoreResult<Vec<WithdrawalClaim>> {
        Ok(self.claims.read().await.clone())
    }

    async fn save_claims(&self, claims: &[WithdrawalClaim]) -> StoreResult<()> {
        *self.claims.write().await = claims.to_vec();
        Ok(())
    }
}
