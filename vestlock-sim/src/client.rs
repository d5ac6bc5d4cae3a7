//! Client reconciliation loop.
//!
//! One session per logged-in client. The session owns that user's slice
//! of the ledger: it is the only writer, apart from the operator's narrow
//! claim-approval write-back. Each tick re-derives every non-terminal
//! investment from wall clock and persists the full slice, so a reloaded
//! or long-suspended session converges on the next tick.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{interval, sleep};
use tracing::{debug, error, info, warn};

use vestlock_core::types::{ClientProfile, Investment, InvestmentId, SchemeId, WithdrawalClaim};
use vestlock_core::{commit, reconcile, withdraw, VestError};
use vestlock_store::LedgerStore;

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::CatalogHandle;

/// Dashboard aggregates over one client's slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientSummary {
    /// Investments currently active or ready to withdraw
    pub active_count: usize,
    /// Principal across all investments, including completed ones
    pub total_invested: u64,
    /// Realized returns across withdrawn investments
    pub total_returns: u64,
}

/// One client's reconciliation session
pub struct ClientSession {
    profile: ClientProfile,
    store: Arc<dyn LedgerStore>,
    catalog: CatalogHandle,
    investments: Arc<RwLock<Vec<Investment>>>,
    config: SimConfig,
    running: Arc<AtomicBool>,
}

impl ClientSession {
    pub fn new(
        profile: ClientProfile,
        store: Arc<dyn LedgerStore>,
        catalog: CatalogHandle,
        config: SimConfig,
    ) -> Self {
        Self {
            profile,
            store,
            catalog,
            investments: Arc::new(RwLock::new(Vec::new())),
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn profile(&self) -> &ClientProfile {
        &self.profile
    }

    /// Hydrate the in-memory slice from the store.
    ///
    /// A missing or corrupt payload loads as an empty slice; the session
    /// never fails to start over its own recoverable state.
    pub async fn load(&self) -> SimResult<usize> {
        let loaded = self.store.load_investments(&self.profile.id).await?;
        let count = loaded.len();
        *self.investments.write().await = loaded;
        info!(user_id = %self.profile.id, count, "Client slice loaded");
        Ok(count)
    }

    /// Reconcile every non-terminal investment against `now` and persist
    /// the full slice.
    pub async fn tick(&self, now: DateTime<Utc>) -> SimResult<()> {
        let mut investments = self.investments.write().await;
        for investment in investments.iter_mut().filter(|inv| !inv.is_terminal()) {
            reconcile(investment, now);
        }
        self.store
            .save_investments(&self.profile.id, &investments)
            .await?;
        debug!(user_id = %self.profile.id, count = investments.len(), "Client tick");
        Ok(())
    }

    /// Drive `tick` on the configured cadence until [`stop`](Self::stop).
    ///
    /// A failed tick is logged and the loop carries on; the next tick
    /// re-derives everything from the stored anchors anyway.
    pub async fn run(&self) {
        self.running.store(true, Ordering::SeqCst);
        let mut ticker = interval(Duration::from_millis(self.config.client_tick_ms.max(1)));
        info!(user_id = %self.profile.id, cadence_ms = self.config.client_tick_ms, "Client loop started");

        while self.running.load(Ordering::SeqCst) {
            ticker.tick().await;
            if let Err(error) = self.tick(Utc::now()).await {
                error!(user_id = %self.profile.id, %error, "Client tick failed");
            }
        }

        info!(user_id = %self.profile.id, "Client loop stopped");
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Commit an amount to a live scheme.
    ///
    /// Resolves after the fixed confirmation delay; the wait is not
    /// cancelable and the commitment timestamp is taken when it resolves.
    pub async fn apply_for_scheme(
        &self,
        scheme_id: SchemeId,
        amount: u64,
    ) -> SimResult<Investment> {
        sleep(Duration::from_millis(self.config.confirm_delay_ms)).await;
        let now = Utc::now();

        let mut catalog = self.catalog.write().await;
        let mut investments = self.investments.write().await;

        let investment = commit(
            &mut catalog,
            scheme_id,
            amount,
            &self.profile,
            &investments,
            now,
        )?;
        investments.push(investment.clone());
        self.store
            .save_investments(&self.profile.id, &investments)
            .await?;

        info!(
            user_id = %self.profile.id,
            scheme_id = %scheme_id,
            investment_id = %investment.id,
            amount,
            "Investment committed"
        );
        Ok(investment)
    }

    /// Withdraw a matured investment and forward the payout claim to the
    /// shared claims record.
    pub async fn request_withdrawal(
        &self,
        investment_id: InvestmentId,
    ) -> SimResult<WithdrawalClaim> {
        sleep(Duration::from_millis(self.config.confirm_delay_ms)).await;
        let now = Utc::now();

        let mut investments = self.investments.write().await;
        let investment = investments
            .iter_mut()
            .find(|inv| inv.id == investment_id)
            .ok_or(VestError::InvestmentNotFound(investment_id))?;

        // Withdrawal is judged against current wall clock, not the last
        // tick's derived fields.
        reconcile(investment, now);
        let claim = withdraw(investment, &self.profile, now)?;

        self.store
            .save_investments(&self.profile.id, &investments)
            .await?;
        if let Err(error) = self.store.append_claim(&claim).await {
            // The user's own slice is already terminal; surface the claim
            // loss rather than unwinding the withdrawal.
            warn!(claim_id = %claim.id, %error, "Failed to forward withdrawal claim");
            return Err(error.into());
        }

        info!(
            user_id = %self.profile.id,
            investment_id = %investment_id,
            amount = claim.amount,
            "Withdrawal requested, claim forwarded"
        );
        Ok(claim)
    }

    /// Snapshot of the current slice
    pub async fn investments(&self) -> Vec<Investment> {
        self.investments.read().await.clone()
    }

    /// Dashboard aggregates for this client
    pub async fn summary(&self) -> ClientSummary {
        let investments = self.investments.read().await;
        ClientSummary {
            active_count: investments.iter().filter(|i| i.is_outstanding()).count(),
            total_invested: investments.iter().map(|i| i.amount).sum(),
            total_returns: investments
                .iter()
                .filter_map(|i| i.realized_return)
                .sum(),
        }
    }
}
