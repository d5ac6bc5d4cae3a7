//! Operator aggregation and claims workflow.
//!
//! The operator never trusts a cached status field: every tick it reloads
//! each roster client's slice and re-derives lifecycle state with the
//! same `reconcile` the client loop uses. The two loops run on
//! unsynchronized clocks; agreement comes from the shared pure function
//! and the stored anchors, not from coordination.
//!
//! Aggregation is read-only with respect to user slices. The single
//! cross-component mutation is [`OperatorDesk::approve_claim`], which
//! clears a pending claim and mirrors the approval back into the owning
//! user's ledger.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use vestlock_core::types::{
    ClaimStatus, ClientProfile, Investment, InvestmentId, InvestmentStatus, UserId,
    WithdrawalClaim,
};
use vestlock_core::{compute_return, compute_total, parse_rate, reconcile, VestError};
use vestlock_store::LedgerStore;

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::CatalogHandle;

/// An investment tagged with its owner, as seen in the operator view
#[derive(Debug, Clone)]
pub struct OwnedInvestment {
    pub owner: UserId,
    pub owner_name: String,
    pub investment: Investment,
}

/// Platform-wide aggregates for the operator overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformStats {
    pub total_schemes: usize,
    pub live_schemes: usize,
    pub total_clients: usize,
    pub total_applications: usize,
    pub total_committed: u64,
    pub outstanding_investments: usize,
    pub pending_claims: usize,
}

/// Operator-side aggregation and approval desk
pub struct OperatorDesk {
    roster: Vec<ClientProfile>,
    store: Arc<dyn LedgerStore>,
    catalog: CatalogHandle,
    view: Arc<RwLock<Vec<OwnedInvestment>>>,
    config: SimConfig,
    running: Arc<AtomicBool>,
}

impl OperatorDesk {
    pub fn new(
        roster: Vec<ClientProfile>,
        store: Arc<dyn LedgerStore>,
        catalog: CatalogHandle,
        config: SimConfig,
    ) -> Self {
        Self {
            roster,
            store,
            catalog,
            view: Arc::new(RwLock::new(Vec::new())),
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Rebuild the aggregated view: load every roster client's slice and
    /// re-derive lifecycle state against `now`.
    ///
    /// One unloadable slice is skipped with a warning; the batch never
    /// aborts.
    pub async fn tick(&self, now: DateTime<Utc>) -> SimResult<()> {
        let mut aggregated = Vec::new();

        for client in &self.roster {
            let slice = match self.store.load_investments(&client.id).await {
                Ok(slice) => slice,
                Err(error) => {
                    warn!(user_id = %client.id, %error, "Skipping unloadable slice in aggregation");
                    continue;
                }
            };

            for mut investment in slice {
                reconcile(&mut investment, now);
                aggregated.push(OwnedInvestment {
                    owner: client.id.clone(),
                    owner_name: client.display_name.clone(),
                    investment,
                });
            }
        }

        debug!(count = aggregated.len(), "Operator aggregation tick");
        *self.view.write().await = aggregated;
        Ok(())
    }

    /// Drive `tick` on the configured cadence until [`stop`](Self::stop)
    pub async fn run(&self) {
        self.running.store(true, Ordering::SeqCst);
        let mut ticker = interval(Duration::from_millis(self.config.operator_tick_ms.max(1)));
        info!(cadence_ms = self.config.operator_tick_ms, "Operator loop started");

        while self.running.load(Ordering::SeqCst) {
            ticker.tick().await;
            if let Err(error) = self.tick(Utc::now()).await {
                error!(%error, "Operator tick failed");
            }
        }

        info!("Operator loop stopped");
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Snapshot of the aggregated owner-tagged view
    pub async fn view(&self) -> Vec<OwnedInvestment> {
        self.view.read().await.clone()
    }

    /// All claims currently awaiting approval
    pub async fn pending_claims(&self) -> SimResult<Vec<WithdrawalClaim>> {
        let claims = self.store.load_claims().await?;
        Ok(claims.into_iter().filter(|c| c.is_pending()).collect())
    }

    /// The full claims record, cleared claims included
    pub async fn all_claims(&self) -> SimResult<Vec<WithdrawalClaim>> {
        Ok(self.store.load_claims().await?)
    }

    /// Approve a pending claim.
    ///
    /// Clears the claim, then maps the approval into ledger truth: the
    /// owning user's investment is marked withdrawn if it is not already.
    /// Approving a cleared claim fails with `ClaimAlreadyCleared` rather
    /// than silently re-clearing, so the operation stays idempotent and
    /// auditable.
    pub async fn approve_claim(
        &self,
        claim_id: InvestmentId,
        now: DateTime<Utc>,
    ) -> SimResult<WithdrawalClaim> {
        let mut claims = self.store.load_claims().await?;
        let claim = claims
            .iter_mut()
            .find(|c| c.id == claim_id)
            .ok_or(VestError::ClaimNotFound(claim_id))?;

        if claim.status == ClaimStatus::Cleared {
            return Err(VestError::ClaimAlreadyCleared(claim_id).into());
        }

        claim.status = ClaimStatus::Cleared;
        claim.cleared_at = Some(now);
        let cleared = claim.clone();
        self.store.save_claims(&claims).await?;

        self.write_back(&cleared, now).await?;

        info!(
            claim_id = %claim_id,
            user_id = %cleared.owner,
            amount = cleared.amount,
            "Claim cleared"
        );
        Ok(cleared)
    }

    /// Mirror an approval into the owning user's ledger slice.
    async fn write_back(&self, claim: &WithdrawalClaim, now: DateTime<Utc>) -> SimResult<()> {
        let mut slice = self.store.load_investments(&claim.owner).await?;

        let Some(investment) = slice.iter_mut().find(|inv| inv.id == claim.id) else {
            // The claim outlives its investment only if the user's slice
            // was lost; nothing to mirror into.
            warn!(claim_id = %claim.id, user_id = %claim.owner, "No ledger record for cleared claim");
            return Ok(());
        };

        if investment.status != InvestmentStatus::Withdrawn {
            investment.status = InvestmentStatus::Withdrawn;
            investment.remaining_ms = 0;
            investment.can_withdraw = false;
            investment.withdrawn_at.get_or_insert(now);
            if investment.realized_return.is_none() {
                if let Ok(rate) = parse_rate(&investment.return_rate) {
                    investment.realized_return = Some(compute_return(investment.amount, rate));
                    investment.realized_total = Some(compute_total(investment.amount, rate));
                }
            }
            investment.wallet.get_or_insert_with(|| claim.wallet.clone());
        }
        investment.cleared_at = Some(now);

        self.store.save_investments(&claim.owner, &slice).await?;
        Ok(())
    }

    /// Platform aggregates for the operator overview
    pub async fn stats(&self) -> SimResult<PlatformStats> {
        let catalog_stats = self.catalog.read().await.stats();
        let view = self.view.read().await;
        let pending = self.pending_claims().await?.len();

        Ok(PlatformStats {
            total_schemes: catalog_stats.total_schemes,
            live_schemes: catalog_stats.live_schemes,
            total_clients: self.roster.len(),
            total_applications: catalog_stats.total_applications,
            total_committed: catalog_stats.total_committed,
            outstanding_investments: view
                .iter()
                .filter(|o| o.investment.is_outstanding())
                .count(),
            pending_claims: pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use tokio::sync::RwLock;
    use vestlock_core::types::WalletRef;
    use vestlock_core::{commit, withdraw};
    use vestlock_store::MemoryLedger;

    use crate::seed::demo_catalog;

    fn clients() -> Vec<ClientProfile> {
        vec![
            ClientProfile {
                id: UserId::new("vishal"),
                username: "vishal".to_string(),
                display_name: "Vishal Sheoran".to_string(),
                wallet: WalletRef::new("0xABC123DEF4567890ABC123DEF4567890"),
            },
            ClientProfile {
                id: UserId::new("demo"),
                username: "demo".to_string(),
                display_name: "Demo User".to_string(),
                wallet: WalletRef::new("0xFEDCBA9876543210FEDCBA9876543210"),
            },
        ]
    }

    async fn desk_with_store() -> (OperatorDesk, Arc<MemoryLedger>, CatalogHandle) {
        let store = Arc::new(MemoryLedger::new());
        let catalog = Arc::new(RwLock::new(demo_catalog()));
        let desk = OperatorDesk::new(
            clients(),
            store.clone(),
            catalog.clone(),
            SimConfig::test(),
        );
        (desk, store, catalog)
    }

    /// Seed one committed investment for a user directly through the core
    /// engine, as that user's own session would have persisted it.
    async fn seed_investment(
        store: &MemoryLedger,
        catalog: &CatalogHandle,
        owner: &ClientProfile,
        started_at: DateTime<Utc>,
    ) -> Investment {
        let mut cat = catalog.write().await;
        let investment = commit(
            &mut cat,
            vestlock_core::types::SchemeId::new(1),
            1000,
            owner,
            &[],
            started_at,
        )
        .unwrap();
        store
            .save_investments(&owner.id, &[investment.clone()])
            .await
            .unwrap();
        investment
    }

    #[tokio::test]
    async fn test_aggregation_tags_owner_and_rederives() {
        let (desk, store, catalog) = desk_with_store().await;
        let [vishal, demo] = <[ClientProfile; 2]>::try_from(clients()).unwrap();

        let t0 = Utc::now() - ChronoDuration::minutes(61);
        seed_investment(&store, &catalog, &vishal, t0).await;
        seed_investment(&store, &catalog, &demo, Utc::now()).await;

        desk.tick(Utc::now()).await.unwrap();
        let view = desk.view().await;
        assert_eq!(view.len(), 2);

        let vishal_view = view
            .iter()
            .find(|o| o.owner == UserId::new("vishal"))
            .unwrap();
        // Committed 61 minutes ago on a 60 minute scheme: the operator
        // derives maturity regardless of the persisted status field.
        assert_eq!(
            vishal_view.investment.status,
            InvestmentStatus::ReadyToWithdraw
        );
        assert_eq!(vishal_view.investment.remaining_ms, 0);

        let demo_view = view
            .iter()
            .find(|o| o.owner == UserId::new("demo"))
            .unwrap();
        assert_eq!(demo_view.investment.status, InvestmentStatus::Active);
    }

    #[tokio::test]
    async fn test_approve_claim_clears_and_writes_back() {
        let (desk, store, catalog) = desk_with_store().await;
        let vishal = clients().remove(0);

        let t0 = Utc::now() - ChronoDuration::minutes(61);
        let mut investment = seed_investment(&store, &catalog, &vishal, t0).await;

        // The user withdraws through the engine; the slice keeps the
        // terminal record and the claim goes to the shared record.
        reconcile(&mut investment, Utc::now());
        let claim = withdraw(&mut investment, &vishal, Utc::now()).unwrap();
        store
            .save_investments(&vishal.id, &[investment.clone()])
            .await
            .unwrap();
        store.append_claim(&claim).await.unwrap();

        let now = Utc::now();
        let cleared = desk.approve_claim(claim.id, now).await.unwrap();
        assert_eq!(cleared.status, ClaimStatus::Cleared);
        assert_eq!(cleared.cleared_at, Some(now));

        let slice = store.load_investments(&vishal.id).await.unwrap();
        assert_eq!(slice[0].status, InvestmentStatus::Withdrawn);
        assert_eq!(slice[0].cleared_at, Some(now));
        // Already-realized figures are not recomputed
        assert_eq!(slice[0].realized_total, Some(1010));

        assert!(desk.pending_claims().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_double_approval_fails_without_remutation() {
        let (desk, store, catalog) = desk_with_store().await;
        let vishal = clients().remove(0);

        let t0 = Utc::now() - ChronoDuration::minutes(61);
        let mut investment = seed_investment(&store, &catalog, &vishal, t0).await;
        reconcile(&mut investment, Utc::now());
        let claim = withdraw(&mut investment, &vishal, Utc::now()).unwrap();
        store
            .save_investments(&vishal.id, &[investment])
            .await
            .unwrap();
        store.append_claim(&claim).await.unwrap();

        let first = desk.approve_claim(claim.id, Utc::now()).await.unwrap();
        let err = desk.approve_claim(claim.id, Utc::now()).await.unwrap_err();
        assert!(matches!(
            err.as_lifecycle(),
            Some(VestError::ClaimAlreadyCleared(_))
        ));

        // Second attempt mutated nothing
        let slice = store.load_investments(&vishal.id).await.unwrap();
        assert_eq!(slice[0].status, InvestmentStatus::Withdrawn);
        assert_eq!(slice[0].cleared_at, first.cleared_at);
        let claims = store.load_claims().await.unwrap();
        assert_eq!(claims[0].cleared_at, first.cleared_at);
    }

    #[tokio::test]
    async fn test_approve_unknown_claim() {
        let (desk, _store, _catalog) = desk_with_store().await;
        let err = desk
            .approve_claim(InvestmentId::new(404), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_lifecycle(),
            Some(VestError::ClaimNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_approval_realizes_figures_when_missing() {
        // A claim whose ledger record was never marked withdrawn client
        // side (for example the session died right after forwarding the
        // claim): approval still maps it to withdrawn and realizes the
        // payout figures.
        let (desk, store, catalog) = desk_with_store().await;
        let vishal = clients().remove(0);

        let t0 = Utc::now() - ChronoDuration::minutes(61);
        let mut investment = seed_investment(&store, &catalog, &vishal, t0).await;
        let mut on_ledger = investment.clone();
        reconcile(&mut on_ledger, Utc::now());
        store
            .save_investments(&vishal.id, &[on_ledger])
            .await
            .unwrap();

        // Claim produced from a parallel copy, ledger copy left matured
        reconcile(&mut investment, Utc::now());
        let claim = withdraw(&mut investment, &vishal, Utc::now()).unwrap();
        store.append_claim(&claim).await.unwrap();

        desk.approve_claim(claim.id, Utc::now()).await.unwrap();

        let slice = store.load_investments(&vishal.id).await.unwrap();
        assert_eq!(slice[0].status, InvestmentStatus::Withdrawn);
        assert_eq!(slice[0].realized_return, Some(10));
        assert_eq!(slice[0].realized_total, Some(1010));
        assert_eq!(slice[0].wallet, Some(vishal.wallet));
    }

    #[tokio::test]
    async fn test_stats() {
        let (desk, store, catalog) = desk_with_store().await;
        let vishal = clients().remove(0);
        seed_investment(&store, &catalog, &vishal, Utc::now()).await;

        desk.tick(Utc::now()).await.unwrap();
        let stats = desk.stats().await.unwrap();

        assert_eq!(stats.total_schemes, 3);
        assert_eq!(stats.live_schemes, 2);
        assert_eq!(stats.total_clients, 2);
        assert_eq!(stats.outstanding_investments, 1);
        assert_eq!(stats.pending_claims, 0);
        // Seed history plus the new commitment
        assert_eq!(stats.total_applications, 7);
    }
}
