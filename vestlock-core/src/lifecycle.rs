//! Investment lifecycle engine.
//!
//! One state machine shared by both reconciliation paths:
//! `active` -> `ready_to_withdraw` -> `withdrawn`, forward-only.
//!
//! Remaining time is always re-derived from the stored start timestamp and
//! the caller-supplied `now`, never decremented from the previous value.
//! That makes `reconcile` idempotent and safe to re-run after arbitrary
//! suspension without accumulating tick error, and it is what lets the
//! client and operator loops recompute the same state independently.
//!
//! Nothing here owns a clock or a cadence; every operation takes `now`.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::catalog::SchemeCatalog;
use crate::error::{VestError, VestResult};
use crate::returns::{compute_return, compute_total, parse_rate};
use crate::types::{
    Application, ApplicationStatus, ClaimStatus, ClientProfile, Investment, InvestmentId,
    InvestmentStatus, SchemeId, WithdrawalClaim,
};

/// Re-derive the timer-dependent fields of an investment from wall clock.
///
/// Terminal investments are returned unchanged. Calling this once or many
/// times with the same `now` yields identical state.
pub fn reconcile(investment: &mut Investment, now: DateTime<Utc>) {
    if investment.is_terminal() {
        return;
    }

    let remaining = (investment.end_time() - now).num_milliseconds();

    if remaining <= 0 {
        if investment.status != InvestmentStatus::ReadyToWithdraw {
            debug!(investment_id = %investment.id, "Investment matured");
        }
        investment.status = InvestmentStatus::ReadyToWithdraw;
        investment.remaining_ms = 0;
        investment.can_withdraw = true;
    } else {
        investment.status = InvestmentStatus::Active;
        investment.remaining_ms = remaining;
        investment.can_withdraw = false;
    }
}

/// Commit an amount to a live scheme on behalf of a client.
///
/// Validates against the catalog, enforces the one-outstanding-commitment-
/// per-scheme rule over the owner's existing investments, snapshots the
/// scheme's rate and duration into the new record, and appends an
/// application to the scheme's history.
pub fn commit(
    catalog: &mut SchemeCatalog,
    scheme_id: SchemeId,
    amount: u64,
    owner: &ClientProfile,
    existing: &[Investment],
    now: DateTime<Utc>,
) -> VestResult<Investment> {
    let scheme = catalog
        .get_live(scheme_id)
        .ok_or(VestError::SchemeNotFound(scheme_id))?;

    if !scheme.accepts_amount(amount) {
        return Err(VestError::AmountOutOfRange {
            amount,
            min: scheme.min_amount,
            max: scheme.max_amount,
        });
    }

    if existing
        .iter()
        .any(|inv| inv.scheme_id == scheme_id && inv.is_outstanding())
    {
        return Err(VestError::DuplicateActiveCommitment { scheme_id });
    }

    // A bad rate token on a live scheme is caught here, before any state
    // is created, so withdraw can rely on the snapshot parsing.
    let rate = parse_rate(&scheme.return_rate)?;

    let investment = Investment {
        id: next_investment_id(existing, now),
        scheme_id,
        scheme_name: scheme.name.clone(),
        amount,
        return_rate: scheme.return_rate.clone(),
        duration_minutes: scheme.duration_minutes,
        started_at: now,
        applied_at: now,
        remaining_ms: scheme.duration_ms(),
        can_withdraw: false,
        status: InvestmentStatus::Active,
        expected_return: compute_return(amount, rate),
        expected_total: compute_total(amount, rate),
        withdrawn_at: None,
        cleared_at: None,
        realized_return: None,
        realized_total: None,
        wallet: None,
    };

    let application = Application {
        id: catalog.next_application_id(scheme_id),
        investor_name: owner.display_name.clone(),
        amount,
        status: ApplicationStatus::Active,
        applied_at: now,
    };
    catalog.record_application(scheme_id, application);

    Ok(investment)
}

/// Withdraw a matured investment.
///
/// The single user-invoked side-effecting transition: realizes the return,
/// stamps the record terminal, and emits the pending withdrawal claim that
/// the operator workflow will later clear. The claim carries the
/// investment's own identifier for correlation.
pub fn withdraw(
    investment: &mut Investment,
    owner: &ClientProfile,
    now: DateTime<Utc>,
) -> VestResult<WithdrawalClaim> {
    if investment.status != InvestmentStatus::ReadyToWithdraw {
        return Err(VestError::NotMatured(investment.id));
    }

    let rate = parse_rate(&investment.return_rate)?;
    let realized_return = compute_return(investment.amount, rate);
    let realized_total = compute_total(investment.amount, rate);

    investment.status = InvestmentStatus::Withdrawn;
    investment.remaining_ms = 0;
    investment.can_withdraw = false;
    investment.withdrawn_at = Some(now);
    investment.realized_return = Some(realized_return);
    investment.realized_total = Some(realized_total);
    investment.wallet = Some(owner.wallet.clone());

    Ok(WithdrawalClaim {
        id: investment.id,
        owner: owner.id.clone(),
        owner_name: owner.display_name.clone(),
        scheme_name: investment.scheme_name.clone(),
        amount: realized_total,
        wallet: owner.wallet.clone(),
        requested_at: now,
        status: ClaimStatus::Pending,
        cleared_at: None,
    })
}

/// Derive a fresh investment identifier from the commit timestamp,
/// bumping past any collision within the owner's existing set.
fn next_investment_id(existing: &[Investment], now: DateTime<Utc>) -> InvestmentId {
    let mut candidate = now.timestamp_millis().max(1) as u64;
    while existing.iter().any(|inv| inv.id.value() == candidate) {
        candidate += 1;
    }
    InvestmentId::new(candidate)
}
