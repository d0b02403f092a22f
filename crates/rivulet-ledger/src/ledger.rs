//! Settlement ledger: deposits, payouts, and forfeiture over a store.
//!
//! Every operation owns the full read-modify-write of one participant
//! plus the pool aggregate: state is loaded, mutated on copies, and only
//! persisted after every transfer has succeeded, so a failed transfer
//! rolls the whole operation back. Methods take `&mut self`; callers
//! needing shared access wrap the ledger in a `Mutex` or `RwLock`.
//!
//! Operation order is fixed: forfeiture check, then accrual against the
//! pool total *before* the incoming amount, then crediting the incoming
//! amount. A payout therefore never reflects the deposit that triggered
//! it. Transfers run fee first, participant payout last.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use rivulet_core::constants::{
    BPS_PRECISION, FEE_BPS, FORFEIT_PERIODS, MIN_DEPOSIT, PERIOD_SECS,
};
use rivulet_core::error::{AccrualError, LedgerError};
use rivulet_core::schedule::RateSchedule;
use rivulet_core::traits::{AccrualCalculator, Clock, LedgerStore, ValueTransfer};
use rivulet_core::types::{AccountId, Participant, SettlementReceipt};

use crate::accrual::AccrualEngine;
use crate::forfeit::ForfeiturePolicy;

/// Ledger construction parameters.
///
/// Tier boundaries, rates, splits, and windows are all data here, never
/// hard-coded in the operation logic.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Pool-size-to-rate tier table.
    pub schedule: RateSchedule,
    /// Commission taken from every gross deposit, in bps.
    pub fee_bps: u64,
    /// Smallest accepted non-zero deposit in drops.
    pub min_deposit: u64,
    /// Accrual period length in seconds.
    pub period_secs: u64,
    /// Idle periods after which a position is void.
    pub forfeit_periods: u64,
    /// Recipient of the deposit commission.
    pub fee_account: AccountId,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            schedule: RateSchedule::default(),
            fee_bps: FEE_BPS,
            min_deposit: MIN_DEPOSIT,
            period_secs: PERIOD_SECS,
            forfeit_periods: FORFEIT_PERIODS,
            fee_account: AccountId::ZERO,
        }
    }
}

/// The orchestrating aggregate over participants and the pool.
///
/// Generic over its three collaborators: persistence, the payout
/// primitive, and the clock.
pub struct SettlementLedger<S, T, C> {
    store: S,
    transfer: T,
    clock: C,
    engine: AccrualEngine,
    policy: ForfeiturePolicy,
    fee_bps: u64,
    min_deposit: u64,
    fee_account: AccountId,
}

impl<S, T, C> SettlementLedger<S, T, C>
where
    S: LedgerStore,
    T: ValueTransfer,
    C: Clock,
{
    /// Build a ledger from its collaborators and configuration.
    pub fn new(store: S, transfer: T, clock: C, config: LedgerConfig) -> Self {
        Self {
            engine: AccrualEngine::new(config.schedule, config.period_secs),
            policy: ForfeiturePolicy::new(config.forfeit_periods, config.period_secs),
            fee_bps: config.fee_bps,
            min_deposit: config.min_deposit,
            fee_account: config.fee_account,
            store,
            transfer,
            clock,
        }
    }

    /// Deposit `amount` drops for `id`, settling any pending accrual
    /// first. `amount == 0` is a settlement ping: it pays out pending
    /// accrual with no principal change.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::BelowMinimum`] for a non-zero amount under the
    ///   configured minimum; no state change.
    /// - [`LedgerError::TimestampRegression`] if the clock reads earlier
    ///   than the stored settlement time; no state change.
    /// - [`LedgerError::TransferFailed`] if a payout or fee could not be
    ///   delivered (including a pool shortfall); the whole operation is
    ///   rolled back.
    pub fn deposit(&mut self, id: &AccountId, amount: u64) -> Result<SettlementReceipt, LedgerError> {
        if amount > 0 && amount < self.min_deposit {
            return Err(LedgerError::BelowMinimum { amount, minimum: self.min_deposit });
        }

        let now = self.clock.current_time();
        let mut pool = self.store.load_pool()?;
        let existing = self.store.load_participant(id)?;
        let known = existing.is_some();
        let mut participant = existing.unwrap_or_else(|| Participant::new(now));

        if now < participant.last_settlement {
            return Err(LedgerError::TimestampRegression {
                now,
                last: participant.last_settlement,
            });
        }

        let mut receipt = SettlementReceipt {
            rate_bps: self.engine.rate_bps(pool.total_held),
            ..SettlementReceipt::default()
        };

        // Settlement math runs on copies first; every transfer is
        // deferred until the numbers are final.
        let mut payout = 0u64;
        if self.policy.is_forfeit(&participant, now) {
            // The unwithdrawn share stays with the pool: no payout, no
            // accrual for the lapsed interval.
            receipt.forfeited = self.policy.apply(&mut participant, now);
            warn!(%id, voided = receipt.forfeited, "position forfeited after inactivity");
        } else {
            let accrual = self.engine.accrue(&participant, pool.total_held, now)?;
            receipt.periods = accrual.periods;
            if accrual.owed > 0 {
                pool.total_held = pool.total_held.checked_sub(accrual.owed).ok_or_else(|| {
                    LedgerError::TransferFailed(format!(
                        "pool holds {} but owes {}",
                        pool.total_held, accrual.owed
                    ))
                })?;
                participant.total_withdrawn = participant
                    .total_withdrawn
                    .checked_add(accrual.owed)
                    .ok_or(AccrualError::ArithmeticOverflow)?;
                payout = accrual.owed;
            }
            participant.last_settlement = accrual.settled_at;
        }

        if amount > 0 {
            let fee = self.fee_for(amount);
            let net = amount - fee;
            if fee > 0 {
                self.transfer
                    .transfer(&self.fee_account, fee)
                    .map_err(|e| LedgerError::TransferFailed(e.to_string()))?;
            }
            participant.principal = participant
                .principal
                .checked_add(amount)
                .ok_or(AccrualError::ArithmeticOverflow)?;
            pool.total_held = pool
                .total_held
                .checked_add(net)
                .ok_or(AccrualError::ArithmeticOverflow)?;
            receipt.fee = fee;
            receipt.net_credited = net;
        }

        // The payout is the last fallible external action: a fee-channel
        // failure aborts before any value reaches the participant, so a
        // retry never pays the same accrual twice.
        if payout > 0 {
            self.transfer
                .transfer(id, payout)
                .map_err(|e| LedgerError::TransferFailed(e.to_string()))?;
            receipt.paid_out = payout;
        }

        // Persist only after every transfer succeeded. A ping from an
        // unknown account stays unrecorded.
        if known || amount > 0 {
            self.store.save_participant(id, &participant)?;
        }
        self.store.save_pool(&pool)?;

        if amount > 0 {
            info!(
                %id,
                amount,
                net = receipt.net_credited,
                paid_out = receipt.paid_out,
                pool = pool.total_held,
                "deposit settled"
            );
        } else {
            debug!(%id, paid_out = receipt.paid_out, pool = pool.total_held, "settlement ping");
        }

        Ok(receipt)
    }

    /// Pay out pending accrual for `id` with no principal change.
    /// Equivalent to a zero-amount deposit.
    pub fn withdraw(&mut self, id: &AccountId) -> Result<SettlementReceipt, LedgerError> {
        self.deposit(id, 0)
    }

    /// Accrued-but-unpaid balance for `id` as of now.
    ///
    /// Reports zero for unknown accounts and for positions past the
    /// forfeiture window: a lapsed share already belongs to the pool
    /// even before the next operation collapses the record.
    pub fn balance(&self, id: &AccountId) -> Result<u64, LedgerError> {
        let Some(participant) = self.store.load_participant(id)? else {
            return Ok(0);
        };
        let now = self.clock.current_time();
        if self.policy.is_forfeit(&participant, now) {
            return Ok(0);
        }
        let pool = self.store.load_pool()?;
        Ok(self.engine.accrue(&participant, pool.total_held, now)?.owed)
    }

    /// Lifetime payouts for `id`. Zero for unknown accounts.
    pub fn withdrawals(&self, id: &AccountId) -> Result<u64, LedgerError> {
        Ok(self
            .store
            .load_participant(id)?
            .map(|p| p.total_withdrawn)
            .unwrap_or(0))
    }

    /// Cumulative gross deposits for `id`. Zero for unknown accounts.
    pub fn principal(&self, id: &AccountId) -> Result<u64, LedgerError> {
        Ok(self
            .store
            .load_participant(id)?
            .map(|p| p.principal)
            .unwrap_or(0))
    }

    /// The rate currently in force, in bps per period.
    pub fn phase_rate_bps(&self) -> Result<u64, LedgerError> {
        Ok(self.engine.rate_bps(self.store.load_pool()?.total_held))
    }

    /// Value currently retained by the pool, in drops.
    pub fn total_held(&self) -> Result<u64, LedgerError> {
        Ok(self.store.load_pool()?.total_held)
    }

    /// The backing store. Mainly useful to inspect state in tests.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Commission for a gross deposit, clamped to the deposit itself.
    fn fee_for(&self, amount: u64) -> u64 {
        let fee = (amount as u128) * (self.fee_bps as u128) / BPS_PRECISION as u128;
        fee.min(amount as u128) as u64
    }
}
