//! Trait interfaces for the Rivulet pool.
//!
//! These traits define the contracts between crates and collaborators:
//! - [`AccrualCalculator`]: settlement math engine (rivulet-ledger implements)
//! - [`ValueTransfer`]: fallible payout primitive (caller supplies)
//! - [`Clock`]: external time source (caller supplies)
//! - [`LedgerStore`]: participant and pool persistence (rivulet-store implements)

use crate::error::{AccrualError, StoreError, TransferError};
use crate::types::{AccountId, Accrual, Participant, Pool};

/// Pure computation of owed-but-unwithdrawn balances.
///
/// All math uses integer arithmetic; rates are in bps per period. The
/// rate is evaluated once per call from the pool total at call time and
/// applies to the entire unsettled interval, so pool-size changes reach
/// back over the whole pending window at the next settlement.
pub trait AccrualCalculator: Send + Sync {
    /// Current per-period rate in bps for a pool holding `total_held`.
    fn rate_bps(&self, total_held: u64) -> u64;

    /// Accrual owed to `participant` as of `now`, given the pool total.
    ///
    /// Partial periods do not accrue. A `now` earlier than the stored
    /// settlement time is treated as zero elapsed time; rejecting such
    /// inputs is the caller's responsibility.
    fn accrue(
        &self,
        participant: &Participant,
        total_held: u64,
        now: u64,
    ) -> Result<Accrual, AccrualError>;
}

/// Fallible value-transfer primitive used for payouts and fee routing.
///
/// A failed transfer must abort the surrounding ledger operation; the
/// ledger never retries internally.
pub trait ValueTransfer: Send + Sync {
    /// Deliver `amount` drops to `to`.
    fn transfer(&self, to: &AccountId, amount: u64) -> Result<(), TransferError>;
}

/// External time source, in Unix seconds.
///
/// Supplied time must be monotonic non-decreasing per participant for
/// the accrual math to remain valid.
pub trait Clock: Send + Sync {
    fn current_time(&self) -> u64;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_time(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// Participant and pool persistence.
///
/// A flat mapping of account id to participant record plus one pool
/// record. Not thread-safe; callers wrap in a `Mutex` or `RwLock` if
/// concurrent access is needed.
pub trait LedgerStore: Send + Sync {
    /// Look up a participant record. Returns `None` if never seen.
    fn load_participant(&self, id: &AccountId) -> Result<Option<Participant>, StoreError>;

    /// Write a participant record.
    fn save_participant(&mut self, id: &AccountId, participant: &Participant)
        -> Result<(), StoreError>;

    /// Read the pool aggregate. A fresh store holds an empty pool.
    fn load_pool(&self) -> Result<Pool, StoreError>;

    /// Write the pool aggregate.
    fn save_pool(&mut self, pool: &Pool) -> Result<(), StoreError>;

    /// Number of participant records ever written.
    fn participant_count(&self) -> Result<u64, StoreError>;
}
