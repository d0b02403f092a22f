//! Accrual engine implementing the [`AccrualCalculator`] trait.
//!
//! Computes owed-but-unwithdrawn balances from whole elapsed periods and
//! the pool-size-dependent rate schedule. All arithmetic is integer-only
//! with u128 intermediates for overflow safety.

use rivulet_core::constants::{BPS_PRECISION, PERIOD_SECS};
use rivulet_core::error::AccrualError;
use rivulet_core::schedule::RateSchedule;
use rivulet_core::traits::AccrualCalculator;
use rivulet_core::types::{Accrual, Participant};

/// The production accrual calculator.
///
/// Implements [`AccrualCalculator`] with:
/// - Tiered rate lookup against the pool total at call time
/// - Simple (non-compounding) per-period accrual, floor-truncated periods
/// - Retroactive rate application over the whole unsettled interval
#[derive(Debug, Clone)]
pub struct AccrualEngine {
    schedule: RateSchedule,
    period_secs: u64,
}

impl AccrualEngine {
    /// Create an engine over the given schedule and period length.
    pub fn new(schedule: RateSchedule, period_secs: u64) -> Self {
        Self { schedule, period_secs }
    }

    /// The configured schedule.
    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    /// The configured period length in seconds.
    pub fn period_secs(&self) -> u64 {
        self.period_secs
    }
}

impl Default for AccrualEngine {
    fn default() -> Self {
        Self::new(RateSchedule::default(), PERIOD_SECS)
    }
}

impl AccrualCalculator for AccrualEngine {
    fn rate_bps(&self, total_held: u64) -> u64 {
        self.schedule.rate_bps(total_held)
    }

    fn accrue(
        &self,
        participant: &Participant,
        total_held: u64,
        now: u64,
    ) -> Result<Accrual, AccrualError> {
        // A clock behind the stored settlement time is rejected upstream;
        // here it reads as zero elapsed time.
        let elapsed = now.saturating_sub(participant.last_settlement);
        let periods = elapsed / self.period_secs;

        if periods == 0 || participant.principal == 0 {
            return Ok(Accrual {
                owed: 0,
                periods,
                settled_at: if periods > 0 { now } else { participant.last_settlement },
            });
        }

        // owed = principal * rate * periods / BPS_PRECISION.
        // The rate reflects total_held at this moment and reaches back
        // over the entire unsettled interval.
        let rate = self.schedule.rate_bps(total_held);
        let owed = (participant.principal as u128)
            .checked_mul(rate as u128)
            .and_then(|v| v.checked_mul(periods as u128))
            .ok_or(AccrualError::ArithmeticOverflow)?
            / BPS_PRECISION as u128;

        let owed = u64::try_from(owed).map_err(|_| AccrualError::ArithmeticOverflow)?;

        Ok(Accrual { owed, periods, settled_at: now })
    }
}
