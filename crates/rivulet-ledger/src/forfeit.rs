//! Inactivity forfeiture policy.
//!
//! A position idle past the configured window is void: the unwithdrawn
//! share stays with the pool and the record is zeroed in place. This is
//! a state transition, not a deletion; the record persists and behaves
//! as newly joined.

use rivulet_core::constants::{FORFEIT_PERIODS, PERIOD_SECS};
use rivulet_core::types::Participant;

/// Decides whether a position has lapsed and applies the zeroing
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForfeiturePolicy {
    threshold_secs: u64,
}

impl ForfeiturePolicy {
    /// Policy voiding positions idle for `periods` whole periods of
    /// `period_secs` each.
    pub fn new(periods: u64, period_secs: u64) -> Self {
        Self { threshold_secs: periods.saturating_mul(period_secs) }
    }

    /// The inactivity window in seconds.
    pub fn threshold_secs(&self) -> u64 {
        self.threshold_secs
    }

    /// Whether the position is void as of `now`.
    ///
    /// A record with zero principal has nothing at stake and never
    /// forfeits.
    pub fn is_forfeit(&self, participant: &Participant, now: u64) -> bool {
        participant.principal > 0
            && now.saturating_sub(participant.last_settlement) >= self.threshold_secs
    }

    /// Zero the position in place and reset its clock to `now`.
    ///
    /// Returns the gross principal voided. The caller leaves the pool
    /// untouched: the forfeited share is retained as pool equity, not
    /// redistributed or paid out.
    pub fn apply(&self, participant: &mut Participant, now: u64) -> u64 {
        let voided = participant.principal;
        participant.principal = 0;
        participant.total_withdrawn = 0;
        participant.last_settlement = now;
        voided
    }
}

impl Default for ForfeiturePolicy {
    fn default() -> Self {
        Self::new(FORFEIT_PERIODS, PERIOD_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivulet_core::constants::COIN;

    const T0: u64 = 1_700_000_000;

    fn holder(principal: u64, last_settlement: u64) -> Participant {
        Participant { principal, last_settlement, total_withdrawn: 3 * COIN }
    }

    #[test]
    fn active_position_not_forfeit() {
        let f = ForfeiturePolicy::default();
        let p = holder(10 * COIN, T0);
        assert!(!f.is_forfeit(&p, T0));
        assert!(!f.is_forfeit(&p, T0 + 94 * PERIOD_SECS));
    }

    #[test]
    fn forfeit_at_exact_threshold() {
        let f = ForfeiturePolicy::default();
        let p = holder(10 * COIN, T0);
        assert!(!f.is_forfeit(&p, T0 + 95 * PERIOD_SECS - 1));
        assert!(f.is_forfeit(&p, T0 + 95 * PERIOD_SECS));
    }

    #[test]
    fn zero_principal_never_forfeits() {
        let f = ForfeiturePolicy::default();
        let p = Participant::new(T0);
        assert!(!f.is_forfeit(&p, T0 + 1_000 * PERIOD_SECS));
    }

    #[test]
    fn clock_behind_is_not_forfeit() {
        let f = ForfeiturePolicy::default();
        let p = holder(10 * COIN, T0);
        assert!(!f.is_forfeit(&p, T0 - 1));
    }

    #[test]
    fn apply_zeroes_everything_and_resets_clock() {
        let f = ForfeiturePolicy::default();
        let now = T0 + 96 * PERIOD_SECS;
        let mut p = holder(20 * COIN, T0);

        let voided = f.apply(&mut p, now);
        assert_eq!(voided, 20 * COIN);
        assert_eq!(p.principal, 0);
        assert_eq!(p.total_withdrawn, 0);
        assert_eq!(p.last_settlement, now);
        assert!(p.is_absent());
    }

    #[test]
    fn custom_window() {
        let f = ForfeiturePolicy::new(10, 3_600);
        let p = holder(COIN, T0);
        assert!(!f.is_forfeit(&p, T0 + 9 * 3_600));
        assert!(f.is_forfeit(&p, T0 + 10 * 3_600));
    }
}
