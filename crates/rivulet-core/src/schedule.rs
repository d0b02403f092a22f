//! Pool-size-dependent rate schedule.
//!
//! Maps the pool's retained total to a payout rate in basis points per
//! period through an ordered list of threshold tiers. Pure and total:
//! every non-negative pool size maps to a rate.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_RATE_BPS, TIER_HIGH_RATE_BPS, TIER_HIGH_THRESHOLD, TIER_MID_RATE_BPS,
    TIER_MID_THRESHOLD,
};

/// One schedule tier: the rate paid while `total_held >= min_total_held`
/// and below the next tier's threshold.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateTier {
    /// Smallest pool size at which this tier applies, in drops.
    pub min_total_held: u64,
    /// Payout rate in bps per period.
    pub rate_bps: u64,
}

/// Ordered threshold tiers mapping pool size to a per-period rate.
///
/// Tiers are sorted by threshold at construction. Lookup picks the
/// highest threshold not exceeding the pool size, falling back to the
/// lowest tier below all thresholds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RateSchedule {
    tiers: Vec<RateTier>,
}

impl RateSchedule {
    /// Build a schedule from arbitrary tiers. Tiers are sorted by
    /// threshold; an empty list degenerates to a zero-rate schedule.
    pub fn new(mut tiers: Vec<RateTier>) -> Self {
        tiers.sort_by_key(|t| t.min_total_held);
        Self { tiers }
    }

    /// Rate in bps per period for a pool currently holding `total_held`.
    pub fn rate_bps(&self, total_held: u64) -> u64 {
        let mut rate = match self.tiers.first() {
            Some(tier) => tier.rate_bps,
            None => 0,
        };
        for tier in &self.tiers {
            if total_held >= tier.min_total_held {
                rate = tier.rate_bps;
            } else {
                break;
            }
        }
        rate
    }

    /// The configured tiers, ascending by threshold.
    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }
}

impl Default for RateSchedule {
    /// The production schedule: 2% per period at base, 3% from 300 RVL
    /// pooled, 4% from 1200 RVL pooled.
    fn default() -> Self {
        Self::new(vec![
            RateTier { min_total_held: 0, rate_bps: BASE_RATE_BPS },
            RateTier { min_total_held: TIER_MID_THRESHOLD, rate_bps: TIER_MID_RATE_BPS },
            RateTier { min_total_held: TIER_HIGH_THRESHOLD, rate_bps: TIER_HIGH_RATE_BPS },
        ])
    }
}
