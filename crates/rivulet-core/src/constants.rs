//! Pool constants. All monetary values in drops (1 RVL = 10^8 drops).

pub const COIN: u64 = 100_000_000;

/// Denominator for all basis-point rates (100% = 10_000 bps).
pub const BPS_PRECISION: u64 = 10_000;

/// Length of one accrual period in seconds (one day).
pub const PERIOD_SECS: u64 = 86_400;

/// Base payout rate below every tier threshold: 2% per period.
pub const BASE_RATE_BPS: u64 = 200;

/// Pool size at which the payout rate rises to [`TIER_MID_RATE_BPS`].
pub const TIER_MID_THRESHOLD: u64 = 300 * COIN;

/// Mid-tier payout rate: 3% per period.
pub const TIER_MID_RATE_BPS: u64 = 300;

/// Pool size at which the payout rate rises to [`TIER_HIGH_RATE_BPS`].
pub const TIER_HIGH_THRESHOLD: u64 = 1_200 * COIN;

/// High-tier payout rate: 4% per period.
pub const TIER_HIGH_RATE_BPS: u64 = 400;

/// Commission diverted from every gross deposit: 12%.
pub const FEE_BPS: u64 = 1_200;

/// Smallest accepted non-zero deposit (0.01 RVL).
/// Zero-value operations are settlement pings, not deposits.
pub const MIN_DEPOSIT: u64 = COIN / 100;

/// Whole idle periods after which a position is void.
pub const FORFEIT_PERIODS: u64 = 95;
