//! Core ledger types: accounts, participants, the pool aggregate.
//!
//! All monetary values are in drops (1 RVL = 10^8 drops).
//! All numeric fields use u64; timestamps are Unix seconds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StoreError;

/// A 32-byte participant identifier.
///
/// Opaque to the ledger: key derivation and address encoding belong to
/// the caller. Displayed as lowercase hex.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The zero account (32 zero bytes). Default fee sink until configured.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create an AccountId from a byte array.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, StoreError> {
        let raw = hex::decode(s).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|_| StoreError::Corrupt("account id must be 32 bytes".into()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// One participant's persisted position.
///
/// `principal` is the cumulative gross deposited value and the accrual
/// basis; the pool itself only retains the net-of-fee portion. A record
/// with `principal == 0` is logically absent and behaves as newly joined
/// on its next deposit.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct Participant {
    /// Cumulative gross deposits in drops. Reset to zero only by forfeiture.
    pub principal: u64,
    /// Timestamp of the last settlement (deposit, payout, or forfeiture).
    pub last_settlement: u64,
    /// Lifetime payouts in drops. Monotone except the forfeiture reset.
    pub total_withdrawn: u64,
}

impl Participant {
    /// Fresh record for a participant joining at `now`.
    pub fn new(now: u64) -> Self {
        Self {
            principal: 0,
            last_settlement: now,
            total_withdrawn: 0,
        }
    }

    /// Whether this record is logically absent (nothing at stake).
    pub fn is_absent(&self) -> bool {
        self.principal == 0
    }
}

/// Process-wide pool aggregate.
///
/// `total_held` is the value actually retained: net deposits in, payouts
/// out. The phase rate is always derived from it via the rate schedule,
/// never stored.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct Pool {
    /// Retained value in drops.
    pub total_held: u64,
}

/// Result of one accrual computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accrual {
    /// Owed-but-unwithdrawn amount in drops.
    pub owed: u64,
    /// Whole periods that elapsed since the last settlement.
    pub periods: u64,
    /// New `last_settlement` value: `now` when any whole period elapsed,
    /// otherwise the previous value (no partial-period advancement).
    pub settled_at: u64,
}

/// Result of one ledger operation, returned to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SettlementReceipt {
    /// Accrued amount paid out to the participant.
    pub paid_out: u64,
    /// Commission routed to the fee account.
    pub fee: u64,
    /// Net amount credited to the pool.
    pub net_credited: u64,
    /// Gross principal voided by forfeiture, if any.
    pub forfeited: u64,
    /// Rate applied to the settled interval, in bps per period.
    pub rate_bps: u64,
    /// Whole periods settled.
    pub periods: u64,
}
