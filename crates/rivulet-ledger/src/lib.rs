//! # rivulet-ledger
//! Accrual engine, forfeiture policy, and the settlement ledger.
//!
//! The engine is pure integer math behind the core
//! [`AccrualCalculator`](rivulet_core::traits::AccrualCalculator) trait;
//! the ledger orchestrates deposits, payouts, and forfeiture over a
//! [`LedgerStore`](rivulet_core::traits::LedgerStore).

pub mod accrual;
pub mod forfeit;
pub mod ledger;

pub use accrual::AccrualEngine;
pub use forfeit::ForfeiturePolicy;
pub use ledger::{LedgerConfig, SettlementLedger};
