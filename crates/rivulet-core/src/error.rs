//! Error types for the Rivulet pool.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccrualError {
    #[error("arithmetic overflow")] ArithmeticOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("transfer rejected: {0}")] Rejected(String),
    #[error("recipient unreachable: {0}")] Unreachable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage backend: {0}")] Backend(String),
    #[error("corrupt record: {0}")] Corrupt(String),
    #[error("serialization: {0}")] Serialization(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("deposit below minimum: {amount} < {minimum}")] BelowMinimum { amount: u64, minimum: u64 },
    #[error("payout could not be delivered: {0}")] TransferFailed(String),
    #[error("timestamp regression: now {now} precedes last settlement {last}")] TimestampRegression { now: u64, last: u64 },
    #[error(transparent)] Accrual(#[from] AccrualError),
    #[error(transparent)] Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum RivuletError {
    #[error(transparent)] Ledger(#[from] LedgerError),
    #[error(transparent)] Accrual(#[from] AccrualError),
    #[error(transparent)] Transfer(#[from] TransferError),
    #[error(transparent)] Store(#[from] StoreError),
}
