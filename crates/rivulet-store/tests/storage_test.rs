//! RocksStore round-trip and reopen tests, plus an end-to-end ledger
//! run over the persistent store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rivulet_core::constants::{COIN, PERIOD_SECS};
use rivulet_core::error::TransferError;
use rivulet_core::traits::{Clock, LedgerStore, ValueTransfer};
use rivulet_core::types::{AccountId, Participant, Pool};
use rivulet_ledger::{LedgerConfig, SettlementLedger};
use rivulet_store::RocksStore;

fn account(seed: u8) -> AccountId {
    AccountId([seed; 32])
}

#[test]
fn fresh_store_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = RocksStore::open(dir.path().join("ledger")).unwrap();

    assert_eq!(store.load_pool().unwrap(), Pool::default());
    assert_eq!(store.load_participant(&account(1)).unwrap(), None);
    assert_eq!(store.participant_count().unwrap(), 0);
}

#[test]
fn participant_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RocksStore::open(dir.path().join("ledger")).unwrap();

    let p = Participant {
        principal: 10 * COIN,
        last_settlement: 1_700_000_000,
        total_withdrawn: 3 * COIN,
    };
    store.save_participant(&account(1), &p).unwrap();

    assert_eq!(store.load_participant(&account(1)).unwrap(), Some(p));
    assert_eq!(store.participant_count().unwrap(), 1);
}

#[test]
fn overwrite_does_not_inflate_count() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RocksStore::open(dir.path().join("ledger")).unwrap();

    store.save_participant(&account(1), &Participant::new(100)).unwrap();
    store.save_participant(&account(1), &Participant::new(200)).unwrap();
    store.save_participant(&account(2), &Participant::new(300)).unwrap();

    assert_eq!(store.participant_count().unwrap(), 2);
}

#[test]
fn pool_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RocksStore::open(dir.path().join("ledger")).unwrap();

    store.save_pool(&Pool { total_held: 88 * COIN }).unwrap();
    assert_eq!(store.load_pool().unwrap().total_held, 88 * COIN);
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger");

    let p = Participant {
        principal: 20 * COIN,
        last_settlement: 1_700_000_000,
        total_withdrawn: 1,
    };
    {
        let mut store = RocksStore::open(&path).unwrap();
        store.save_participant(&account(7), &p).unwrap();
        store.save_pool(&Pool { total_held: 17 * COIN }).unwrap();
        store.flush().unwrap();
    }

    let store = RocksStore::open(&path).unwrap();
    assert_eq!(store.load_participant(&account(7)).unwrap(), Some(p));
    assert_eq!(store.load_pool().unwrap().total_held, 17 * COIN);
    assert_eq!(store.participant_count().unwrap(), 1);
}

// ----------------------------------------------------------------------
// Ledger over the persistent store
// ----------------------------------------------------------------------

#[derive(Clone, Default)]
struct ManualClock(Arc<AtomicU64>);

impl Clock for ManualClock {
    fn current_time(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

struct SinkTransfer;

impl ValueTransfer for SinkTransfer {
    fn transfer(&self, _to: &AccountId, _amount: u64) -> Result<(), TransferError> {
        Ok(())
    }
}

#[test]
fn ledger_settles_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger");
    let t0 = 1_700_000_000;
    let owner = account(0xA1);

    let clock = ManualClock(Arc::new(AtomicU64::new(t0)));
    {
        let store = RocksStore::open(&path).unwrap();
        let mut ledger =
            SettlementLedger::new(store, SinkTransfer, clock.clone(), LedgerConfig::default());
        ledger.deposit(&owner, 10 * COIN).unwrap();
        assert_eq!(ledger.total_held().unwrap(), 88 * COIN / 10);
    }

    // Two periods later, a fresh process settles against the same data.
    clock.0.store(t0 + 2 * PERIOD_SECS, Ordering::Relaxed);
    let store = RocksStore::open(&path).unwrap();
    let mut ledger =
        SettlementLedger::new(store, SinkTransfer, clock, LedgerConfig::default());

    let receipt = ledger.withdraw(&owner).unwrap();
    assert_eq!(receipt.paid_out, 4 * COIN / 10);
    assert_eq!(ledger.withdrawals(&owner).unwrap(), 4 * COIN / 10);
    assert_eq!(ledger.total_held().unwrap(), 88 * COIN / 10 - 4 * COIN / 10);
}
