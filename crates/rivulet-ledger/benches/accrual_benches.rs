//! Criterion benchmarks for rivulet-ledger critical operations.
//!
//! Covers: schedule lookup, accrual computation, and a full deposit
//! round through the in-memory store.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rivulet_core::constants::{COIN, PERIOD_SECS};
use rivulet_core::error::TransferError;
use rivulet_core::schedule::RateSchedule;
use rivulet_core::store::MemoryStore;
use rivulet_core::traits::{AccrualCalculator, Clock, ValueTransfer};
use rivulet_core::types::{AccountId, Participant};
use rivulet_ledger::{AccrualEngine, LedgerConfig, SettlementLedger};

struct FixedClock(u64);

impl Clock for FixedClock {
    fn current_time(&self) -> u64 {
        self.0
    }
}

struct SinkTransfer;

impl ValueTransfer for SinkTransfer {
    fn transfer(&self, _to: &AccountId, _amount: u64) -> Result<(), TransferError> {
        Ok(())
    }
}

fn bench_rate_lookup(c: &mut Criterion) {
    let schedule = RateSchedule::default();
    let held = 700 * COIN;

    c.bench_function("rate_lookup", |b| {
        b.iter(|| schedule.rate_bps(black_box(held)))
    });
}

fn bench_accrue(c: &mut Criterion) {
    let engine = AccrualEngine::default();
    let participant = Participant {
        principal: 1_000 * COIN,
        last_settlement: 1_700_000_000,
        total_withdrawn: 0,
    };
    let now = 1_700_000_000 + 30 * PERIOD_SECS;

    c.bench_function("accrue", |b| {
        b.iter(|| {
            engine.accrue(
                black_box(&participant),
                black_box(500 * COIN),
                black_box(now),
            )
        })
    });
}

fn bench_deposit(c: &mut Criterion) {
    let mut ledger = SettlementLedger::new(
        MemoryStore::new(),
        SinkTransfer,
        FixedClock(1_700_000_000),
        LedgerConfig::default(),
    );
    let id = AccountId([0x42; 32]);

    c.bench_function("deposit", |b| {
        b.iter(|| ledger.deposit(black_box(&id), black_box(10 * COIN)))
    });
}

criterion_group!(benches, bench_rate_lookup, bench_accrue, bench_deposit);
criterion_main!(benches);
