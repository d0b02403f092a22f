//! In-memory [`LedgerStore`] implementation.
//!
//! Stores everything in a `HashMap` with no persistence. Suitable for
//! tests and simulations; the production store is RocksDB-backed
//! (rivulet-store).

use std::collections::HashMap;

use crate::error::StoreError;
use crate::traits::LedgerStore;
use crate::types::{AccountId, Participant, Pool};

/// HashMap-backed ledger store for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    participants: HashMap<AccountId, Participant>,
    pool: Pool,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the pool total directly. Test helper.
    pub fn with_pool(total_held: u64) -> Self {
        Self { participants: HashMap::new(), pool: Pool { total_held } }
    }
}

impl LedgerStore for MemoryStore {
    fn load_participant(&self, id: &AccountId) -> Result<Option<Participant>, StoreError> {
        Ok(self.participants.get(id).cloned())
    }

    fn save_participant(
        &mut self,
        id: &AccountId,
        participant: &Participant,
    ) -> Result<(), StoreError> {
        self.participants.insert(*id, participant.clone());
        Ok(())
    }

    fn load_pool(&self) -> Result<Pool, StoreError> {
        Ok(self.pool)
    }

    fn save_pool(&mut self, pool: &Pool) -> Result<(), StoreError> {
        self.pool = *pool;
        Ok(())
    }

    fn participant_count(&self) -> Result<u64, StoreError> {
        Ok(self.participants.len() as u64)
    }
}
