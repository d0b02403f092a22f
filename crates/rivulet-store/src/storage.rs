//! RocksDB-backed persistent ledger storage.
//!
//! Implements [`LedgerStore`] using RocksDB column families for
//! participant records and pool metadata. Participant values are
//! bincode-encoded; aggregate counters live in the metadata family as
//! little-endian u64s. Writes that touch more than one key use an
//! atomic [`WriteBatch`].

use std::path::Path;

use rocksdb::{ColumnFamilyDescriptor, Options, WriteBatch, DB};
use tracing::debug;

use rivulet_core::error::StoreError;
use rivulet_core::traits::LedgerStore;
use rivulet_core::types::{AccountId, Participant, Pool};

// --- Column family names ---

const CF_PARTICIPANTS: &str = "participants";
const CF_METADATA: &str = "metadata";

/// All column family names.
const ALL_CFS: &[&str] = &[CF_PARTICIPANTS, CF_METADATA];

// --- Metadata keys ---

const META_POOL_TOTAL_HELD: &[u8] = b"pool_total_held";
const META_PARTICIPANT_COUNT: &[u8] = b"participant_count";

/// RocksDB-backed persistent ledger storage.
///
/// A flat mapping of account id to participant record plus one pool
/// record, exactly the shape the ledger reads and writes. A fresh
/// database holds an empty pool and no participants.
pub struct RocksStore {
    db: DB,
}

impl RocksStore {
    /// Open or create a database at the given path, creating all column
    /// families if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = ALL_CFS
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()))
            .collect();

        let db = DB::open_cf_descriptors(&db_opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!(path = %path.as_ref().display(), "opened ledger store");
        Ok(Self { db })
    }

    /// Flush all in-memory buffers to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush().map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn cf_handle(&self, name: &str) -> Result<&rocksdb::ColumnFamily, StoreError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Backend(format!("missing column family: {name}")))
    }

    fn get_meta_u64(&self, key: &[u8]) -> Result<u64, StoreError> {
        let cf = self.cf_handle(CF_METADATA)?;
        match self
            .db
            .get_cf(cf, key)
            .map_err(|e| StoreError::Backend(e.to_string()))?
        {
            Some(bytes) => {
                let raw: [u8; 8] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| StoreError::Corrupt("metadata value is not 8 bytes".into()))?;
                Ok(u64::from_le_bytes(raw))
            }
            None => Ok(0),
        }
    }
}

impl LedgerStore for RocksStore {
    fn load_participant(&self, id: &AccountId) -> Result<Option<Participant>, StoreError> {
        let cf = self.cf_handle(CF_PARTICIPANTS)?;
        match self
            .db
            .get_cf(cf, id.as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?
        {
            Some(bytes) => {
                let (participant, _) =
                    bincode::decode_from_slice(&bytes, bincode::config::standard())
                        .map_err(|e| StoreError::Corrupt(e.to_string()))?;
                Ok(Some(participant))
            }
            None => Ok(None),
        }
    }

    fn save_participant(
        &mut self,
        id: &AccountId,
        participant: &Participant,
    ) -> Result<(), StoreError> {
        let cf = self.cf_handle(CF_PARTICIPANTS)?;
        let meta_cf = self.cf_handle(CF_METADATA)?;

        let is_new = self
            .db
            .get_cf(cf, id.as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .is_none();

        let encoded = bincode::encode_to_vec(participant, bincode::config::standard())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut batch = WriteBatch::default();
        batch.put_cf(cf, id.as_bytes(), encoded);
        if is_new {
            let count = self.get_meta_u64(META_PARTICIPANT_COUNT)? + 1;
            batch.put_cf(meta_cf, META_PARTICIPANT_COUNT, count.to_le_bytes());
        }
        self.db
            .write(batch)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn load_pool(&self) -> Result<Pool, StoreError> {
        Ok(Pool { total_held: self.get_meta_u64(META_POOL_TOTAL_HELD)? })
    }

    fn save_pool(&mut self, pool: &Pool) -> Result<(), StoreError> {
        let cf = self.cf_handle(CF_METADATA)?;
        self.db
            .put_cf(cf, META_POOL_TOTAL_HELD, pool.total_held.to_le_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn participant_count(&self) -> Result<u64, StoreError> {
        self.get_meta_u64(META_PARTICIPANT_COUNT)
    }
}
