//! # rivulet-store
//! RocksDB-backed persistence for the Rivulet pool.

pub mod storage;

pub use storage::RocksStore;
