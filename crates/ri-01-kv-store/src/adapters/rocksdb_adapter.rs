//! # RocksDB Storage Adapter
//!
//! Receipt chain nodes are point-looked-up by hash, so tables carry a bloom
//! filter and an LRU block cache. Batches map onto a native `WriteBatch` and
//! snapshots onto native sequence-number snapshots.

use crate::errors::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, KvSnapshot};
use rocksdb::{BlockBasedOptions, Cache, DBCompressionType, Options, WriteBatch, WriteOptions, DB};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    pub path: PathBuf,
    /// LRU block cache in bytes.
    pub block_cache_size: usize,
    /// fsync each batch.
    pub sync_writes: bool,
}

impl RocksDbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 256 * 1024 * 1024,
            sync_writes: true,
        }
    }

    /// Small cache, no fsync.
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            block_cache_size: 8 * 1024 * 1024,
            sync_writes: false,
            ..Self::new(path)
        }
    }
}

pub struct RocksDbStore {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create the database at `config.path`.
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_compression_type(DBCompressionType::Snappy);

        let mut block_opts = BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, &config.path).map_err(|e| KVStoreError::IOError {
            message: format!("Failed to open RocksDB: {}", e),
        })?;

        tracing::info!(path = %config.path.display(), "[ri-01] RocksDB receipt store opened");

        Ok(Self { db, config })
    }

    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, KVStoreError> {
        Self::open(RocksDbConfig::new(path.as_ref()))
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl KeyValueStore for RocksDbStore {
    type Snapshot<'a> = RocksDbSnapshot<'a> where Self: 'a;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db.get(key).map_err(|e| KVStoreError::IOError {
            message: format!("RocksDB get failed: {}", e),
        })
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.db
            .get_pinned(key)
            .map(|v| v.is_some())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB exists check failed: {}", e),
            })
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut batch = WriteBatch::default();

        for op in operations {
            match op {
                BatchOperation::Put { key, value } => batch.put(&key, &value),
                BatchOperation::Delete { key } => batch.delete(&key),
            }
        }

        self.db
            .write_opt(batch, &self.write_options())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB batch write failed: {}", e),
            })
    }

    fn snapshot(&self) -> Result<Self::Snapshot<'_>, KVStoreError> {
        Ok(RocksDbSnapshot {
            inner: self.db.snapshot(),
        })
    }

    fn compact(&self) -> Result<(), KVStoreError> {
        self.db.compact_range(None::<&[u8]>, None::<&[u8]>);
        tracing::info!(path = %self.config.path.display(), "[ri-01] RocksDB full-range compaction finished");
        Ok(())
    }
}

/// Point-in-time view pinned to a RocksDB sequence number.
pub struct RocksDbSnapshot<'a> {
    inner: rocksdb::Snapshot<'a>,
}

impl KvSnapshot for RocksDbSnapshot<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key).map_err(|e| KVStoreError::SnapshotError {
            message: format!("RocksDB snapshot get failed: {}", e),
        })
    }
}
