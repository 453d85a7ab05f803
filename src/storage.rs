//! Key-value persistence for the wallet
//!
//! Two backends share the `KeyValueStore` trait: RocksDB for real sessions
//! and an in-memory map for tests and throwaway runs. Values are UTF-8
//! strings, one key per logical record.

use crate::config::{CompressionType, StorageBackend, StorageConfig};
use crate::errors::{GamemintResult, StorageError};
use rocksdb::{IteratorMode, Options, WriteOptions, DB};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// String-keyed durable store. Each `put` must be flushed before it returns.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// All stored pairs, sorted by key.
    fn entries(&self) -> Result<Vec<(String, String)>, StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn entries(&self) -> Result<Vec<(String, String)>, StorageError> {
        (**self).entries()
    }
}

/// RocksDB-backed store
#[derive(Clone)]
pub struct RocksStorage {
    db: Arc<DB>,
    sync_writes: bool,
}

impl RocksStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Self::open(path, true, &CompressionType::Lz4)
    }

    pub fn new_with_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let path = Path::new(&config.data_directory);
        if config.clear_on_start && path.exists() {
            tracing::warn!(dir = %config.data_directory, "clearing wallet data on start");
            std::fs::remove_dir_all(path)
                .map_err(|e| StorageError::DatabaseOpenFailed(e.to_string()))?;
        }
        Self::open(path, config.sync_writes, &config.compression_type)
    }

    fn open<P: AsRef<Path>>(
        path: P,
        sync_writes: bool,
        compression: &CompressionType,
    ) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_compression_type(match compression {
            CompressionType::None => rocksdb::DBCompressionType::None,
            CompressionType::Snappy => rocksdb::DBCompressionType::Snappy,
            CompressionType::Lz4 => rocksdb::DBCompressionType::Lz4,
            CompressionType::Zstd => rocksdb::DBCompressionType::Zstd,
        });

        let db = DB::open(&opts, path.as_ref())
            .map_err(|e| StorageError::DatabaseOpenFailed(e.to_string()))?;
        tracing::debug!(path = %path.as_ref().display(), "opened wallet database");
        Ok(Self {
            db: Arc::new(db),
            sync_writes,
        })
    }
}

impl KeyValueStore for RocksStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let raw = self
            .db
            .get(key.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        raw.map(|bytes| {
            String::from_utf8(bytes).map_err(|e| StorageError::CorruptedData {
                key: key.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.sync_writes);
        self.db
            .put_opt(key.as_bytes(), value.as_bytes(), &write_opts)
            .map_err(StorageError::from)
    }

    fn entries(&self) -> Result<Vec<(String, String)>, StorageError> {
        let mut out = Vec::new();
        for item in self.db.iterator(IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            out.push((
                String::from_utf8_lossy(&key).into_owned(),
                String::from_utf8_lossy(&value).into_owned(),
            ));
        }
        Ok(out)
    }
}

/// Volatile store; nothing survives the process
#[derive(Clone, Default)]
pub struct MemoryStorage {
    map: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .map
            .read()
            .map_err(|_| StorageError::ReadFailed("memory store lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .map
            .write()
            .map_err(|_| StorageError::WriteFailed("memory store lock poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(String, String)>, StorageError> {
        let map = self
            .map
            .read()
            .map_err(|_| StorageError::ReadFailed("memory store lock poisoned".to_string()))?;
        Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

/// Open the backend selected by `config`.
pub fn open_storage(config: &StorageConfig) -> GamemintResult<Box<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::RocksDb => Ok(Box::new(RocksStorage::new_with_config(config)?)),
        StorageBackend::Memory => Ok(Box::new(MemoryStorage::new())),
    }
}
