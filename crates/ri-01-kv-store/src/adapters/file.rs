use super::{apply_operations, InMemorySnapshot, Table};
use crate::errors::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File-backed key-value store for nodes running without RocksDB.
///
/// The full table is rewritten on every batch through a temp file and an
/// atomic rename, so a crash mid-write leaves the previous file intact.
pub struct FileBackedKVStore {
    data: RwLock<Arc<Table>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing contents if present.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let data = Self::load_from_file(&path)?;
            tracing::info!(
                path = %path.display(),
                keys = data.len(),
                "[ri-01] loaded receipt index file"
            );
            data
        } else {
            tracing::info!(path = %path.display(), "[ri-01] no existing index file, starting empty");
            Table::new()
        };

        Ok(Self {
            data: RwLock::new(Arc::new(data)),
            path,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_file(path: &Path) -> Result<Table, KVStoreError> {
        let bytes = std::fs::read(path).map_err(KVStoreError::io)?;

        // Format: [key_len:u32][key][value_len:u32][value]...
        let mut data = Table::new();
        let mut cursor = 0;

        while cursor < bytes.len() {
            let key = Self::read_chunk(&bytes, &mut cursor)?;
            let value = Self::read_chunk(&bytes, &mut cursor)?;
            data.insert(key, value);
        }

        Ok(data)
    }

    fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
        let truncated = || KVStoreError::CorruptionError {
            message: format!("truncated record at offset {}", cursor),
        };

        let len_bytes: [u8; 4] = bytes
            .get(*cursor..*cursor + 4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(truncated)?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let chunk = bytes
            .get(*cursor + 4..*cursor + 4 + len)
            .ok_or_else(truncated)?
            .to_vec();
        *cursor += 4 + len;
        Ok(chunk)
    }

    fn save_to_file(&self, data: &Table) -> Result<(), KVStoreError> {
        use std::io::Write;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(KVStoreError::io)?;
            }
        }

        let mut bytes = Vec::new();
        for (key, value) in data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(KVStoreError::io)?;
        file.write_all(&bytes).map_err(KVStoreError::io)?;
        file.sync_all().map_err(KVStoreError::io)?;

        std::fs::rename(&temp_path, &self.path).map_err(KVStoreError::io)
    }
}

impl KeyValueStore for FileBackedKVStore {
    type Snapshot<'a> = InMemorySnapshot where Self: 'a;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.read().contains_key(key))
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut guard = self.data.write();

        // Stage on a copy; memory is only swapped once the file is durable.
        let mut next = (**guard).clone();
        apply_operations(&mut next, operations);
        self.save_to_file(&next)?;

        *guard = Arc::new(next);
        Ok(())
    }

    fn snapshot(&self) -> Result<Self::Snapshot<'_>, KVStoreError> {
        Ok(InMemorySnapshot::new(Arc::clone(&*self.data.read())))
    }

    fn compact(&self) -> Result<(), KVStoreError> {
        let guard = self.data.read();
        self.save_to_file(&guard)?;
        tracing::info!(path = %self.path.display(), keys = guard.len(), "[ri-01] index file compacted");
        Ok(())
    }
}
