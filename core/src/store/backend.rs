// Storage abstraction for the snapshot hook
//
// Durable backends live with the embedding application; this crate only ships
// an in-process implementation.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Key/value sink that `save_data` and `load_data` write to and read from
pub trait StorageBackend: Send + Sync {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), String>;
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, String>;
    fn flush(&self) -> Result<(), String>;
}

/// In-memory storage for tests, the CLI session and WASM pages
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<HashMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), String> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, String> {
        Ok(self.data.read().get(key).cloned())
    }

    fn flush(&self) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.put(b"k", b"v1").unwrap();
        storage.put(b"k", b"v2").unwrap();

        assert_eq!(storage.get(b"k").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(storage.get(b"missing").unwrap(), None);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_clones_share_data() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.put(b"k", b"v").unwrap();
        assert_eq!(handle.get(b"k").unwrap(), Some(b"v".to_vec()));
    }
}
