//! In-memory blob store for testing.

use super::BlobStore;
use crate::error::StoreError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// In-memory blob store
///
/// Useful for testing and scenarios where persistence isn't needed.
/// Reads and writes can be switched off to simulate an unavailable store.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryBlobStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write or delete fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("simulated failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("memory store lock poisoned".to_string())
    }
}

impl BlobStore for InMemoryBlobStore {
    fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check(&self.fail_reads)?;
        let blobs = self.blobs.read().map_err(|_| Self::poisoned())?;
        Ok(blobs.get(key).cloned())
    }

    fn set_blob(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.check(&self.fail_writes)?;
        let mut blobs = self.blobs.write().map_err(|_| Self::poisoned())?;
        blobs.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete_blob(&self, key: &str) -> Result<(), StoreError> {
        self.check(&self.fail_writes)?;
        let mut blobs = self.blobs.write().map_err(|_| Self::poisoned())?;
        blobs.remove(key);
        Ok(())
    }
}
