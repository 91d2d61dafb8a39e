//! Blob store trait definition.

use crate::error::StoreError;

/// Trait for blob store backends
///
/// Each key holds one opaque byte blob. Callers that need
/// read-modify-write atomicity must serialize access themselves.
pub trait BlobStore: Send + Sync {
    /// Fetch the blob stored under `key`, if any
    fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous blob
    fn set_blob(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Remove the blob under `key`; missing keys are not an error
    fn delete_blob(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: BlobStore + ?Sized> BlobStore for std::sync::Arc<S> {
    fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_blob(key)
    }

    fn set_blob(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set_blob(key, value)
    }

    fn delete_blob(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete_blob(key)
    }
}
