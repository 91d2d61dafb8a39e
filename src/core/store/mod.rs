//! # Store Module
//!
//! Key-value blob persistence used by the retention ledger.
//!
//! ## Backends
//! - `SqliteBlobStore` - Persistent storage using SQLite
//! - `InMemoryBlobStore` - For testing

mod memory;
mod sqlite;
mod traits;

pub use memory::InMemoryBlobStore;
pub use sqlite::SqliteBlobStore;
pub use traits::BlobStore;
