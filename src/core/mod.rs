//! # Core Module
//!
//! The UI-agnostic cleanup engine.
//!
//! ## Modules
//! - `media` - Media records and the index/remover collaborators
//! - `classifier` - Duplicate, messaging app and screenshot detection
//! - `store` - Key-value blob persistence
//! - `ledger` - Retention of removed items
//! - `orchestrator` - Runs scans and removals

pub mod classifier;
pub mod ledger;
pub mod media;
pub mod orchestrator;
pub mod store;

// Re-export commonly used types
pub use classifier::DuplicateGroup;
pub use ledger::{Category, RetainedItem, RetentionLedger};
pub use media::{MediaIndex, MediaRecord, MediaRemover};
pub use orchestrator::{ScanOrchestrator, ScanResult, ScanState};
pub use store::BlobStore;
