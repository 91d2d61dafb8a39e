//! # Ledger Module
//!
//! Keeps removed items restorable for a fixed retention window.
//!
//! ## Features
//! - One versioned JSON document per ledger, stored through a `BlobStore`
//! - Lazy expiry: expired items are dropped when the ledger is read
//! - Best effort: storage failures are logged, never raised

mod clock;
mod retention;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use retention::{
    days_remaining_at, LedgerConfig, RetentionLedger, DEFAULT_LEDGER_KEY, RETENTION_DAYS,
};
pub use types::{Category, LedgerDocument, RetainedItem, LEDGER_VERSION};
