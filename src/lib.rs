//! # Photo Cleanup
//!
//! Finds photos a user probably wants gone: duplicate copies, images saved
//! by messaging apps, and screenshots. Removed items stay listed in a
//! retention ledger for 30 days.
//!
//! ## Core Philosophy
//! - **Never auto-delete** - Scans only report; removal is an explicit call
//! - **Keep the best copy** - Selecting all duplicates skips each group's
//!   highest-resolution member
//! - **Best-effort bookkeeping** - Ledger storage failures never fail a removal
//!
//! ## Architecture
//! - `core` - Classifiers, ledger, stores and the scan orchestrator
//! - `events` - Event-driven progress reporting
//! - `error` - User-friendly error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{CleanupError, Result};

/// Initialize tracing for the library
///
/// Reads the filter from `RUST_LOG`. Calling this more than once is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
