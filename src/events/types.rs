//! Event type definitions for progress reporting.

use crate::core::ledger::Category;
use crate::core::orchestrator::ScanSummary;
use serde::{Deserialize, Serialize};

/// All events emitted by the cleanup engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Scan lifecycle events
    Scan(ScanEvent),
    /// Retention ledger changes
    Ledger(LedgerEvent),
}

/// Events during a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started,
    /// Progress update
    Progress(ScanProgress),
    /// Scanning completed
    Completed { summary: ScanSummary },
    /// The media index could not be read
    Failed { message: String },
}

/// Progress information during a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Fraction complete, in `[0, 1]`
    pub fraction: f64,
    /// Stage label
    pub message: String,
}

/// Events emitted when removed items move through the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Records were removed and retained
    Appended { count: usize, category: Category },
    /// A retained item was dropped from the ledger
    Restored { id: String },
    /// The ledger was emptied
    Cleared,
}
