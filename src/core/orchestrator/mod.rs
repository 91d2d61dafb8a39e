//! # Orchestrator Module
//!
//! Drives one scan from the media index through the classifiers and
//! hands selected records to the remover and the retention ledger.
//!
//! ## Stages
//! 1. **Fetch** - Load every record from the media index
//! 2. **Duplicates** - Group by normalized filename
//! 3. **Messaging apps** - Match messaging app filename patterns
//! 4. **Screenshots** - Match by subtype or filename

mod executor;
mod progress;
mod result;

pub use executor::{ScanOrchestrator, ScanOrchestratorBuilder, ScanState};
pub use progress::{NullProgress, ProgressSink};
pub use result::{ScanResult, ScanSummary};
