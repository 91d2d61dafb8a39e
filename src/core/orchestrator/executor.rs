//! Scan and removal execution.

use super::progress::ProgressSink;
use super::result::ScanResult;
use crate::core::classifier::{find_messaging_app_matches, find_screenshots, group_duplicates};
use crate::core::ledger::{Category, RetentionLedger};
use crate::core::media::{MediaIndex, MediaRecord, MediaRemover};
use crate::core::store::InMemoryBlobStore;
use crate::error::{CleanupError, IndexError, RemovalError};
use crate::events::{null_sender, Event, EventSender, LedgerEvent, ScanEvent};
use std::time::Instant;

/// Lifecycle of the most recent scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    Fetching,
    Classifying,
    Done,
    Failed,
}

/// Builder for a [`ScanOrchestrator`]
#[derive(Default)]
pub struct ScanOrchestratorBuilder {
    index: Option<Box<dyn MediaIndex>>,
    remover: Option<Box<dyn MediaRemover>>,
    ledger: Option<RetentionLedger>,
    events: Option<EventSender>,
}

impl ScanOrchestratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the media index (required)
    pub fn index(mut self, index: Box<dyn MediaIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the media remover (required)
    pub fn remover(mut self, remover: Box<dyn MediaRemover>) -> Self {
        self.remover = Some(remover);
        self
    }

    /// Set the retention ledger. Defaults to one backed by memory.
    pub fn ledger(mut self, ledger: RetentionLedger) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Send lifecycle and ledger events to `events`
    pub fn events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<ScanOrchestrator, CleanupError> {
        let index = self
            .index
            .ok_or_else(|| CleanupError::Config("a media index is required".to_string()))?;
        let remover = self
            .remover
            .ok_or_else(|| CleanupError::Config("a media remover is required".to_string()))?;
        let ledger = self
            .ledger
            .unwrap_or_else(|| RetentionLedger::new(Box::new(InMemoryBlobStore::new())));

        Ok(ScanOrchestrator {
            index,
            remover,
            ledger,
            events: self.events.unwrap_or_else(null_sender),
            state: ScanState::Idle,
        })
    }
}

/// Runs scans against a media index and removes selected records.
///
/// A scan takes `&mut self`, so only one can be in flight per orchestrator.
pub struct ScanOrchestrator {
    index: Box<dyn MediaIndex>,
    remover: Box<dyn MediaRemover>,
    ledger: RetentionLedger,
    events: EventSender,
    state: ScanState,
}

impl ScanOrchestrator {
    pub fn builder() -> ScanOrchestratorBuilder {
        ScanOrchestratorBuilder::new()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn ledger(&self) -> &RetentionLedger {
        &self.ledger
    }

    /// Fetch every record and classify it.
    ///
    /// Index failures are returned unchanged and leave the state `Failed`.
    pub fn scan(&mut self, sink: &mut dyn ProgressSink) -> Result<ScanResult, IndexError> {
        let started = Instant::now();
        self.events.send(Event::Scan(ScanEvent::Started));

        sink.report(0.1, "Loading photos...");
        self.state = ScanState::Fetching;
        tracing::info!("Loading photo records");

        let records = match self.index.fetch_all_photo_records() {
            Ok(records) => records,
            Err(err) => {
                self.state = ScanState::Failed;
                tracing::error!(error = %err, "Failed to load photo records");
                self.events.send(Event::Scan(ScanEvent::Failed {
                    message: err.to_string(),
                }));
                return Err(err);
            }
        };

        self.state = ScanState::Classifying;

        sink.report(0.3, "Analyzing photos...");
        tracing::info!(records = records.len(), "Grouping duplicates");
        let duplicates = group_duplicates(&records);

        sink.report(0.6, "Finding messaging app images...");
        tracing::info!("Matching messaging app images");
        let messaging_app_matches = find_messaging_app_matches(&records);

        sink.report(0.8, "Finding screenshots...");
        tracing::info!("Matching screenshots");
        let screenshot_matches = find_screenshots(&records);

        let result = ScanResult {
            duplicates,
            messaging_app_matches,
            screenshot_matches,
            total_scanned: records.len(),
        };

        self.state = ScanState::Done;
        sink.report(1.0, "Scan complete!");

        let summary = result.summary();
        tracing::info!(
            total = summary.total_scanned,
            duplicate_groups = summary.duplicate_groups,
            messaging = summary.messaging_app_matches,
            screenshots = summary.screenshot_matches,
            duration_ms = started.elapsed().as_millis() as u64,
            "Scan complete"
        );
        self.events.send(Event::Scan(ScanEvent::Completed { summary }));

        Ok(result)
    }

    /// Remove `records` through the remover, then retain them in the ledger.
    ///
    /// Nothing is written to the ledger when removal fails.
    pub fn remove(&self, category: Category, records: &[MediaRecord]) -> Result<usize, RemovalError> {
        if records.is_empty() {
            return Ok(0);
        }

        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        self.remover.delete_records(&ids)?;
        tracing::info!(count = ids.len(), %category, "Removed records");

        self.ledger.append(records, category);
        self.events.send(Event::Ledger(LedgerEvent::Appended {
            count: records.len(),
            category,
        }));

        Ok(records.len())
    }

    /// Drop one retained item from the ledger
    pub fn restore(&self, item_id: &str) -> bool {
        let restored = self.ledger.restore(item_id);
        if restored {
            self.events.send(Event::Ledger(LedgerEvent::Restored {
                id: item_id.to_string(),
            }));
        }
        restored
    }

    /// Empty the ledger
    pub fn clear_ledger(&self) {
        self.ledger.clear();
        self.events.send(Event::Ledger(LedgerEvent::Cleared));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::{RecordingRemover, StaticIndex};
    use crate::core::orchestrator::NullProgress;
    use crate::events::EventChannel;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn record(id: &str, filename: &str, width: u32) -> MediaRecord {
        MediaRecord::photo(id, filename, width, width, Utc.timestamp_opt(id.len() as i64, 0).unwrap())
    }

    fn library() -> Vec<MediaRecord> {
        vec![
            record("1", "IMG_001.jpg", 100),
            record("2", "IMG_001 (1).jpg", 200),
            record("3", "WA_0001.jpg", 50),
            record("4", "Screenshot_2024.png", 80),
            record("5", "sunset.jpg", 120),
        ]
    }

    struct SharedRemover(Arc<RecordingRemover>);

    impl MediaRemover for SharedRemover {
        fn delete_records(&self, ids: &[String]) -> Result<(), RemovalError> {
            self.0.delete_records(ids)
        }
    }

    fn orchestrator(index: StaticIndex, remover: Arc<RecordingRemover>) -> ScanOrchestrator {
        ScanOrchestrator::builder()
            .index(Box::new(index))
            .remover(Box::new(SharedRemover(remover)))
            .build()
            .unwrap()
    }

    #[test]
    fn build_requires_index() {
        let result = ScanOrchestrator::builder()
            .remover(Box::new(RecordingRemover::new()))
            .build();
        assert!(matches!(result, Err(CleanupError::Config(_))));
    }

    #[test]
    fn build_requires_remover() {
        let result = ScanOrchestrator::builder()
            .index(Box::new(StaticIndex::new(Vec::new())))
            .build();
        assert!(matches!(result, Err(CleanupError::Config(_))));
    }

    #[test]
    fn scan_reports_stages_in_order() {
        let mut orch = orchestrator(StaticIndex::new(library()), Arc::default());
        let mut seen = Vec::new();
        let mut sink = |fraction: f64, message: &str| seen.push((fraction, message.to_string()));

        orch.scan(&mut sink).unwrap();

        let expected = vec![
            (0.1, "Loading photos..."),
            (0.3, "Analyzing photos..."),
            (0.6, "Finding messaging app images..."),
            (0.8, "Finding screenshots..."),
            (1.0, "Scan complete!"),
        ];
        let expected: Vec<(f64, String)> =
            expected.into_iter().map(|(f, m)| (f, m.to_string())).collect();
        assert_eq!(seen, expected);
        assert_eq!(orch.state(), ScanState::Done);
    }

    #[test]
    fn scan_classifies_every_category() {
        let mut orch = orchestrator(StaticIndex::new(library()), Arc::default());

        let result = orch.scan(&mut NullProgress).unwrap();

        assert_eq!(result.total_scanned, 5);
        assert_eq!(result.duplicates.len(), 1);
        assert_eq!(result.duplicates[0].best_quality.id, "2");
        assert_eq!(result.messaging_app_matches.len(), 1);
        assert_eq!(result.screenshot_matches.len(), 1);
    }

    #[test]
    fn empty_library_scans_cleanly() {
        let mut orch = orchestrator(StaticIndex::new(Vec::new()), Arc::default());

        let result = orch.scan(&mut NullProgress).unwrap();

        assert_eq!(result, ScanResult::default());
        assert_eq!(orch.state(), ScanState::Done);
    }

    #[test]
    fn index_failure_stops_progress() {
        let mut orch = orchestrator(StaticIndex::failing("permission denied"), Arc::default());
        let mut seen = Vec::new();
        let mut sink = |fraction: f64, _: &str| seen.push(fraction);

        let err = orch.scan(&mut sink).unwrap_err();

        assert!(matches!(err, IndexError::Unavailable(ref m) if m == "permission denied"));
        assert_eq!(seen, vec![0.1]);
        assert_eq!(orch.state(), ScanState::Failed);
    }

    #[test]
    fn state_starts_idle() {
        let orch = orchestrator(StaticIndex::new(Vec::new()), Arc::default());
        assert_eq!(orch.state(), ScanState::Idle);
    }

    #[test]
    fn remove_records_in_ledger() {
        let remover = Arc::new(RecordingRemover::new());
        let mut orch = orchestrator(StaticIndex::new(library()), Arc::clone(&remover));
        let result = orch.scan(&mut NullProgress).unwrap();

        let selected = result.candidates(Category::Duplicate);
        let removed = orch.remove(Category::Duplicate, &selected).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(remover.requests(), vec![vec!["1".to_string()]]);
        let items = orch.ledger().list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].record.id, "1");
        assert_eq!(items[0].category, Category::Duplicate);
    }

    #[test]
    fn failed_removal_leaves_ledger_untouched() {
        let remover = Arc::new(RecordingRemover::failing("user declined"));
        let orch = orchestrator(StaticIndex::new(library()), remover);

        let err = orch
            .remove(Category::Screenshot, &[record("4", "Screenshot_2024.png", 80)])
            .unwrap_err();

        assert!(matches!(err, RemovalError::Rejected { .. }));
        assert!(orch.ledger().is_empty());
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let remover = Arc::new(RecordingRemover::new());
        let orch = orchestrator(StaticIndex::new(library()), Arc::clone(&remover));

        assert_eq!(orch.remove(Category::MessagingApp, &[]).unwrap(), 0);
        assert!(remover.requests().is_empty());
    }

    #[test]
    fn lifecycle_events_are_sent() {
        let (sender, receiver) = EventChannel::new();
        let mut orch = ScanOrchestrator::builder()
            .index(Box::new(StaticIndex::new(library())))
            .remover(Box::new(RecordingRemover::new()))
            .events(sender)
            .build()
            .unwrap();

        orch.scan(&mut NullProgress).unwrap();
        orch.remove(Category::MessagingApp, &[record("3", "WA_0001.jpg", 50)])
            .unwrap();
        assert!(orch.restore("3"));

        let events: Vec<Event> = std::iter::from_fn(|| receiver.try_recv()).collect();
        assert!(matches!(events[0], Event::Scan(ScanEvent::Started)));
        assert!(matches!(
            events[1],
            Event::Scan(ScanEvent::Completed { summary }) if summary.total_scanned == 5
        ));
        assert!(matches!(
            events[2],
            Event::Ledger(LedgerEvent::Appended { count: 1, category: Category::MessagingApp })
        ));
        assert!(matches!(events[3], Event::Ledger(LedgerEvent::Restored { ref id }) if id == "3"));
    }
}
