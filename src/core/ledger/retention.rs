//! The retention ledger: a time-boxed record of removed items.

use super::clock::{Clock, SystemClock};
use super::types::{Category, LedgerDocument, RetainedItem};
use crate::core::media::MediaRecord;
use crate::core::store::BlobStore;
use crate::error::LedgerError;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, MutexGuard};

/// Default key of the ledger blob
pub const DEFAULT_LEDGER_KEY: &str = "photo_cleanup.recently_removed";

/// Default retention window in days
pub const RETENTION_DAYS: i64 = 30;

/// Configuration for the ledger
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Store key holding the whole ledger
    pub key: String,
    /// How long removed items stay restorable
    pub retention: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_LEDGER_KEY.to_string(),
            retention: Duration::days(RETENTION_DAYS),
        }
    }
}

/// Outcome of reading the stored ledger
enum Loaded {
    /// Decoded items (empty when nothing was stored or the payload was corrupt)
    Items(Vec<RetainedItem>),
    /// The store could not be read; the stored blob may still be valid
    Unavailable,
}

/// Durable, best-effort ledger of removed records.
///
/// Store failures never reach the caller: unreadable, corrupt or
/// newer-version ledgers read as empty, failed writes are logged and
/// dropped. Only a corrupt ledger is ever overwritten. Every
/// read-modify-write runs under one lock.
pub struct RetentionLedger {
    store: Box<dyn BlobStore>,
    config: LedgerConfig,
    clock: Box<dyn Clock>,
    lock: Mutex<()>,
}

impl RetentionLedger {
    /// Create a ledger with the default key and 30-day window
    pub fn new(store: Box<dyn BlobStore>) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    pub fn with_config(store: Box<dyn BlobStore>, config: LedgerConfig) -> Self {
        Self {
            store,
            config,
            clock: Box::new(SystemClock),
            lock: Mutex::new(()),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Record removed items, stamped with the current instant
    pub fn append(&self, records: &[MediaRecord], category: Category) {
        if records.is_empty() {
            return;
        }

        let _guard = self.guard();
        let (mut items, _) = match self.load() {
            Loaded::Items(items) => self.unexpired(items),
            Loaded::Unavailable => {
                tracing::error!(
                    count = records.len(),
                    %category,
                    "ledger unreadable, removed items were not recorded"
                );
                return;
            }
        };

        let removed_at = self.clock.now();
        items.extend(records.iter().map(|record| RetainedItem {
            record: record.clone(),
            removed_at,
            category,
        }));

        if self.save(&items) {
            tracing::info!(count = records.len(), %category, "recorded removed items");
        }
    }

    /// Items still inside the retention window, oldest first.
    ///
    /// Expired items are dropped from the store as a side effect.
    pub fn list(&self) -> Vec<RetainedItem> {
        let _guard = self.guard();
        match self.load() {
            Loaded::Items(items) => self.compact(items),
            Loaded::Unavailable => Vec::new(),
        }
    }

    /// Number of restorable items
    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every removed item
    pub fn clear(&self) {
        let _guard = self.guard();
        match self.store.delete_blob(&self.config.key) {
            Ok(()) => tracing::info!("cleared recently removed items"),
            Err(e) => tracing::error!(error = %e, "failed to clear ledger"),
        }
    }

    /// Drop the entry for `item_id` from the ledger.
    ///
    /// Returns `true` only when an entry matched and the updated ledger
    /// was written. The media item itself is not re-created.
    pub fn restore(&self, item_id: &str) -> bool {
        let _guard = self.guard();
        let items = match self.load() {
            Loaded::Items(items) => self.compact(items),
            Loaded::Unavailable => return false,
        };

        let before = items.len();
        let remaining: Vec<RetainedItem> = items
            .into_iter()
            .filter(|item| item.record.id != item_id)
            .collect();

        if remaining.len() == before {
            tracing::debug!(id = item_id, "nothing to restore");
            return false;
        }

        let saved = self.save(&remaining);
        if saved {
            tracing::info!(id = item_id, "restored item from ledger");
        }
        saved
    }

    /// Whole days left before an item removed at `removed_at` expires
    pub fn days_remaining(&self, removed_at: DateTime<Utc>) -> i64 {
        days_remaining_at(removed_at, self.clock.now(), self.config.retention)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Loaded {
        let bytes = match self.store.get_blob(&self.config.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Loaded::Items(Vec::new()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read ledger, treating as empty");
                return Loaded::Unavailable;
            }
        };

        match LedgerDocument::decode(&bytes) {
            Ok(doc) => Loaded::Items(doc.items),
            // Written by a newer build; leave it untouched
            Err(e @ LedgerError::UnsupportedVersion { .. }) => {
                tracing::warn!(error = %e, "ledger was written by a newer version, leaving it alone");
                Loaded::Unavailable
            }
            Err(e) => {
                tracing::warn!(error = %e, "ledger payload is unreadable, treating as empty");
                Loaded::Items(Vec::new())
            }
        }
    }

    /// Split off expired items; the flag tells whether any were dropped
    fn unexpired(&self, items: Vec<RetainedItem>) -> (Vec<RetainedItem>, bool) {
        let now = self.clock.now();
        let before = items.len();
        let valid: Vec<RetainedItem> = items
            .into_iter()
            .filter(|item| now - item.removed_at < self.config.retention)
            .collect();

        let expired = before - valid.len();
        if expired > 0 {
            tracing::info!(expired, "dropping expired ledger items");
        }
        (valid, expired > 0)
    }

    /// Drop expired items, writing back if anything changed
    fn compact(&self, items: Vec<RetainedItem>) -> Vec<RetainedItem> {
        let (valid, changed) = self.unexpired(items);
        if changed {
            self.save(&valid);
        }
        valid
    }

    fn save(&self, items: &[RetainedItem]) -> bool {
        let bytes = match LedgerDocument::new(items.to_vec()).encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode ledger");
                return false;
            }
        };

        match self.store.set_blob(&self.config.key, &bytes) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, items = items.len(), "failed to write ledger");
                false
            }
        }
    }
}

/// Whole days left in the retention window, rounded up, never negative
pub fn days_remaining_at(removed_at: DateTime<Utc>, now: DateTime<Utc>, retention: Duration) -> i64 {
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    let remaining_ms = (retention - (now - removed_at)).num_milliseconds();
    if remaining_ms <= 0 {
        return 0;
    }
    (remaining_ms + DAY_MS - 1) / DAY_MS
}
