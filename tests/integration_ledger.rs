//! Integration tests for the retention ledger on SQLite.
//!
//! These tests verify:
//! - Retained items survive reopening the database
//! - Expiry is applied against a controllable clock
//! - Restore and clear are persisted

use assert_fs::prelude::*;
use assert_fs::TempDir;
use chrono::{Duration, TimeZone, Utc};
use photo_cleanup::core::ledger::{Category, FixedClock, RetentionLedger};
use photo_cleanup::core::media::MediaRecord;
use photo_cleanup::core::store::SqliteBlobStore;
use predicates::prelude::*;
use std::path::Path;

fn record(id: &str) -> MediaRecord {
    MediaRecord::photo(id, format!("{}.jpg", id), 100, 100, Utc.timestamp_opt(0, 0).unwrap())
}

fn open(path: &Path, clock: &FixedClock) -> RetentionLedger {
    let store = SqliteBlobStore::open(path).unwrap();
    RetentionLedger::new(Box::new(store)).with_clock(Box::new(clock.clone()))
}

#[test]
fn items_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let db = dir.child("data/ledger.db");
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());

    {
        let ledger = open(db.path(), &clock);
        ledger.append(&[record("a"), record("b")], Category::Screenshot);
    }
    db.assert(predicate::path::is_file());

    let ledger = open(db.path(), &clock);
    let items = ledger.list();
    let ids: Vec<_> = items.iter().map(|i| i.record.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(items[0].category, Category::Screenshot);
    assert_eq!(ledger.days_remaining(items[0].removed_at), 30);
}

#[test]
fn expired_items_are_compacted_on_disk() {
    let dir = TempDir::new().unwrap();
    let db = dir.child("ledger.db");
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());

    let ledger = open(db.path(), &clock);
    ledger.append(&[record("old")], Category::Duplicate);
    clock.advance(Duration::days(10));
    ledger.append(&[record("new")], Category::MessagingApp);

    clock.advance(Duration::days(25));
    assert_eq!(ledger.len(), 1);
    drop(ledger);

    let reopened = open(db.path(), &clock);
    let items = reopened.list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].record.id, "new");
    assert_eq!(reopened.days_remaining(items[0].removed_at), 5);
}

#[test]
fn restore_and_clear_persist() {
    let dir = TempDir::new().unwrap();
    let db = dir.child("ledger.db");
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());

    let ledger = open(db.path(), &clock);
    ledger.append(&[record("a"), record("b")], Category::Duplicate);
    assert!(ledger.restore("a"));
    assert!(!ledger.restore("missing"));
    drop(ledger);

    let reopened = open(db.path(), &clock);
    let ids: Vec<_> = reopened.list().into_iter().map(|i| i.record.id).collect();
    assert_eq!(ids, vec!["b"]);

    reopened.clear();
    drop(reopened);
    assert!(open(db.path(), &clock).is_empty());
}
