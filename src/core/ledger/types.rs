//! Types for the recently-removed ledger.

use crate::core::media::MediaRecord;
use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current persisted document version
pub const LEDGER_VERSION: u32 = 1;

/// Why an item was removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Duplicate,
    MessagingApp,
    Screenshot,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Duplicate, Self::MessagingApp, Self::Screenshot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::MessagingApp => "messaging_app",
            Self::Screenshot => "screenshot",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Duplicate => "Duplicates",
            Self::MessagingApp => "Messaging App Images",
            Self::Screenshot => "Screenshots",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duplicate" => Ok(Self::Duplicate),
            "messaging_app" => Ok(Self::MessagingApp),
            "screenshot" => Ok(Self::Screenshot),
            other => Err(LedgerError::UnknownCategory(other.to_string())),
        }
    }
}

/// A removed record that can still be restored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainedItem {
    /// Full snapshot of the removed record
    pub record: MediaRecord,
    pub removed_at: DateTime<Utc>,
    pub category: Category,
}

/// Persisted form of the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerDocument {
    pub version: u32,
    pub items: Vec<RetainedItem>,
}

/// Accepts both the versioned document and the bare legacy array
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLedger {
    Versioned(LedgerDocument),
    Legacy(Vec<RetainedItem>),
}

impl LedgerDocument {
    pub fn new(items: Vec<RetainedItem>) -> Self {
        Self {
            version: LEDGER_VERSION,
            items,
        }
    }

    /// Decode a stored blob, upgrading the legacy array form
    pub fn decode(bytes: &[u8]) -> Result<Self, LedgerError> {
        match serde_json::from_slice::<StoredLedger>(bytes) {
            Ok(StoredLedger::Versioned(doc)) if doc.version > LEDGER_VERSION => {
                Err(LedgerError::UnsupportedVersion {
                    found: doc.version,
                    supported: LEDGER_VERSION,
                })
            }
            Ok(StoredLedger::Versioned(doc)) => Ok(doc),
            Ok(StoredLedger::Legacy(items)) => Ok(Self::new(items)),
            // Re-parse as the current format for a precise error message
            Err(_) => Ok(serde_json::from_slice::<LedgerDocument>(bytes)?),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, LedgerError> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: &str) -> RetainedItem {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        RetainedItem {
            record: MediaRecord::photo(id, format!("{}.jpg", id), 4, 3, at),
            removed_at: at,
            category: Category::Screenshot,
        }
    }

    #[test]
    fn category_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "videos".parse::<Category>().unwrap_err();
        assert!(matches!(err, LedgerError::UnknownCategory(ref s) if s == "videos"));
    }

    #[test]
    fn encoded_document_carries_version() {
        let bytes = LedgerDocument::new(vec![item("1")]).encode().unwrap();
        let json = String::from_utf8(bytes).unwrap();
        assert!(json.contains("\"version\":1"));
        assert!(json.contains("\"category\":\"screenshot\""));
    }

    #[test]
    fn legacy_array_is_upgraded() {
        let legacy = serde_json::to_vec(&vec![item("1"), item("2")]).unwrap();
        let doc = LedgerDocument::decode(&legacy).unwrap();
        assert_eq!(doc.version, LEDGER_VERSION);
        assert_eq!(doc.items.len(), 2);
    }

    #[test]
    fn newer_version_is_refused() {
        let future = br#"{"version":99,"items":[]}"#;
        let err = LedgerDocument::decode(future).unwrap_err();
        assert!(matches!(err, LedgerError::UnsupportedVersion { found: 99, .. }));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        let err = LedgerDocument::decode(b"{not json").unwrap_err();
        assert!(matches!(err, LedgerError::Serialization(_)));
    }
}
