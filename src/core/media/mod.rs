//! # Media Module
//!
//! Media records and the collaborators that produce and remove them.
//!
//! ## Collaborators
//! - `MediaIndex` - enumerates every record (pagination is the index's job)
//! - `MediaRemover` - removes records as a unit
//!
//! ## Implementations
//! - `FsMediaIndex` - walks folders on disk, reading EXIF where present
//! - `StaticIndex` - a fixed list, for tests and embedding
//! - `TrashRemover` - moves files to the OS trash
//! - `RecordingRemover` - records requests, for tests

mod filter;
mod memory;
mod metadata;
mod remover;
mod traits;
mod walker;

pub use filter::ImageFilter;
pub use memory::{RecordingRemover, StaticIndex};
pub use metadata::{extract_metadata, PhotoMetadata};
pub use remover::TrashRemover;
pub use traits::{MediaIndex, MediaRemover};
pub use walker::{FsIndexConfig, FsMediaIndex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Subtype tag carried by screen captures
pub const SCREENSHOT_SUBTYPE: &str = "screenshot";

/// Kind of media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
}

/// Immutable snapshot of one media item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Stable identifier, unique within a scan
    pub id: String,
    /// Handle used to fetch the binary content
    pub locator: String,
    /// Display name (not unique)
    pub filename: String,
    /// Pixel width, 0 when unknown
    pub width: u32,
    /// Pixel height, 0 when unknown
    pub height: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    pub kind: MediaKind,
    /// Only present for videos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Capability tags, e.g. `screenshot`
    #[serde(default)]
    pub subtypes: BTreeSet<String>,
}

impl MediaRecord {
    /// Create a photo record. The locator defaults to the id.
    pub fn photo(
        id: impl Into<String>,
        filename: impl Into<String>,
        width: u32,
        height: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        Self {
            locator: id.clone(),
            id,
            filename: filename.into(),
            width,
            height,
            created_at,
            modified_at: None,
            kind: MediaKind::Photo,
            duration_seconds: None,
            subtypes: BTreeSet::new(),
        }
    }

    /// Create a video record. `None` means the duration is unknown.
    pub fn video(
        id: impl Into<String>,
        filename: impl Into<String>,
        width: u32,
        height: u32,
        created_at: DateTime<Utc>,
        duration_seconds: Option<f64>,
    ) -> Self {
        Self {
            kind: MediaKind::Video,
            duration_seconds,
            ..Self::photo(id, filename, width, height, created_at)
        }
    }

    pub fn with_modified_at(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = Some(modified_at);
        self
    }

    pub fn with_subtype(mut self, tag: impl Into<String>) -> Self {
        self.subtypes.insert(tag.into());
        self
    }

    /// Pixel area, used to rank quality
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn has_subtype(&self, tag: &str) -> bool {
        self.subtypes.contains(tag)
    }
}
