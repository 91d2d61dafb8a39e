//! Filesystem media index using walkdir.
//!
//! Stands in for the device media library: every photo below the
//! configured roots becomes a `MediaRecord` whose id and locator are the
//! canonical path.

use super::filter::ImageFilter;
use super::metadata::extract_metadata;
use super::{MediaIndex, MediaKind, MediaRecord, SCREENSHOT_SUBTYPE};
use crate::core::classifier::is_capture_software;
use crate::error::IndexError;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Configuration for the filesystem index
#[derive(Debug, Clone, Default)]
pub struct FsIndexConfig {
    /// Folders to enumerate
    pub roots: Vec<PathBuf>,
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Whether video files become records too
    pub include_videos: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

/// Media index backed by folders on disk
pub struct FsMediaIndex {
    config: FsIndexConfig,
    filter: ImageFilter,
}

impl FsMediaIndex {
    pub fn new(config: FsIndexConfig) -> Self {
        let filter = ImageFilter::new()
            .with_hidden(config.include_hidden)
            .with_videos(config.include_videos);

        Self { config, filter }
    }

    /// Collect candidate files below one root
    fn walk_root(&self, root: &Path) -> Result<Vec<(PathBuf, MediaKind)>, IndexError> {
        if !root.is_dir() {
            return Err(IndexError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let include_hidden = self.config.include_hidden;
        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files = Vec::new();
        let entries = walker.into_iter().filter_entry(|entry| {
            // Skip hidden directories unless configured otherwise
            include_hidden
                || entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry.file_name().to_string_lossy().starts_with('.')
        });

        for entry_result in entries {
            match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if let Some(kind) = self.filter.media_kind(entry.path()) {
                        files.push((entry.into_path(), kind));
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    if e.depth() == 0
                        && e.io_error().map(|io| io.kind())
                            == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        return Err(IndexError::PermissionDenied { path });
                    }
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                }
            }
        }

        Ok(files)
    }
}

impl MediaIndex for FsMediaIndex {
    fn fetch_all_photo_records(&self) -> Result<Vec<MediaRecord>, IndexError> {
        let mut files = Vec::new();
        for root in &self.config.roots {
            files.extend(self.walk_root(root)?);
        }

        tracing::debug!(files = files.len(), "reading media metadata");

        let mut records: Vec<MediaRecord> = files
            .par_iter()
            .filter_map(|(path, kind)| match build_record(path, *kind) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                    None
                }
            })
            .collect();

        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        records.dedup_by(|a, b| a.id == b.id);

        Ok(records)
    }
}

/// Build a record for one file
fn build_record(path: &Path, kind: MediaKind) -> Result<MediaRecord, IndexError> {
    let fs_meta = fs::metadata(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let id = canonical.to_string_lossy().to_string();
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| id.clone());

    let modified = fs_meta.modified().ok().map(to_utc);
    let exif = match kind {
        MediaKind::Photo => extract_metadata(path),
        MediaKind::Video => Default::default(),
    };

    let created_at = exif
        .date_taken
        .or_else(|| fs_meta.created().ok().map(to_utc))
        .or(modified)
        .unwrap_or_else(|| to_utc(SystemTime::UNIX_EPOCH));

    let (width, height) = match (exif.width, exif.height) {
        (Some(w), Some(h)) => (w, h),
        _ if kind == MediaKind::Photo => image::image_dimensions(path).unwrap_or((0, 0)),
        _ => (0, 0),
    };

    // Durations are not read from video containers
    let mut record = match kind {
        MediaKind::Photo => MediaRecord::photo(id, filename, width, height, created_at),
        MediaKind::Video => MediaRecord::video(id, filename, width, height, created_at, None),
    };
    if let Some(modified) = modified {
        record = record.with_modified_at(modified);
    }
    if exif.software.as_deref().is_some_and(is_capture_software) {
        record = record.with_subtype(SCREENSHOT_SUBTYPE);
    }

    Ok(record)
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}
