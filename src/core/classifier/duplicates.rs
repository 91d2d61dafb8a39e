//! Groups records whose filenames differ only by duplicate markers.
//!
//! `IMG_1.jpg`, `IMG_1(1).jpg` and `IMG_1 copy.jpg` all normalize to
//! `img_1.jpg` and form one group. The key is the only criterion.

use crate::core::media::MediaRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Numeric counters such as ` (2)`
static NUMERIC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d+\)\s*").expect("numeric suffix pattern is valid"));

/// Copy markers such as ` copy`, `_copy_2`, ` - Copy` or ` copy 2`.
///
/// The character after the marker is captured as `tail` and put back, so
/// `copyright` stays intact while `_copy_final` loses only `_copy`.
static COPY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\s*[-_]\s*|\s+)copy(?:[\s_]+\d+)?\s*(?P<tail>[^a-z0-9\s]|$)")
        .expect("copy marker pattern is valid")
});

/// A group of records sharing a normalized filename
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Sequential id within one result (`dup_0`, `dup_1`, ...)
    pub id: String,
    /// The normalized filename shared by every member
    pub key: String,
    /// All members, in input order (always at least two)
    pub assets: Vec<MediaRecord>,
    /// The member with the largest pixel area
    pub best_quality: MediaRecord,
}

impl DuplicateGroup {
    /// Get the number of duplicates (excluding the best copy)
    pub fn duplicate_count(&self) -> usize {
        self.assets.len().saturating_sub(1)
    }

    /// Members other than the best copy
    pub fn redundant(&self) -> impl Iterator<Item = &MediaRecord> + '_ {
        self.assets
            .iter()
            .filter(move |record| record.id != self.best_quality.id)
    }
}

/// Compute the duplicate key for a filename.
///
/// Copy markers go before counters so `IMG (1) copy` does not collapse
/// into `IMGcopy`. Markers are stripped until none remain, so the result
/// is stable under repeated normalization.
pub fn normalize_filename(filename: &str) -> String {
    let mut current = filename.to_lowercase();
    loop {
        let without_copies = COPY_MARKER.replace_all(&current, "${tail}");
        let stripped = NUMERIC_SUFFIX.replace_all(&without_copies, "").into_owned();
        if stripped == current {
            return current;
        }
        current = stripped;
    }
}

/// Partition records into duplicate groups.
///
/// Groups appear in the order their key was first seen. Singletons are
/// dropped. Ties on area go to the earliest record.
pub fn group_duplicates(records: &[MediaRecord]) -> Vec<DuplicateGroup> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut partitions: Vec<(String, Vec<&MediaRecord>)> = Vec::new();

    for record in records {
        let key = normalize_filename(&record.filename);
        match slots.get(&key) {
            Some(&slot) => partitions[slot].1.push(record),
            None => {
                slots.insert(key.clone(), partitions.len());
                partitions.push((key, vec![record]));
            }
        }
    }

    let groups: Vec<DuplicateGroup> = partitions
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .enumerate()
        .map(|(n, (key, members))| {
            let mut best = members[0];
            for candidate in &members[1..] {
                if candidate.area() > best.area() {
                    best = candidate;
                }
            }

            DuplicateGroup {
                id: format!("dup_{}", n),
                key,
                best_quality: best.clone(),
                assets: members.into_iter().cloned().collect(),
            }
        })
        .collect();

    tracing::debug!(
        records = records.len(),
        groups = groups.len(),
        "grouped duplicates by filename"
    );

    groups
}
