//! Screenshot detection.
//!
//! The media index tags screen captures with a `screenshot` subtype; when
//! the tag is missing, the filename is checked for the usual patterns.

use crate::core::media::{MediaRecord, SCREENSHOT_SUBTYPE};
use serde::{Deserialize, Serialize};

/// Confidence level for screenshot detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenshotConfidence {
    /// The media index tagged the item as a screen capture
    High,
    /// The filename follows a screenshot pattern
    Medium,
}

/// Why a record was classified as a screenshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotDetection {
    pub confidence: ScreenshotConfidence,
    pub reason: String,
}

/// Filename patterns used when the subtype tag is absent
const SCREENSHOT_PATTERNS: &[&str] = &["screenshot", "screen_shot", "screen shot"];

/// Known screenshot software signatures in EXIF
const SCREENSHOT_SOFTWARE: &[&str] = &[
    "screencaptureui",
    "screenshot",
    "snipping tool",
    "snip & sketch",
    "cleanshot",
    "snagit",
    "monosnap",
    "lightshot",
    "greenshot",
];

/// Check whether an EXIF `Software` value names a screen capture tool
pub fn is_capture_software(software: &str) -> bool {
    let lower_software = software.to_lowercase();
    SCREENSHOT_SOFTWARE
        .iter()
        .any(|known| lower_software.contains(known))
}

fn detect_from_subtype(record: &MediaRecord) -> Option<ScreenshotDetection> {
    record.has_subtype(SCREENSHOT_SUBTYPE).then(|| ScreenshotDetection {
        confidence: ScreenshotConfidence::High,
        reason: "Tagged as a screen capture by the media library".to_string(),
    })
}

fn detect_from_filename(filename: &str) -> Option<ScreenshotDetection> {
    let lower_filename = filename.to_lowercase();
    SCREENSHOT_PATTERNS
        .iter()
        .find(|pattern| lower_filename.contains(*pattern))
        .map(|pattern| ScreenshotDetection {
            confidence: ScreenshotConfidence::Medium,
            reason: format!("Filename contains '{}' pattern", pattern),
        })
}

/// Explain why a record is a screenshot, if it is one.
///
/// The subtype tag is checked first and wins over the filename.
pub fn screenshot_reason(record: &MediaRecord) -> Option<ScreenshotDetection> {
    detect_from_subtype(record).or_else(|| detect_from_filename(&record.filename))
}

/// Records detected as screenshots, in input order
pub fn find_screenshots(records: &[MediaRecord]) -> Vec<MediaRecord> {
    let matches: Vec<MediaRecord> = records
        .iter()
        .filter(|record| {
            record.has_subtype(SCREENSHOT_SUBTYPE) || detect_from_filename(&record.filename).is_some()
        })
        .cloned()
        .collect();

    tracing::debug!(matches = matches.len(), "found screenshots");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn named(id: &str, filename: &str) -> MediaRecord {
        MediaRecord::photo(id, filename, 1170, 2532, Utc.timestamp_opt(0, 0).unwrap())
    }

    #[test]
    fn subtype_tag_matches_any_filename() {
        let record = named("1", "IMG_4821.PNG").with_subtype(SCREENSHOT_SUBTYPE);
        let found = find_screenshots(&[record]);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn filename_fallback_matches_without_tag() {
        let records = vec![
            named("1", "Screen Shot 2024.png"),
            named("2", "screen_shot_01.png"),
            named("3", "Screenshot_20240115.jpg"),
            named("4", "beach.jpg"),
        ];

        let ids: Vec<_> = find_screenshots(&records).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn subtype_wins_over_filename_in_reason() {
        let record = named("1", "Screenshot 2024.png").with_subtype(SCREENSHOT_SUBTYPE);
        let detection = screenshot_reason(&record).unwrap();
        assert_eq!(detection.confidence, ScreenshotConfidence::High);
    }

    #[test]
    fn filename_reason_names_the_pattern() {
        let detection = screenshot_reason(&named("1", "Screen Shot 2024.png")).unwrap();
        assert_eq!(detection.confidence, ScreenshotConfidence::Medium);
        assert!(detection.reason.contains("screen shot"));
    }

    #[test]
    fn regular_photo_is_not_a_screenshot() {
        assert!(screenshot_reason(&named("1", "photo_20240115_001.jpg")).is_none());
    }

    #[test]
    fn capture_software_is_recognised() {
        assert!(is_capture_software("screencaptureui"));
        assert!(is_capture_software("CleanShot X 4.6"));
        assert!(!is_capture_software("Adobe Lightroom"));
    }
}
