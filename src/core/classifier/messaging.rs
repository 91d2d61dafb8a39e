//! Detects images saved by the messaging app.
//!
//! The app exports into a vendor folder, prefixes files with `WA_` and
//! keeps status downloads under `.Statuses`.

use crate::core::media::MediaRecord;

/// Lower-case markers of the messaging app's export naming
const MESSAGING_APP_PATTERNS: &[&str] = &["whatsapp", "wa_", ".statuses"];

/// Check a filename against the messaging app's naming convention
pub fn is_messaging_app_file(filename: &str) -> bool {
    let lower_filename = filename.to_lowercase();
    MESSAGING_APP_PATTERNS
        .iter()
        .any(|pattern| lower_filename.contains(pattern))
}

/// Records whose filename follows the messaging app convention, in input order
pub fn find_messaging_app_matches(records: &[MediaRecord]) -> Vec<MediaRecord> {
    let matches: Vec<MediaRecord> = records
        .iter()
        .filter(|record| is_messaging_app_file(&record.filename))
        .cloned()
        .collect();

    tracing::debug!(matches = matches.len(), "found messaging app images");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn named(filename: &str) -> MediaRecord {
        MediaRecord::photo(filename, filename, 1, 1, Utc.timestamp_opt(0, 0).unwrap())
    }

    #[test]
    fn matches_prefix_and_folder_name() {
        let records = vec![
            named("WA_001.jpg"),
            named("vacation.jpg"),
            named("/WhatsApp/IMG.jpg"),
        ];

        let matches = find_messaging_app_matches(&records);

        let ids: Vec<_> = matches.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["WA_001.jpg", "/WhatsApp/IMG.jpg"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_messaging_app_file("IMG-20240101-wa_0001.jpg"));
        assert!(is_messaging_app_file("WHATSAPP Image 2024.jpeg"));
        assert!(is_messaging_app_file("Media/.Statuses/abc.jpg"));
    }

    #[test]
    fn ordinary_names_do_not_match() {
        assert!(!is_messaging_app_file("IMG_0001.HEIC"));
        assert!(!is_messaging_app_file("wall.jpg"));
    }
}
