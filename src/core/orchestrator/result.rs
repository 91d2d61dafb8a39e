//! Aggregate output of one scan.

use crate::core::classifier::DuplicateGroup;
use crate::core::ledger::Category;
use crate::core::media::MediaRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Everything one scan found. Held in memory only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub duplicates: Vec<DuplicateGroup>,
    pub messaging_app_matches: Vec<MediaRecord>,
    pub screenshot_matches: Vec<MediaRecord>,
    /// Number of records examined
    pub total_scanned: usize,
}

/// Counts per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_scanned: usize,
    pub duplicate_groups: usize,
    /// Duplicates excluding each group's best copy
    pub redundant_duplicates: usize,
    pub messaging_app_matches: usize,
    pub screenshot_matches: usize,
}

impl ScanResult {
    /// Records a "select all" would pick for removal.
    ///
    /// For duplicates this is every member except each group's best copy.
    pub fn candidates(&self, category: Category) -> Vec<MediaRecord> {
        match category {
            Category::Duplicate => self
                .duplicates
                .iter()
                .flat_map(|group| group.redundant())
                .cloned()
                .collect(),
            Category::MessagingApp => self.messaging_app_matches.clone(),
            Category::Screenshot => self.screenshot_matches.clone(),
        }
    }

    /// Records of `category` whose id is in `ids`, in result order.
    ///
    /// A group's best copy is never selectable.
    pub fn select(&self, category: Category, ids: &[String]) -> Vec<MediaRecord> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let pool: Vec<&MediaRecord> = match category {
            Category::Duplicate => self
                .duplicates
                .iter()
                .flat_map(|group| group.redundant())
                .collect(),
            Category::MessagingApp => self.messaging_app_matches.iter().collect(),
            Category::Screenshot => self.screenshot_matches.iter().collect(),
        };

        pool.into_iter()
            .filter(|record| wanted.contains(record.id.as_str()))
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            total_scanned: self.total_scanned,
            duplicate_groups: self.duplicates.len(),
            redundant_duplicates: self.duplicates.iter().map(|g| g.duplicate_count()).sum(),
            messaging_app_matches: self.messaging_app_matches.len(),
            screenshot_matches: self.screenshot_matches.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::group_duplicates;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, filename: &str, width: u32) -> MediaRecord {
        MediaRecord::photo(id, filename, width, width, Utc.timestamp_opt(0, 0).unwrap())
    }

    fn sample() -> ScanResult {
        let records = vec![
            record("1", "IMG.jpg", 10),
            record("2", "IMG copy.jpg", 30),
            record("3", "IMG (1).jpg", 20),
        ];
        ScanResult {
            duplicates: group_duplicates(&records),
            messaging_app_matches: vec![record("4", "WA_1.jpg", 1)],
            screenshot_matches: vec![record("5", "Screenshot.png", 1), record("6", "Screen Shot.png", 1)],
            total_scanned: 6,
        }
    }

    #[test]
    fn duplicate_candidates_skip_best_copy() {
        let ids: Vec<_> = sample()
            .candidates(Category::Duplicate)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn other_candidates_are_all_matches() {
        let result = sample();
        assert_eq!(result.candidates(Category::Screenshot).len(), 2);
        assert_eq!(result.candidates(Category::MessagingApp).len(), 1);
    }

    #[test]
    fn select_keeps_result_order_and_category() {
        let result = sample();
        let ids = vec!["6".to_string(), "4".to_string(), "5".to_string()];

        let picked: Vec<_> = result
            .select(Category::Screenshot, &ids)
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(picked, vec!["5", "6"]);
    }

    #[test]
    fn best_copy_cannot_be_selected() {
        let result = sample();
        let ids = vec!["2".to_string(), "3".to_string()];

        let picked: Vec<_> = result
            .select(Category::Duplicate, &ids)
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(picked, vec!["3"]);
        assert!(result.select(Category::Duplicate, &["2".to_string()]).is_empty());
    }

    #[test]
    fn summary_counts_redundant_duplicates() {
        let summary = sample().summary();
        assert_eq!(summary.duplicate_groups, 1);
        assert_eq!(summary.redundant_duplicates, 2);
        assert_eq!(summary.screenshot_matches, 2);
        assert_eq!(summary.total_scanned, 6);
    }
}
