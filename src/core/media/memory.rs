//! In-memory collaborators for testing and embedding.

use super::{MediaIndex, MediaRecord, MediaRemover};
use crate::error::{IndexError, RemovalError};
use std::sync::Mutex;

/// Media index over a fixed list of records
pub struct StaticIndex {
    records: Vec<MediaRecord>,
    failure: Option<String>,
}

impl StaticIndex {
    /// Create an index; records are put in creation order
    pub fn new(mut records: Vec<MediaRecord>) -> Self {
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Self {
            records,
            failure: None,
        }
    }

    /// An index whose every fetch fails with `IndexError::Unavailable`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl MediaIndex for StaticIndex {
    fn fetch_all_photo_records(&self) -> Result<Vec<MediaRecord>, IndexError> {
        match &self.failure {
            Some(message) => Err(IndexError::Unavailable(message.clone())),
            None => Ok(self.records.clone()),
        }
    }
}

/// Remover that records requested ids instead of touching anything
#[derive(Default)]
pub struct RecordingRemover {
    requests: Mutex<Vec<Vec<String>>>,
    failure: Option<String>,
}

impl RecordingRemover {
    pub fn new() -> Self {
        Self::default()
    }

    /// A remover that rejects every request
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }

    /// Every batch of ids received so far, including rejected ones
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl MediaRemover for RecordingRemover {
    fn delete_records(&self, ids: &[String]) -> Result<(), RemovalError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(ids.to_vec());
        }

        match &self.failure {
            Some(reason) => Err(RemovalError::Rejected {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}
