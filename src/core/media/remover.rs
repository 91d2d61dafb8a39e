//! Removal collaborator that moves files to the OS trash.

use super::MediaRemover;
use crate::error::RemovalError;
use std::path::PathBuf;

/// Moves the files named by record ids (paths) to the trash.
///
/// Every path is checked before any is moved, so a batch with a missing
/// file is rejected without touching the rest.
#[derive(Debug, Default)]
pub struct TrashRemover;

impl TrashRemover {
    pub fn new() -> Self {
        Self
    }
}

impl MediaRemover for TrashRemover {
    fn delete_records(&self, ids: &[String]) -> Result<(), RemovalError> {
        if ids.is_empty() {
            return Ok(());
        }

        let paths: Vec<PathBuf> = ids.iter().map(PathBuf::from).collect();
        if let Some(missing) = paths.iter().find(|p| !p.exists()) {
            return Err(RemovalError::NotFound {
                id: missing.display().to_string(),
            });
        }

        trash::delete_all(&paths).map_err(|e| RemovalError::Rejected {
            reason: e.to_string(),
        })?;

        tracing::info!(count = paths.len(), "moved files to trash");
        Ok(())
    }
}
