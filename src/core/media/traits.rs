//! Collaborator traits consumed by the orchestrator.

use super::MediaRecord;
use crate::error::{IndexError, RemovalError};

/// Enumerates every media record on the device.
///
/// Implementations handle pagination themselves and return the complete
/// list sorted by creation time, oldest first. Duplicate tie-breaks rely
/// on that order.
pub trait MediaIndex: Send + Sync {
    fn fetch_all_photo_records(&self) -> Result<Vec<MediaRecord>, IndexError>;
}

/// Removes media records from the device.
///
/// A call succeeds or fails as a unit; partial outcomes are not reported.
pub trait MediaRemover: Send + Sync {
    fn delete_records(&self, ids: &[String]) -> Result<(), RemovalError>;
}
