//! # Error Module
//!
//! User-friendly error types for the photo cleanup engine.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, ids, what went wrong
//! - **Collaborator errors pass through untouched** - the scan returns the
//!   media index's own error, removal returns the remover's own error

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum CleanupError {
    #[error("Media index error: {0}")]
    Index(#[from] IndexError),

    #[error("Removal error: {0}")]
    Removal(#[from] RemovalError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write scan output: {0}")]
    Output(#[source] serde_json::Error),
}

/// Errors raised by a media index while enumerating records
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Media folder not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Media index unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a removal collaborator
#[derive(Error, Debug)]
pub enum RemovalError {
    #[error("Item not found: {id}")]
    NotFound { id: String },

    #[error("Removal rejected: {reason}")]
    Rejected { reason: String },

    #[error("Removal service unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by a blob store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open ledger database at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors in ledger input or payloads
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Unknown category '{0}' (expected duplicate, messaging_app or screenshot)")]
    UnknownCategory(String),

    #[error("Failed to encode or decode the ledger: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported ledger version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, CleanupError>;
