//! # Classifier Module
//!
//! Pure functions that sort media records into cleanup categories.
//!
//! ## Categories
//! | Category       | Criterion                                         |
//! |----------------|---------------------------------------------------|
//! | Duplicates     | Same normalized filename (no content comparison)  |
//! | Messaging app  | Filename follows the messaging export convention  |
//! | Screenshots    | `screenshot` subtype tag, else filename pattern   |
//!
//! No function here performs I/O or keeps state; they can run in any
//! order over the same slice.

mod duplicates;
mod messaging;
mod screenshot;

pub use duplicates::{group_duplicates, normalize_filename, DuplicateGroup};
pub use messaging::{find_messaging_app_matches, is_messaging_app_file};
pub use screenshot::{
    find_screenshots, is_capture_software, screenshot_reason, ScreenshotConfidence,
    ScreenshotDetection,
};
