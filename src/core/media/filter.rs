//! File filtering for the filesystem media index.

use super::MediaKind;
use std::collections::HashSet;
use std::path::Path;

const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "heic", "heif", "gif", "bmp", "tiff", "tif",
];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "avi", "mkv", "3gp", "webm"];

/// Decides which files on disk count as media items
pub struct ImageFilter {
    photo_extensions: HashSet<String>,
    video_extensions: HashSet<String>,
    include_hidden: bool,
    include_videos: bool,
}

impl ImageFilter {
    /// Create a filter accepting the default photo extensions
    pub fn new() -> Self {
        Self {
            photo_extensions: PHOTO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            video_extensions: VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
            include_videos: false,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Also accept video files
    pub fn with_videos(mut self, include: bool) -> Self {
        self.include_videos = include;
        self
    }

    /// Classify a path, or `None` if it should be skipped
    pub fn media_kind(&self, path: &Path) -> Option<MediaKind> {
        if !self.include_hidden && is_hidden(path) {
            return None;
        }

        let ext = path.extension().and_then(|e| e.to_str())?.to_lowercase();

        if self.photo_extensions.contains(&ext) {
            Some(MediaKind::Photo)
        } else if self.include_videos && self.video_extensions.contains(&ext) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_jpeg() {
        let filter = ImageFilter::new();
        assert_eq!(filter.media_kind(Path::new("/photos/image.jpg")), Some(MediaKind::Photo));
        assert_eq!(filter.media_kind(Path::new("/photos/image.JPEG")), Some(MediaKind::Photo));
    }

    #[test]
    fn filter_excludes_videos_by_default() {
        let filter = ImageFilter::new();
        assert_eq!(filter.media_kind(Path::new("/photos/clip.mp4")), None);
    }

    #[test]
    fn filter_classifies_videos_when_enabled() {
        let filter = ImageFilter::new().with_videos(true);
        assert_eq!(
            filter.media_kind(Path::new("/photos/clip.MOV")),
            Some(MediaKind::Video)
        );
        assert_eq!(
            filter.media_kind(Path::new("/photos/IMG_1234.HEIC")),
            Some(MediaKind::Photo)
        );
    }

    #[test]
    fn filter_excludes_hidden_by_default() {
        let filter = ImageFilter::new();
        assert_eq!(filter.media_kind(Path::new("/photos/.hidden.jpg")), None);
        assert!(ImageFilter::new()
            .with_hidden(true)
            .media_kind(Path::new("/photos/.hidden.jpg"))
            .is_some());
    }

    #[test]
    fn filter_handles_no_extension() {
        let filter = ImageFilter::new();
        assert_eq!(filter.media_kind(Path::new("/photos/no_extension")), None);
        assert_eq!(filter.media_kind(Path::new("/photos/document.pdf")), None);
    }
}
