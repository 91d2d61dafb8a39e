//! EXIF metadata used to build media records from files.
//!
//! Only the fields a record needs are read: capture time, pixel
//! dimensions and the `Software` tag (screen capture tools sign it).

use chrono::{DateTime, NaiveDateTime, Utc};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Extracted photo metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoMetadata {
    /// Original capture date/time
    pub date_taken: Option<DateTime<Utc>>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Software that produced the file
    pub software: Option<String>,
}

/// Extract EXIF metadata from a photo file.
///
/// Files without EXIF (most PNGs) yield an empty `PhotoMetadata`.
pub fn extract_metadata(path: &Path) -> PhotoMetadata {
    let mut metadata = PhotoMetadata::default();

    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return metadata,
    };

    let mut bufreader = BufReader::new(&file);
    let exif_reader = match Reader::new().read_from_container(&mut bufreader) {
        Ok(r) => r,
        Err(_) => return metadata,
    };

    if let Some(field) = exif_reader.get_field(Tag::DateTimeOriginal, In::PRIMARY) {
        if let Some(s) = get_string_value(&field.value) {
            // EXIF date format: "YYYY:MM:DD HH:MM:SS"
            if let Ok(naive) = NaiveDateTime::parse_from_str(&s, "%Y:%m:%d %H:%M:%S") {
                metadata.date_taken = Some(DateTime::from_naive_utc_and_offset(naive, Utc));
            }
        }
    }

    // Prefer actual pixel dimensions
    if let Some(field) = exif_reader.get_field(Tag::PixelXDimension, In::PRIMARY) {
        metadata.width = get_u32_value(&field.value);
    }
    if let Some(field) = exif_reader.get_field(Tag::PixelYDimension, In::PRIMARY) {
        metadata.height = get_u32_value(&field.value);
    }

    if metadata.width.is_none() {
        if let Some(field) = exif_reader.get_field(Tag::ImageWidth, In::PRIMARY) {
            metadata.width = get_u32_value(&field.value);
        }
    }
    if metadata.height.is_none() {
        if let Some(field) = exif_reader.get_field(Tag::ImageLength, In::PRIMARY) {
            metadata.height = get_u32_value(&field.value);
        }
    }

    if let Some(field) = exif_reader.get_field(Tag::Software, In::PRIMARY) {
        metadata.software = get_string_value(&field.value);
    }

    metadata
}

/// Helper to extract u32 from various EXIF value types
fn get_u32_value(value: &Value) -> Option<u32> {
    match value {
        Value::Long(vec) => vec.first().copied(),
        Value::Short(vec) => vec.first().map(|v| *v as u32),
        _ => None,
    }
}

/// Helper to extract string from EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_value_trims_nul_padding() {
        let value = Value::Ascii(vec![b"Snipping Tool\0\0".to_vec()]);
        assert_eq!(get_string_value(&value), Some("Snipping Tool".to_string()));
    }

    #[test]
    fn u32_value_accepts_short_and_long() {
        assert_eq!(get_u32_value(&Value::Short(vec![640])), Some(640));
        assert_eq!(get_u32_value(&Value::Long(vec![4032])), Some(4032));
        assert_eq!(get_u32_value(&Value::Ascii(vec![])), None);
    }

    #[test]
    fn extract_from_nonexistent_returns_default() {
        let meta = extract_metadata(Path::new("/nonexistent/file.jpg"));
        assert_eq!(meta, PhotoMetadata::default());
    }
}
