//! # Metadata Module
//!
//! Extracts embedded EXIF metadata from the raw document bytes and scores its
//! plausibility.
//!
//! ## Scored Signals
//! - Known editing-software signatures in the Software tag
//! - Missing capture timestamp
//! - Missing camera make and model
//! - Total absence of metadata, which is itself strong evidence: stripping
//!   EXIF wholesale is a known laundering technique, so this is the one soft
//!   condition scored as risk-positive rather than evidence-neutral
//!
//! ## Supported Formats
//! EXIF metadata is typically found in JPEG and TIFF files. PNG and BMP
//! documents usually carry none, which routes them through the absence rule.

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Editing tools whose signature in the Software tag marks a retouched image
pub const SUSPICIOUS_SOFTWARE: &[&str] = &["Photoshop", "GIMP", "Snapseed", "PicsArt", "PixelLab"];

/// Penalty when no metadata is recoverable at all
pub const MISSING_METADATA_PENALTY: u32 = 40;
/// Penalty for a denylisted editing-software signature
pub const EDITING_SOFTWARE_PENALTY: u32 = 40;
/// Penalty for a missing capture timestamp
pub const MISSING_TIMESTAMP_PENALTY: u32 = 15;
/// Penalty for missing both camera make and model
pub const MISSING_CAMERA_PENALTY: u32 = 20;

/// EXIF metadata extracted from a document image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Full primary-IFD tag dump (tag name to display value), ordered
    pub tags: BTreeMap<String, String>,
    /// Software tag, if present
    pub software: Option<String>,
    /// Capture timestamp in raw EXIF form ("YYYY:MM:DD HH:MM:SS")
    pub capture_time: Option<String>,
    /// Camera make (e.g., "Apple", "Canon")
    pub camera_make: Option<String>,
    /// Camera model (e.g., "iPhone 15 Pro")
    pub camera_model: Option<String>,
}

impl MetadataRecord {
    /// Check whether any metadata was recovered
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Parse the capture timestamp from its EXIF string form
    pub fn capture_datetime(&self) -> Option<NaiveDateTime> {
        self.capture_time
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S").ok())
    }

    /// Get a display string for the camera
    pub fn camera_display(&self) -> Option<String> {
        match (&self.camera_make, &self.camera_model) {
            (Some(make), Some(model)) => {
                // Avoid duplication like "Apple Apple iPhone"
                if model.starts_with(make) {
                    Some(model.clone())
                } else {
                    Some(format!("{} {}", make, model))
                }
            }
            (None, Some(model)) => Some(model.clone()),
            (Some(make), None) => Some(make.clone()),
            (None, None) => None,
        }
    }
}

/// Plausibility verdict over a [`MetadataRecord`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataReport {
    /// True when no issues were found
    pub valid: bool,
    /// Human-readable issues, in rule order
    pub issues: Vec<String>,
    /// Additive penalty; deliberately not clamped here, the aggregator owns
    /// the single clamp point
    pub penalty: u32,
}

/// Extract EXIF metadata from raw image bytes.
///
/// Unreadable or absent EXIF yields an empty record, not an error - formats
/// without embedded metadata are a scoring signal, not a failure.
pub fn extract_metadata(bytes: &[u8]) -> MetadataRecord {
    let mut record = MetadataRecord::default();

    let mut cursor = Cursor::new(bytes);
    let exif = match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(_) => return record,
    };

    for field in exif.fields() {
        if field.ifd_num == In::PRIMARY {
            record
                .tags
                .insert(field.tag.to_string(), field.display_value().to_string());
        }
    }

    if let Some(field) = exif.get_field(Tag::Software, In::PRIMARY) {
        record.software = get_string_value(&field.value);
    }

    // Cameras are inconsistent about which timestamp tag they write
    for tag in [Tag::DateTimeOriginal, Tag::DateTime] {
        if record.capture_time.is_some() {
            break;
        }
        if let Some(field) = exif.get_field(tag, In::PRIMARY) {
            record.capture_time = get_string_value(&field.value);
        }
    }

    if let Some(field) = exif.get_field(Tag::Make, In::PRIMARY) {
        record.camera_make = get_string_value(&field.value);
    }

    if let Some(field) = exif.get_field(Tag::Model, In::PRIMARY) {
        record.camera_model = get_string_value(&field.value);
    }

    record
}

/// Score a metadata record for editing signs.
///
/// Rules apply in order and penalties are additive, except total absence of
/// metadata, which short-circuits as maximal evidence on its own.
pub fn analyze_metadata(record: &MetadataRecord) -> MetadataReport {
    if record.is_empty() {
        return MetadataReport {
            valid: false,
            issues: vec!["No EXIF metadata found".to_string()],
            penalty: MISSING_METADATA_PENALTY,
        };
    }

    let mut issues = Vec::new();
    let mut penalty = 0;

    if let Some(software) = &record.software {
        let lowered = software.to_lowercase();
        if SUSPICIOUS_SOFTWARE
            .iter()
            .any(|tool| lowered.contains(&tool.to_lowercase()))
        {
            issues.push(format!("Edited using software: {}", software));
            penalty += EDITING_SOFTWARE_PENALTY;
        }
    }

    if record.capture_time.is_none() {
        issues.push("Missing capture timestamp metadata".to_string());
        penalty += MISSING_TIMESTAMP_PENALTY;
    }

    if record.camera_make.is_none() && record.camera_model.is_none() {
        issues.push("Missing camera make/model, likely edited or scanned".to_string());
        penalty += MISSING_CAMERA_PENALTY;
    }

    MetadataReport {
        valid: issues.is_empty(),
        issues,
        penalty,
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

    fn full_record() -> MetadataRecord {
        let mut record = MetadataRecord {
            software: None,
            capture_time: Some("2023:06:15 10:30:00".to_string()),
            camera_make: Some("Canon".to_string()),
            camera_model: Some("EOS R5".to_string()),
            ..Default::default()
        };
        record.tags.insert("Make".to_string(), "Canon".to_string());
        record.tags.insert("Model".to_string(), "EOS R5".to_string());
        record
            .tags
            .insert("DateTime".to_string(), "2023:06:15 10:30:00".to_string());
        record
    }

    #[test]
    fn empty_record_gets_maximal_absence_penalty() {
        let report = analyze_metadata(&MetadataRecord::default());
        assert!(!report.valid);
        assert_eq!(report.penalty, 40);
        assert_eq!(report.issues, vec!["No EXIF metadata found".to_string()]);
    }

    #[test]
    fn clean_record_is_valid_with_zero_penalty() {
        let report = analyze_metadata(&full_record());
        assert!(report.valid);
        assert_eq!(report.penalty, 0);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn editing_software_match_is_case_insensitive() {
        let mut record = full_record();
        record.software = Some("Adobe photoshop 25.0".to_string());
        record
            .tags
            .insert("Software".to_string(), "Adobe photoshop 25.0".to_string());

        let report = analyze_metadata(&record);
        assert!(!report.valid);
        assert_eq!(report.penalty, 40);
        assert!(report.issues[0].contains("Adobe photoshop 25.0"));
    }

    #[test]
    fn benign_software_is_not_flagged() {
        let mut record = full_record();
        record.software = Some("Firmware 1.2.3".to_string());
        record
            .tags
            .insert("Software".to_string(), "Firmware 1.2.3".to_string());

        let report = analyze_metadata(&record);
        assert!(report.valid);
        assert_eq!(report.penalty, 0);
    }

    #[test]
    fn missing_timestamp_adds_fifteen() {
        let mut record = full_record();
        record.capture_time = None;

        let report = analyze_metadata(&record);
        assert_eq!(report.penalty, 15);
    }

    #[test]
    fn missing_camera_adds_twenty_only_when_both_absent() {
        let mut record = full_record();
        record.camera_make = None;
        assert_eq!(analyze_metadata(&record).penalty, 0);

        record.camera_model = None;
        assert_eq!(analyze_metadata(&record).penalty, 20);
    }

    #[test]
    fn penalties_are_additive_and_unclamped_here() {
        let mut record = MetadataRecord::default();
        record
            .tags
            .insert("Software".to_string(), "GIMP 2.10".to_string());
        record.software = Some("GIMP 2.10".to_string());

        // Software match + no timestamp + no camera
        let report = analyze_metadata(&record);
        assert_eq!(report.penalty, 40 + 15 + 20);
        assert_eq!(report.issues.len(), 3);
    }

    #[test]
    fn extract_from_png_without_exif_is_empty() {
        use image::{Rgb, RgbImage};
        use std::io::Cursor;

        let image = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let record = extract_metadata(&bytes);
        assert!(record.is_empty());
    }

    #[test]
    fn extract_from_garbage_is_empty() {
        let record = extract_metadata(b"not an image at all");
        assert!(record.is_empty());
    }

    #[test]
    fn capture_datetime_parses_exif_form() {
        let record = full_record();
        let parsed = record.capture_datetime().unwrap();
        assert_eq!(
            parsed,
            NaiveDateTime::parse_from_str("2023-06-15 10:30:00", "%Y-%m-%d %H:%M:%S").unwrap()
        );
    }

    #[test]
    fn capture_datetime_rejects_malformed_value() {
        let record = MetadataRecord {
            capture_time: Some("last tuesday".to_string()),
            ..Default::default()
        };
        assert!(record.capture_datetime().is_none());
    }

    #[test]
    fn camera_display_combines_make_model() {
        let record = full_record();
        assert_eq!(record.camera_display(), Some("Canon EOS R5".to_string()));
    }

    #[test]
    fn camera_display_avoids_duplication() {
        let record = MetadataRecord {
            camera_make: Some("Apple".to_string()),
            camera_model: Some("Apple iPhone 15 Pro".to_string()),
            ..Default::default()
        };
        assert_eq!(
            record.camera_display(),
            Some("Apple iPhone 15 Pro".to_string())
        );
    }
}
