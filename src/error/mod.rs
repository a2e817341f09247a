//! # Error Module
//!
//! Error types for the forensic scoring pipeline.
//!
//! ## Design Principles
//! - **Never panic** on caller data - return errors instead
//! - **Two failure classes** - undecodable input is fatal for the whole
//!   pipeline call; per-analyzer decode/numeric edge cases degrade to
//!   "no evidence" reports and are not errors at all
//! - **Include context** - what was being decoded or written, and why it failed

use std::path::PathBuf;
use thiserror::Error;

/// Top-level pipeline error
#[derive(Error, Debug)]
pub enum ForensicError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Failed to read input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors decoding the input byte buffer into a raster image.
///
/// A `DecodeError` at the pipeline entry aborts the whole call - no partial
/// report is ever produced for bytes that are not an image.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Input buffer is empty")]
    EmptyInput,

    #[error("Failed to decode image: {reason}")]
    DecodeFailed { reason: String },

    #[error("Image has invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors writing visual artifacts (ELA image, tamper heatmap) to disk
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to write artifact {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ForensicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_includes_reason() {
        let error = DecodeError::DecodeFailed {
            reason: "truncated JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("truncated JPEG"));
    }

    #[test]
    fn decode_error_wraps_into_forensic_error() {
        let error: ForensicError = DecodeError::EmptyInput.into();
        assert!(matches!(
            error,
            ForensicError::Decode(DecodeError::EmptyInput)
        ));
    }

    #[test]
    fn artifact_error_includes_path() {
        let error = ArtifactError::WriteFailed {
            path: PathBuf::from("/out/heatmap.png"),
            reason: "permission denied".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/out/heatmap.png"));
        assert!(message.contains("permission denied"));
    }

    #[test]
    fn invalid_dimensions_reports_both_axes() {
        let error = DecodeError::InvalidDimensions {
            width: 0,
            height: 42,
        };
        assert!(error.to_string().contains("0x42"));
    }
}
