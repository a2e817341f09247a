//! # Tamper Module
//!
//! Hybrid tamper detection over the grayscale raster.
//!
//! ## Sub-detectors
//! - **Copy-move** - block-digest duplicate finder, catches exact copy-paste
//!   forgeries inside the same image
//! - **Splice** - edge-response inconsistency, catches seams from content
//!   pasted in from elsewhere
//!
//! The two binary masks are fused with a pixel-wise maximum (logical OR), and
//! the score scales the marked-pixel ratio so that even partial coverage
//! saturates the scale: partial tamper coverage is already high-confidence
//! evidence.

pub mod copy_move;
pub mod heatmap;
pub mod splice;

use crate::core::decoder;
use image::{DynamicImage, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

/// Default copy-move block size in pixels
pub const DEFAULT_BLOCK_SIZE: u32 = 16;
/// Marked-pixel ratio to score scale factor
pub const TAMPER_SCORE_SCALE: f64 = 180.0;

/// Per-detector pixel counts and the fused coverage ratio
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TamperDetails {
    /// Pixels marked by the copy-move detector
    pub copy_move_pixels: u64,
    /// Pixels marked by the splice detector
    pub splice_pixels: u64,
    /// Fused marked pixels over total pixels, 0-1
    pub tamper_ratio: f64,
    /// Present when the analysis could not run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of tamper detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TamperReport {
    /// Fused mask rendered as a false-color heatmap, None when analysis
    /// could not run
    #[serde(skip)]
    pub heatmap: Option<RgbImage>,
    /// Tamper score, 0-100
    pub score: u32,
    /// Supporting evidence
    pub details: TamperDetails,
}

/// Tamper detector with a configurable copy-move block size
#[derive(Debug, Clone, Copy)]
pub struct TamperDetector {
    block_size: u32,
}

impl Default for TamperDetector {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl TamperDetector {
    /// Create a detector with a custom block size (minimum 2)
    pub fn new(block_size: u32) -> Self {
        Self { block_size }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Run tamper detection over raw image bytes.
    ///
    /// Decode failure is soft: the report explains itself through
    /// `details.error` instead of aborting the pipeline.
    pub fn detect_bytes(&self, bytes: &[u8]) -> TamperReport {
        match decoder::decode(bytes) {
            Ok(image) => self.detect_image(&image),
            Err(e) => {
                tracing::debug!(error = %e, "tamper detection skipped, input not decodable");
                TamperReport {
                    heatmap: None,
                    score: 0,
                    details: TamperDetails {
                        error: Some("Cannot read image".to_string()),
                        ..Default::default()
                    },
                }
            }
        }
    }

    /// Run tamper detection over an already-decoded raster
    pub fn detect_image(&self, image: &DynamicImage) -> TamperReport {
        let gray = decoder::to_grayscale(image);

        let copy_move_mask = copy_move::detect(&gray, self.block_size);
        let splice_mask = splice::detect(&gray);

        let combined = fuse_masks(&copy_move_mask, &splice_mask);

        let copy_move_pixels = count_marked(&copy_move_mask);
        let splice_pixels = count_marked(&splice_mask);
        let tamper_pixels = count_marked(&combined);
        let total_pixels = (combined.width() as u64) * (combined.height() as u64);
        let tamper_ratio = if total_pixels > 0 {
            tamper_pixels as f64 / total_pixels as f64
        } else {
            0.0
        };

        let score = ((tamper_ratio * TAMPER_SCORE_SCALE) as u32).min(100);

        TamperReport {
            heatmap: Some(heatmap::render(&combined)),
            score,
            details: TamperDetails {
                copy_move_pixels,
                splice_pixels,
                tamper_ratio,
                error: None,
            },
        }
    }
}

/// Pixel-wise maximum of two binary masks
fn fuse_masks(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        image::Luma([a.get_pixel(x, y)[0].max(b.get_pixel(x, y)[0])])
    })
}

fn count_marked(mask: &GrayImage) -> u64 {
    mask.pixels().filter(|p| p[0] > 0).count() as u64
}
