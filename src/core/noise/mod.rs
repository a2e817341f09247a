//! # Noise Module
//!
//! Noise-consistency check using Laplacian variance.
//!
//! Camera sensors leave high-frequency noise everywhere; airbrushed or
//! blur-retouched regions do not. A low variance of the second-derivative
//! response over the whole raster marks the image as unnaturally smooth.

use crate::core::{decoder, filters};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Laplacian variance below this marks the image as overly smooth
pub const SMOOTHNESS_THRESHOLD: f64 = 25.0;
/// Penalty applied to overly smooth images
pub const SMOOTHNESS_PENALTY: u32 = 20;

/// Result of the noise-consistency check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseReport {
    /// Variance of the Laplacian response (higher = sharper/noisier)
    pub variance: f64,
    /// Human-readable verdict
    pub issue: String,
    /// Penalty contributed to the fraud score
    pub penalty: u32,
}

/// Analyze noise consistency from raw image bytes.
///
/// Decode failure is soft: the report carries zero penalty, reflecting "no
/// evidence either way" rather than risk.
pub fn analyze_bytes(bytes: &[u8]) -> NoiseReport {
    match decoder::decode(bytes) {
        Ok(image) => analyze_image(&image),
        Err(e) => {
            tracing::debug!(error = %e, "noise analysis skipped, input not decodable");
            NoiseReport {
                variance: 0.0,
                issue: "Cannot read image".to_string(),
                penalty: 0,
            }
        }
    }
}

/// Analyze noise consistency of an already-decoded raster
pub fn analyze_image(image: &DynamicImage) -> NoiseReport {
    let gray = decoder::to_grayscale(image);
    let variance = filters::laplacian(&gray).interior_variance();

    if variance < SMOOTHNESS_THRESHOLD {
        NoiseReport {
            variance,
            issue: "Image overly smooth, possible editing".to_string(),
            penalty: SMOOTHNESS_PENALTY,
        }
    } else {
        NoiseReport {
            variance,
            issue: "Noise levels normal".to_string(),
            penalty: 0,
        }
    }
}
