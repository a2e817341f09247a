//! Splice detection via edge-response inconsistency.
//!
//! Spliced regions frequently carry abrupt second-derivative discontinuities
//! at the seam. The Laplacian response is taken in absolute value, normalized
//! to 0-255 by the image's own maximum response, and thresholded into a
//! binary anomaly mask.

use crate::core::filters;
use image::{GrayImage, Luma};

/// Normalized edge response above this is marked anomalous
pub const EDGE_THRESHOLD: f64 = 180.0;

/// Produce a binary mask (0 or 255) of edge-response anomalies.
pub fn detect(gray: &GrayImage) -> GrayImage {
    let response = filters::laplacian(gray);
    let max_abs = response.max_abs();

    let (width, height) = gray.dimensions();
    let mut mask = GrayImage::new(width, height);

    let values = response.values();
    for y in 0..height {
        for x in 0..width {
            let abs = values[(y * width + x) as usize].abs();
            // Normalize by the image's own peak; a zero peak means a flat
            // image, where the raw (all-zero) response is used as-is
            let normalized = if max_abs != 0.0 {
                abs / max_abs * 255.0
            } else {
                abs
            };
            if normalized > EDGE_THRESHOLD {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    mask
}
