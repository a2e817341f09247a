//! # ELA Module
//!
//! Error Level Analysis: re-encode the image at a fixed lossy quality and
//! measure the residual.
//!
//! Regions with a different prior compression history (spliced-in content,
//! local edits) leave larger residuals than the rest of the image, so the
//! score rewards residual dynamic range rather than absolute magnitude. The
//! returned artifact is the residual amplified for human inspection; the raw
//! difference is nearly black at normal brightness.

use crate::core::decoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Default lossy quality used for the re-encode pass
pub const DEFAULT_ELA_QUALITY: u8 = 85;
/// Score multiplier over the residual's channel extent
pub const ELA_SCORE_GAIN: u32 = 2;
/// Brightness amplification for the visualization artifact
pub const ELA_AMPLIFY: u8 = 30;

/// Result of Error Level Analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElaReport {
    /// Amplified residual image, None when analysis could not run
    #[serde(skip)]
    pub image: Option<RgbImage>,
    /// Residual score, 0-100
    pub score: u32,
}

impl ElaReport {
    fn no_evidence() -> Self {
        Self {
            image: None,
            score: 0,
        }
    }
}

/// Error Level Analyzer with a configurable re-encode quality
#[derive(Debug, Clone, Copy)]
pub struct ElaAnalyzer {
    quality: u8,
}

impl Default for ElaAnalyzer {
    fn default() -> Self {
        Self {
            quality: DEFAULT_ELA_QUALITY,
        }
    }
}

impl ElaAnalyzer {
    /// Create an analyzer with a custom re-encode quality (1-100)
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Run ELA over raw image bytes.
    ///
    /// Decode failure is soft: `{image: None, score: 0}`.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> ElaReport {
        match decoder::decode(bytes) {
            Ok(image) => self.analyze_image(&image),
            Err(e) => {
                tracing::debug!(error = %e, "ELA skipped, input not decodable");
                ElaReport::no_evidence()
            }
        }
    }

    /// Run ELA over an already-decoded raster.
    ///
    /// A failed re-encode round trip degrades to a no-evidence report rather
    /// than aborting the pipeline.
    pub fn analyze_image(&self, image: &DynamicImage) -> ElaReport {
        let original = image.to_rgb8();
        let (width, height) = original.dimensions();
        if width == 0 || height == 0 {
            return ElaReport::no_evidence();
        }

        let recompressed = match self.recompress(&original) {
            Some(copy) => copy,
            None => {
                tracing::warn!("ELA re-encode round trip failed");
                return ElaReport::no_evidence();
            }
        };

        // Per-pixel per-channel absolute difference, tracking each channel's
        // min/max to compute the residual's dynamic range
        let mut diff = RgbImage::new(width, height);
        let mut channel_min = [u8::MAX; 3];
        let mut channel_max = [u8::MIN; 3];

        for y in 0..height {
            for x in 0..width {
                let a = original.get_pixel(x, y);
                let b = recompressed.get_pixel(x, y);
                let mut pixel = [0u8; 3];
                for c in 0..3 {
                    let v = a[c].abs_diff(b[c]);
                    pixel[c] = v;
                    channel_min[c] = channel_min[c].min(v);
                    channel_max[c] = channel_max[c].max(v);
                }
                diff.put_pixel(x, y, Rgb(pixel));
            }
        }

        let max_extent = (0..3)
            .map(|c| (channel_max[c] - channel_min[c]) as u32)
            .max()
            .unwrap_or(0);
        let score = (ELA_SCORE_GAIN * max_extent).min(100);

        let mut amplified = diff;
        for pixel in amplified.pixels_mut() {
            for c in 0..3 {
                pixel[c] = pixel[c].saturating_mul(ELA_AMPLIFY);
            }
        }

        ElaReport {
            image: Some(amplified),
            score,
        }
    }

    /// JPEG round trip at the configured quality
    fn recompress(&self, original: &RgbImage) -> Option<RgbImage> {
        let mut buffer = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        encoder.encode_image(original).ok()?;
        Some(image::load_from_memory(&buffer).ok()?.to_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([120, 130, 140])))
    }

    /// Deterministic high-frequency texture (no RNG, stable across runs)
    fn textured_image() -> DynamicImage {
        let mut state = 0x12345678u32;
        let image = RgbImage::from_fn(64, 64, |_, _| {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            let v = (state >> 24) as u8;
            Rgb([v, v.wrapping_add(37), v.wrapping_add(91)])
        });
        DynamicImage::ImageRgb8(image)
    }

    #[test]
    fn solid_image_has_low_residual() {
        let report = ElaAnalyzer::default().analyze_image(&solid_image());
        // A uniform raster recompresses almost losslessly
        assert!(report.score <= 20, "unexpected score {}", report.score);
        assert!(report.image.is_some());
    }

    #[test]
    fn score_is_bounded() {
        let report = ElaAnalyzer::default().analyze_image(&textured_image());
        assert!(report.score <= 100);
    }

    #[test]
    fn artifact_matches_input_dimensions() {
        let report = ElaAnalyzer::default().analyze_image(&textured_image());
        let artifact = report.image.unwrap();
        assert_eq!(artifact.dimensions(), (64, 64));
    }

    #[test]
    fn undecodable_bytes_fail_soft() {
        let report = ElaAnalyzer::default().analyze_bytes(b"junk bytes");
        assert!(report.image.is_none());
        assert_eq!(report.score, 0);
    }

    #[test]
    fn analysis_is_deterministic() {
        let analyzer = ElaAnalyzer::default();
        let a = analyzer.analyze_image(&textured_image());
        let b = analyzer.analyze_image(&textured_image());
        assert_eq!(a.score, b.score);
        assert_eq!(a.image, b.image);
    }

    #[test]
    fn quality_is_configurable() {
        assert_eq!(ElaAnalyzer::new(70).quality(), 70);
        assert_eq!(ElaAnalyzer::default().quality(), DEFAULT_ELA_QUALITY);
    }
}
