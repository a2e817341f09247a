//! False-color heatmap rendering for tamper masks.
//!
//! Uses a fixed jet-style perceptual color map: low values map to cool blues,
//! high values to hot reds, so marked regions jump out under human review.

use image::{GrayImage, Rgb, RgbImage};

/// Render a grayscale mask through the jet color map
pub fn render(mask: &GrayImage) -> RgbImage {
    let (width, height) = mask.dimensions();
    RgbImage::from_fn(width, height, |x, y| jet(mask.get_pixel(x, y)[0]))
}

/// Classic jet color map over a 0-255 intensity
fn jet(value: u8) -> Rgb<u8> {
    let t = value as f64 / 255.0;
    let r = (1.5 - (4.0 * t - 3.0).abs()).clamp(0.0, 1.0);
    let g = (1.5 - (4.0 * t - 2.0).abs()).clamp(0.0, 1.0);
    let b = (1.5 - (4.0 * t - 1.0).abs()).clamp(0.0, 1.0);
    Rgb([(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn low_intensity_is_cool() {
        let Rgb([r, _, b]) = jet(0);
        assert!(b > r, "expected blue-dominant, got r={} b={}", r, b);
    }

    #[test]
    fn high_intensity_is_hot() {
        let Rgb([r, _, b]) = jet(255);
        assert!(r > b, "expected red-dominant, got r={} b={}", r, b);
    }

    #[test]
    fn midrange_passes_through_green() {
        let Rgb([_, g, _]) = jet(128);
        assert!(g > 200);
    }

    #[test]
    fn render_preserves_dimensions() {
        let mask = GrayImage::from_pixel(13, 7, Luma([255]));
        assert_eq!(render(&mask).dimensions(), (13, 7));
    }

    #[test]
    fn render_is_deterministic() {
        let mask = GrayImage::from_fn(8, 8, |x, y| Luma([(x * y * 4) as u8]));
        assert_eq!(render(&mask), render(&mask));
    }
}
