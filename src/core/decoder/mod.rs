//! # Decoder Module
//!
//! Decodes an opaque byte buffer into an in-memory raster image.
//!
//! The pipeline receives uploaded document bytes with no trustworthy filename
//! or content type, so the format is sniffed from magic bytes. JPEG input
//! takes a fast decode path via `zune-jpeg` (1.5-2x faster than the image
//! crate); everything else, and any zune failure, falls back to the image
//! crate's own format detection.

use crate::error::DecodeError;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, Rgba};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Image container formats recognized by magic-byte sniffing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    WebP,
    Unknown,
}

impl SniffedFormat {
    /// Detect the container format from the buffer's magic bytes
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Self::Png
        } else if bytes.starts_with(b"BM") {
            Self::Bmp
        } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
            Self::Tiff
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Self::WebP
        } else {
            Self::Unknown
        }
    }
}

/// Decode a raw byte buffer into an RGB-capable raster.
///
/// Fatal for the whole pipeline call: bytes that cannot be interpreted as an
/// image must never produce a numeric report.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let image = match SniffedFormat::sniff(bytes) {
        SniffedFormat::Jpeg => decode_jpeg(bytes).or_else(|_| decode_fallback(bytes))?,
        _ => decode_fallback(bytes)?,
    };

    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    Ok(image)
}

/// Convert a decoded raster to grayscale using standard luma weighting
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

/// Fast JPEG decoding using zune-jpeg
fn decode_jpeg(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    // Configure decoder to output RGB
    let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(bytes, options);

    let pixels = decoder.decode().map_err(|e| DecodeError::DecodeFailed {
        reason: format!("zune-jpeg decode failed: {:?}", e),
    })?;

    let info = decoder.info().ok_or_else(|| DecodeError::DecodeFailed {
        reason: "Failed to get image info".to_string(),
    })?;

    let width = info.width as u32;
    let height = info.height as u32;

    // Get actual output colorspace after decoding
    let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

    let image = match out_colorspace {
        ColorSpace::RGB => {
            let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| {
                    DecodeError::DecodeFailed {
                        reason: "Failed to create RGB buffer".to_string(),
                    }
                })?;
            DynamicImage::ImageRgb8(buffer)
        }
        ColorSpace::RGBA => {
            let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| {
                    DecodeError::DecodeFailed {
                        reason: "Failed to create RGBA buffer".to_string(),
                    }
                })?;
            DynamicImage::ImageRgba8(buffer)
        }
        ColorSpace::Luma => {
            let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| {
                    DecodeError::DecodeFailed {
                        reason: "Failed to create Luma buffer".to_string(),
                    }
                })?;
            DynamicImage::ImageLuma8(buffer)
        }
        // Unsupported colorspace, fall back to image crate
        _ => return decode_fallback(bytes),
    };

    Ok(image)
}

/// Fallback to the image crate's own decoders and format detection
fn decode_fallback(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    image::load_from_memory(bytes).map_err(|e| DecodeError::DecodeFailed {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::io::Cursor;

    fn png_bytes(image: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn sniff_detects_jpeg() {
        assert_eq!(
            SniffedFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]),
            SniffedFormat::Jpeg
        );
    }

    #[test]
    fn sniff_detects_png() {
        let image = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        assert_eq!(SniffedFormat::sniff(&png_bytes(&image)), SniffedFormat::Png);
    }

    #[test]
    fn sniff_detects_tiff_both_endians() {
        assert_eq!(SniffedFormat::sniff(b"II*\0rest"), SniffedFormat::Tiff);
        assert_eq!(SniffedFormat::sniff(b"MM\0*rest"), SniffedFormat::Tiff);
    }

    #[test]
    fn sniff_rejects_garbage() {
        assert_eq!(
            SniffedFormat::sniff(b"definitely not an image"),
            SniffedFormat::Unknown
        );
    }

    #[test]
    fn decode_empty_buffer_fails() {
        assert!(matches!(decode(&[]), Err(DecodeError::EmptyInput)));
    }

    #[test]
    fn decode_garbage_fails() {
        let result = decode(b"this is not a valid image file");
        assert!(matches!(result, Err(DecodeError::DecodeFailed { .. })));
    }

    #[test]
    fn decode_truncated_png_header_fails() {
        let result = decode(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert!(result.is_err());
    }

    #[test]
    fn decode_png_roundtrip_preserves_pixels() {
        let image = RgbImage::from_pixel(4, 3, Rgb([200, 100, 50]));
        let decoded = decode(&png_bytes(&image)).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 3);
        assert_eq!(decoded.to_rgb8().get_pixel(2, 1), &Rgb([200, 100, 50]));
    }

    #[test]
    fn grayscale_preserves_dimensions() {
        let image = RgbImage::from_pixel(5, 7, Rgb([1, 2, 3]));
        let gray = to_grayscale(&DynamicImage::ImageRgb8(image));
        assert_eq!(gray.dimensions(), (5, 7));
    }
}
