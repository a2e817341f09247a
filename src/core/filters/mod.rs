//! # Filters Module
//!
//! Shared second-derivative (Laplacian) filtering over grayscale rasters.
//!
//! Both the noise analyzer (variance of the response) and the splice detector
//! (thresholded normalized response) consume the same operator, so it lives
//! here rather than in either analyzer.

use image::GrayImage;

/// Full-size Laplacian response of a grayscale raster.
///
/// Values are stored row-major at the same dimensions as the input. Border
/// pixels have no complete 3x3 neighborhood and carry a zero response.
#[derive(Debug, Clone)]
pub struct LaplacianResponse {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

/// Compute the Laplacian response using the kernel [0,1,0; 1,-4,1; 0,1,0]
pub fn laplacian(gray: &GrayImage) -> LaplacianResponse {
    let (width, height) = gray.dimensions();
    let mut values = vec![0.0f64; (width as usize) * (height as usize)];

    if width >= 3 && height >= 3 {
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let center = gray.get_pixel(x, y)[0] as f64;
                let up = gray.get_pixel(x, y - 1)[0] as f64;
                let down = gray.get_pixel(x, y + 1)[0] as f64;
                let left = gray.get_pixel(x - 1, y)[0] as f64;
                let right = gray.get_pixel(x + 1, y)[0] as f64;

                values[(y * width + x) as usize] = up + down + left + right - 4.0 * center;
            }
        }
    }

    LaplacianResponse {
        width,
        height,
        values,
    }
}

impl LaplacianResponse {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw response values, row-major, borders zero
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Population variance of the response over interior pixels.
    ///
    /// Interior-only: the zeroed border would otherwise dilute the statistic
    /// for small images. Returns 0.0 when the raster has no interior.
    pub fn interior_variance(&self) -> f64 {
        if self.width < 3 || self.height < 3 {
            return 0.0;
        }

        let mut interior = Vec::with_capacity(
            ((self.width - 2) as usize) * ((self.height - 2) as usize),
        );
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                interior.push(self.values[(y * self.width + x) as usize]);
            }
        }

        let count = interior.len() as f64;
        let mean = interior.iter().sum::<f64>() / count;
        interior.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count
    }

    /// Largest absolute response value
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
    }
}
