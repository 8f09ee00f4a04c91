//! Grayscale conversion filter.
//!
//! Luma is a weighted sum of R, G and B written back to all three color
//! channels. Defaults to ITU-R BT.601 weights; BT.709 is available as a
//! preset. Alpha is preserved.

use super::core::map_pixels;
use super::Filter;
use crate::error::FilterError;
use crate::image::ImageBuffer;

/// ITU-R BT.601 luma coefficients
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// RGB weights used to compute luma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayscaleWeights {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for GrayscaleWeights {
    fn default() -> Self {
        Self {
            r: LUMA_R,
            g: LUMA_G,
            b: LUMA_B,
        }
    }
}

impl GrayscaleWeights {
    /// BT.601 luma (default)
    pub fn bt601() -> Self {
        Self::default()
    }

    /// BT.709 luminosity
    pub fn bt709() -> Self {
        Self {
            r: 0.2126,
            g: 0.7152,
            b: 0.0722,
        }
    }

    /// Create custom weights (normalized automatically)
    pub fn custom(r: f64, g: f64, b: f64) -> Self {
        let sum = (r + g + b).abs().max(0.001);
        Self {
            r: r / sum,
            g: g / sum,
            b: b / sum,
        }
    }

    #[inline]
    pub fn luma(&self, [r, g, b]: [f64; 3]) -> f64 {
        self.r * r + self.g * g + self.b * b
    }
}

/// Replace each pixel's RGB with its luma.
pub fn grayscale(image: &mut ImageBuffer, weights: GrayscaleWeights) {
    map_pixels(image, |rgb, _| {
        let v = weights.luma(rgb);
        [v, v, v]
    });
}

/// Luma grayscale conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Grayscale {
    pub weights: GrayscaleWeights,
}

impl Grayscale {
    pub fn new(weights: GrayscaleWeights) -> Self {
        Self { weights }
    }
}

impl Filter for Grayscale {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn apply(&self, image: &mut ImageBuffer) -> Result<(), FilterError> {
        grayscale(image, self.weights);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_red() {
        let mut img = ImageBuffer::filled(1, 1, [255, 0, 0, 255]).unwrap();
        grayscale(&mut img, GrayscaleWeights::default());
        // 0.299 * 255 = 76.245
        assert_eq!(img.pixel(0, 0), Some([76, 76, 76, 255]));
    }

    #[test]
    fn test_grayscale_green() {
        let mut img = ImageBuffer::filled(1, 1, [0, 255, 0, 255]).unwrap();
        grayscale(&mut img, GrayscaleWeights::default());
        // 0.587 * 255 = 149.685
        assert_eq!(img.pixel(0, 0), Some([150, 150, 150, 255]));
    }

    #[test]
    fn test_grayscale_preserves_alpha() {
        let mut img = ImageBuffer::filled(2, 2, [128, 128, 128, 100]).unwrap();
        grayscale(&mut img, GrayscaleWeights::default());
        assert!(img.as_bytes().chunks(4).all(|p| p == [128, 128, 128, 100]));
    }

    #[test]
    fn test_grayscale_is_idempotent() {
        let data: Vec<u8> = (0..64u32)
            .flat_map(|i| [(i * 4) as u8, (255 - i * 3) as u8, (i * 13 % 256) as u8, 255])
            .collect();
        let mut once = ImageBuffer::from_rgba(8, 8, data).unwrap();
        grayscale(&mut once, GrayscaleWeights::default());
        let mut twice = once.clone();
        grayscale(&mut twice, GrayscaleWeights::default());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_bt709_weights() {
        let mut img = ImageBuffer::filled(1, 1, [0, 255, 0, 255]).unwrap();
        grayscale(&mut img, GrayscaleWeights::bt709());
        // 0.7152 * 255 = 182.376
        assert_eq!(img.pixel(0, 0).unwrap()[0], 182);
    }

    #[test]
    fn test_custom_weights_normalized() {
        let w = GrayscaleWeights::custom(1.0, 1.0, 2.0);
        assert!((w.r + w.g + w.b - 1.0).abs() < 1e-6);
        assert!((w.b - 0.5).abs() < 1e-6);
    }
}
