//! Enhance filter: gamma correction followed by a contrast stretch.
//!
//! Pixel-wise, so it runs on `map_pixels`. Alpha is preserved.

use super::core::map_pixels;
use super::Filter;
use crate::error::FilterError;
use crate::image::ImageBuffer;

/// Gamma applied before the contrast stretch.
pub const DEFAULT_GAMMA: f64 = 0.9;
/// Contrast multiplier around mid-gray.
pub const DEFAULT_CONTRAST: f64 = 1.15;
/// Pivot of the contrast stretch.
const MID_GRAY: f64 = 128.0;

/// Parameters for [`Enhance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceParams {
    pub gamma: f64,
    pub contrast: f64,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

/// Map one channel value (0-255) through gamma then contrast.
///
/// The result is not clamped; `map_pixels` clamps when writing.
#[inline]
pub fn enhance_channel(c: f64, params: EnhanceParams) -> f64 {
    let c1 = (c / 255.0).powf(params.gamma) * 255.0;
    (c1 - MID_GRAY) * params.contrast + MID_GRAY
}

/// Apply gamma + contrast to every color channel in place.
pub fn enhance(image: &mut ImageBuffer, params: EnhanceParams) {
    map_pixels(image, |rgb, _| rgb.map(|c| enhance_channel(c, params)));
}

/// Gamma + contrast enhancement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Enhance {
    pub params: EnhanceParams,
}

impl Enhance {
    pub fn new(params: EnhanceParams) -> Self {
        Self { params }
    }
}

impl Filter for Enhance {
    fn name(&self) -> &'static str {
        "enhance"
    }

    fn apply(&self, image: &mut ImageBuffer) -> Result<(), FilterError> {
        enhance(image, self.params);
        Ok(())
    }
}
