//! Sharpen filter.
//!
//! Convolves with a 3x3 cross kernel. With the default amount of 1.0 this is
//! the classic `[0,-1,0, -1,5,-1, 0,-1,0]` kernel.

use super::core::{convolve_in_place, Kernel};
use super::Filter;
use crate::error::FilterError;
use crate::image::ImageBuffer;

/// Parameters for [`Sharpen`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpenParams {
    /// Sharpening strength (1.0 = standard).
    pub amount: f64,
}

impl Default for SharpenParams {
    fn default() -> Self {
        Self { amount: 1.0 }
    }
}

/// Sharpen `image`, replacing it with the convolved result.
///
/// Output alpha is 255.
pub fn sharpen(image: &mut ImageBuffer, params: SharpenParams) {
    convolve_in_place(image, &Kernel::sharpen(params.amount));
}

/// 3x3 sharpening convolution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sharpen {
    pub params: SharpenParams,
}

impl Sharpen {
    pub fn new(params: SharpenParams) -> Self {
        Self { params }
    }
}

impl Filter for Sharpen {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn apply(&self, image: &mut ImageBuffer) -> Result<(), FilterError> {
        sharpen(image, self.params);
        Ok(())
    }
}
