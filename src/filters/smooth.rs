//! Smooth filter: box average over a square window.

use super::core::{convolve_in_place, Kernel};
use super::Filter;
use crate::error::FilterError;
use crate::image::ImageBuffer;

/// Parameters for [`Smooth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothParams {
    /// Window radius; 1 gives the 3x3 box.
    pub radius: usize,
}

impl Default for SmoothParams {
    fn default() -> Self {
        Self { radius: 1 }
    }
}

/// Box-blur `image`, replacing it with the convolved result.
///
/// # Errors
/// `KernelTooLarge` when the radius exceeds
/// [`MAX_BOX_RADIUS`](super::core::MAX_BOX_RADIUS); the image is untouched.
pub fn smooth(image: &mut ImageBuffer, params: SmoothParams) -> Result<(), FilterError> {
    let kernel = Kernel::box_blur(params.radius)?;
    convolve_in_place(image, &kernel);
    Ok(())
}

/// Box-average convolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Smooth {
    pub params: SmoothParams,
}

impl Smooth {
    pub fn new(params: SmoothParams) -> Self {
        Self { params }
    }
}

impl Filter for Smooth {
    fn name(&self) -> &'static str {
        "smooth"
    }

    fn apply(&self, image: &mut ImageBuffer) -> Result<(), FilterError> {
        smooth(image, self.params)
    }
}
