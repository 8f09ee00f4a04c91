//! Core pixel engine shared by every filter.
//!
//! This module provides the two primitives the filter library is built on:
//! - `map_pixels`: in-place per-pixel color transform
//! - `convolve`: neighborhood convolution with replicate-edge borders
//!
//! Both compute in f64 and only clamp + round when writing the final byte.

use ndarray::{ArrayView3, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::error::FilterError;
use crate::image::ImageBuffer;

// ============================================================================
// Channel helpers
// ============================================================================

/// Largest radius accepted by [`Kernel::box_blur`] (a 2049x2049 window).
pub const MAX_BOX_RADIUS: usize = 1024;

/// Clamp a computed channel value to 0-255 and round to the nearest byte.
///
/// Halves round to the even neighbor, the same as a canvas
/// `Uint8ClampedArray` store. NaN maps to 0.
#[inline]
pub fn to_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

// ============================================================================
// Kernel
// ============================================================================

/// Square convolution kernel with post-sum scale and offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Vec<f64>,
    side: usize,
    factor: f64,
    bias: f64,
}

impl Kernel {
    /// Build a kernel from row-major weights (factor 1, bias 0).
    ///
    /// # Errors
    /// `MalformedKernel` unless the weight count is the square of an odd side.
    pub fn new(weights: Vec<f64>) -> Result<Self, FilterError> {
        let side = exact_odd_side(weights.len())
            .ok_or(FilterError::MalformedKernel { len: weights.len() })?;
        Ok(Self {
            weights,
            side,
            factor: 1.0,
            bias: 0.0,
        })
    }

    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    /// 3x3 cross sharpening kernel:
    ///
    /// ```text
    ///  0  -a   0
    /// -a 1+4a -a
    ///  0  -a   0
    /// ```
    pub fn sharpen(amount: f64) -> Self {
        let center = 1.0 + 4.0 * amount;
        let edge = -amount;
        Self {
            weights: vec![0.0, edge, 0.0, edge, center, edge, 0.0, edge, 0.0],
            side: 3,
            factor: 1.0,
            bias: 0.0,
        }
    }

    /// Box average over a `(2r+1) x (2r+1)` window.
    ///
    /// # Errors
    /// `KernelTooLarge` when `radius` exceeds [`MAX_BOX_RADIUS`].
    pub fn box_blur(radius: usize) -> Result<Self, FilterError> {
        let too_large = FilterError::KernelTooLarge {
            radius,
            max: MAX_BOX_RADIUS,
        };
        if radius > MAX_BOX_RADIUS {
            return Err(too_large);
        }
        let count = radius
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .and_then(|side| side.checked_mul(side))
            .ok_or(too_large)?;
        Ok(Self {
            weights: vec![1.0; count],
            side: 2 * radius + 1,
            factor: 1.0 / count as f64,
            bias: 0.0,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Sampling radius around the center pixel.
    pub fn half(&self) -> usize {
        self.side / 2
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

fn exact_odd_side(len: usize) -> Option<usize> {
    let side = (len as f64).sqrt().round() as usize;
    (side * side == len && side % 2 == 1).then_some(side)
}

// ============================================================================
// map_pixels
// ============================================================================

/// Apply a per-pixel color transform in place.
///
/// The transform receives `[r, g, b]` as f64 and the pixel index
/// (`y * width + x`). Its result is clamped to 0-255 and rounded.
/// Alpha is left untouched.
///
/// The transform only ever sees its own pixel, so it cannot observe
/// neighbors that were already rewritten in the same pass. Pixels may be
/// processed in any order.
///
/// # Arguments
/// * `image` - Buffer to rewrite
/// * `transform` - Pixel-local color function
pub fn map_pixels<F>(image: &mut ImageBuffer, transform: F)
where
    F: Fn([f64; 3], usize) -> [f64; 3] + Sync,
{
    let width = image.width();

    image
        .pixels_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for (x, mut px) in row.outer_iter_mut().enumerate() {
                let rgb = [px[0] as f64, px[1] as f64, px[2] as f64];
                let out = transform(rgb, y * width + x);
                write_rgb(&mut px, out);
            }
        });
}

#[inline]
fn write_rgb(px: &mut ArrayViewMut1<u8>, rgb: [f64; 3]) {
    px[0] = to_channel(rgb[0]);
    px[1] = to_channel(rgb[1]);
    px[2] = to_channel(rgb[2]);
}

// ============================================================================
// convolve
// ============================================================================

/// Convolve the image with `kernel`, returning a new buffer.
///
/// Samples outside the image are clamped to the nearest edge pixel.
/// Every output pixel is computed from the untouched source, so the
/// evaluation order has no effect on the result. Output alpha is 255.
///
/// # Arguments
/// * `image` - Source image (not modified)
/// * `kernel` - Validated square kernel
///
/// # Returns
/// Convolved RGBA image with the same dimensions
pub fn convolve(image: &ImageBuffer, kernel: &Kernel) -> ImageBuffer {
    let (width, height) = (image.width(), image.height());
    log::trace!(
        "convolve {}x{} with {}x{} kernel (factor={}, bias={})",
        width,
        height,
        kernel.side(),
        kernel.side(),
        kernel.factor(),
        kernel.bias()
    );

    let src = image.view();
    let mut output = image.clone();

    output
        .pixels_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for (x, mut px) in row.outer_iter_mut().enumerate() {
                let rgb = convolve_pixel(src, kernel, x, y);
                px[0] = rgb[0];
                px[1] = rgb[1];
                px[2] = rgb[2];
                px[3] = 255;
            }
        });

    output
}

/// Convolve in place: the result replaces `image` only once complete.
pub fn convolve_in_place(image: &mut ImageBuffer, kernel: &Kernel) {
    *image = convolve(image, kernel);
}

/// Compute the RGB value of one output pixel from a frozen source.
pub(crate) fn convolve_pixel(src: ArrayView3<u8>, kernel: &Kernel, x: usize, y: usize) -> [u8; 3] {
    let (height, width, _) = src.dim();
    let side = kernel.side;
    let half = kernel.half() as isize;

    let mut sum = [0.0f64; 3];
    for ky in 0..side {
        let sy = (y as isize + ky as isize - half).clamp(0, height as isize - 1) as usize;
        for kx in 0..side {
            let sx = (x as isize + kx as isize - half).clamp(0, width as isize - 1) as usize;
            let wt = kernel.weights[ky * side + kx];
            for (c, acc) in sum.iter_mut().enumerate() {
                *acc += src[[sy, sx, c]] as f64 * wt;
            }
        }
    }

    sum.map(|v| to_channel(v * kernel.factor + kernel.bias))
}
