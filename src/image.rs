//! RGBA image buffer and the read-only snapshot used for reset.
//!
//! Pixels are stored as an `(height, width, 4)` array in standard layout,
//! so the flat byte index of a channel is `(y * width + x) * 4 + channel`.

use ndarray::{Array3, ArrayView3};

use crate::error::FilterError;

/// Number of channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Owned RGBA8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pixels: Array3<u8>,
}

impl ImageBuffer {
    /// Allocate a transparent black canvas.
    pub fn new(width: usize, height: usize) -> Result<Self, FilterError> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Allocate a canvas where every pixel is `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, FilterError> {
        let len = byte_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Self::from_rgba(width, height, data)
    }

    /// Wrap raw RGBA bytes, e.g. the output of a decoder or a canvas readback.
    ///
    /// # Errors
    /// `SizeMismatch` if `data.len() != width * height * 4`.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FilterError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(FilterError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let pixels = Array3::from_shape_vec((height, width, CHANNELS), data).map_err(|_| {
            FilterError::SizeMismatch {
                expected,
                actual: expected,
            }
        })?;
        Ok(Self { pixels })
    }

    /// Take ownership of an `(height, width, 4)` array.
    ///
    /// # Errors
    /// `ChannelMismatch` when the last axis is not 4 long.
    pub fn from_array(pixels: Array3<u8>) -> Result<Self, FilterError> {
        let channels = pixels.dim().2;
        if channels != CHANNELS {
            return Err(FilterError::ChannelMismatch {
                expected: CHANNELS,
                actual: channels,
            });
        }
        let pixels = if pixels.is_standard_layout() {
            pixels
        } else {
            pixels.as_standard_layout().into_owned()
        };
        Ok(Self { pixels })
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// True when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let p = &self.pixels;
        Some([p[[y, x, 0]], p[[y, x, 1]], p[[y, x, 2]], p[[y, x, 3]]])
    }

    /// Flat RGBA bytes in row-major order.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels
            .as_slice()
            .expect("image buffer is always in standard layout")
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut Array3<u8> {
        &mut self.pixels
    }

    /// Consume the buffer, returning the flat RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        let len = self.pixels.len();
        let (mut raw, offset) = self.pixels.into_raw_vec_and_offset();
        raw.drain(..offset.unwrap_or(0));
        raw.truncate(len);
        raw
    }

    pub fn into_array(self) -> Array3<u8> {
        self.pixels
    }
}

fn byte_len(width: usize, height: usize) -> Result<usize, FilterError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(FilterError::DimensionOverflow { width, height })
}

/// Read-only copy of the image as originally loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    image: ImageBuffer,
}

impl Snapshot {
    pub fn capture(image: &ImageBuffer) -> Self {
        Self {
            image: image.clone(),
        }
    }

    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// A fresh working copy of the original pixels.
    pub fn restore(&self) -> ImageBuffer {
        self.image.clone()
    }
}
