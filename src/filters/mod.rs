//! Filter library built on the pixel engine.
//!
//! ## Image Format
//!
//! Every filter works on an [`ImageBuffer`]: RGBA, 8 bits per channel,
//! `(height, width, 4)` in row-major order.
//!
//! | Filter | Primitive | Alpha |
//! |--------|-----------|-------|
//! | enhance | `map_pixels` | preserved |
//! | grayscale | `map_pixels` | preserved |
//! | sharpen | `convolve` | forced to 255 |
//! | smooth | `convolve` | forced to 255 |
//! | convolution | `convolve` | forced to 255 |
//!
//! ## Architecture
//!
//! - **Primitives** live in [`core`]: `map_pixels` (pixel-local, in place)
//!   and `convolve` (replicate-edge, writes a new buffer).
//! - **Filters** implement [`Filter`] and hold only their parameters, so
//!   applying one twice to the same input gives the same output.
//! - **Selection by name** goes through [`FilterKind`].

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;
use crate::image::ImageBuffer;

pub mod core;
pub mod convolution;
pub mod enhance;
pub mod grayscale;
pub mod sharpen;
pub mod smooth;

pub use convolution::Convolution;
pub use enhance::{Enhance, EnhanceParams};
pub use grayscale::{Grayscale, GrayscaleWeights};
pub use sharpen::{Sharpen, SharpenParams};
pub use smooth::{Smooth, SmoothParams};

/// A transform applied to a whole image.
///
/// Implementations either rewrite the buffer in place or replace it with a
/// new buffer of the same dimensions. On error the buffer must be left as
/// it was.
pub trait Filter: Send + Sync {
    /// Short lowercase identifier used in logs and errors.
    fn name(&self) -> &'static str;

    fn apply(&self, image: &mut ImageBuffer) -> Result<(), FilterError>;
}

/// The named filters, with default parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Enhance,
    Sharpen,
    Smooth,
    Grayscale,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Enhance,
        FilterKind::Sharpen,
        FilterKind::Smooth,
        FilterKind::Grayscale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Enhance => "enhance",
            FilterKind::Sharpen => "sharpen",
            FilterKind::Smooth => "smooth",
            FilterKind::Grayscale => "grayscale",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

impl Filter for FilterKind {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn apply(&self, image: &mut ImageBuffer) -> Result<(), FilterError> {
        match self {
            FilterKind::Enhance => Enhance::default().apply(image),
            FilterKind::Sharpen => Sharpen::default().apply(image),
            FilterKind::Smooth => Smooth::default().apply(image),
            FilterKind::Grayscale => Grayscale::default().apply(image),
        }
    }
}
