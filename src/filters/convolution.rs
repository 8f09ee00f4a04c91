//! User-defined convolution filter.
//!
//! Holds raw weights and validates them each time it is applied, so a bad
//! kernel surfaces as a stage error from the pipeline.

use super::core::{convolve_in_place, Kernel};
use super::Filter;
use crate::error::FilterError;
use crate::image::ImageBuffer;

/// Convolution with caller-supplied weights, factor and bias.
#[derive(Debug, Clone, PartialEq)]
pub struct Convolution {
    weights: Vec<f64>,
    factor: f64,
    bias: f64,
}

impl Convolution {
    pub fn new(weights: Vec<f64>) -> Self {
        Self {
            weights,
            factor: 1.0,
            bias: 0.0,
        }
    }

    pub fn factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    pub fn bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    /// Validate the weights into a [`Kernel`].
    pub fn kernel(&self) -> Result<Kernel, FilterError> {
        Ok(Kernel::new(self.weights.clone())?
            .with_factor(self.factor)
            .with_bias(self.bias))
    }
}

impl Filter for Convolution {
    fn name(&self) -> &'static str {
        "convolution"
    }

    fn apply(&self, image: &mut ImageBuffer) -> Result<(), FilterError> {
        let kernel = self.kernel()?;
        convolve_in_place(image, &kernel);
        Ok(())
    }
}
