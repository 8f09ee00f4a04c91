//! pixelstage
//!
//! Pixel and neighborhood filters for RGBA images, composable into an
//! ordered pipeline, with optional Python bindings via PyO3 and WASM
//! bindings for JavaScript.
//!
//! ## Image Format
//! Images are RGBA, 8 bits per channel, stored as `(height, width, 4)` in
//! row-major order. Raw buffers are flat byte slices of length
//! `width * height * 4`.
//!
//! ## Architecture
//! - [`image`]: the [`ImageBuffer`] and the read-only [`Snapshot`]
//! - [`filters::core`]: `map_pixels` and `convolve`
//! - [`filters`]: enhance, sharpen, smooth, grayscale and custom kernels
//! - [`pipeline`]: ordered stages run against one buffer
//! - [`session`]: snapshot + working buffer + pipeline, with reset and presets
//!
//! ```
//! use pixelstage::{FilterKind, ImageBuffer, Pipeline};
//!
//! let mut image = ImageBuffer::filled(4, 4, [200, 40, 40, 255]).unwrap();
//! let mut pipeline = Pipeline::new();
//! pipeline.append(FilterKind::Enhance);
//! pipeline.append(FilterKind::Sharpen);
//! pipeline.run(&mut image).unwrap();
//! assert_eq!(image.width(), 4);
//! ```

pub mod error;
pub mod filters;
pub mod image;
pub mod pipeline;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{FilterError, PipelineError};
pub use filters::core::{convolve, map_pixels, Kernel};
pub use filters::{Filter, FilterKind};
pub use image::{ImageBuffer, Snapshot};
pub use pipeline::Pipeline;
pub use session::{Preset, Session};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::{
        enhance, grayscale, sharpen, smooth, Convolution, EnhanceParams, Filter, FilterKind,
        GrayscaleWeights, SharpenParams, SmoothParams,
    };
    use crate::image::ImageBuffer;
    use crate::pipeline::Pipeline;

    fn to_py_err(err: impl std::fmt::Display) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn load(image: PyReadonlyArray3<'_, u8>) -> PyResult<ImageBuffer> {
        ImageBuffer::from_array(image.as_array().to_owned()).map_err(to_py_err)
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Gamma + contrast enhancement on an RGBA u8 image (H, W, 4).
    #[pyfunction]
    #[pyo3(signature = (image, gamma=0.9, contrast=1.15))]
    pub fn enhance_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        gamma: f64,
        contrast: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut buffer = load(image)?;
        enhance::enhance(&mut buffer, EnhanceParams { gamma, contrast });
        Ok(buffer.into_array().into_pyarray(py))
    }

    /// 3x3 sharpen. Output alpha is 255.
    #[pyfunction]
    #[pyo3(signature = (image, amount=1.0))]
    pub fn sharpen_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        amount: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut buffer = load(image)?;
        sharpen::sharpen(&mut buffer, SharpenParams { amount });
        Ok(buffer.into_array().into_pyarray(py))
    }

    /// Box blur over a (2r+1)^2 window. Output alpha is 255.
    ///
    /// Raises ValueError when the radius exceeds 1024.
    #[pyfunction]
    #[pyo3(signature = (image, radius=1))]
    pub fn smooth_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut buffer = load(image)?;
        smooth::smooth(&mut buffer, SmoothParams { radius }).map_err(to_py_err)?;
        Ok(buffer.into_array().into_pyarray(py))
    }

    /// Luma grayscale with custom weights (BT.601 by default).
    #[pyfunction]
    #[pyo3(signature = (image, r_weight=0.299, g_weight=0.587, b_weight=0.114))]
    pub fn grayscale_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        r_weight: f64,
        g_weight: f64,
        b_weight: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut buffer = load(image)?;
        let weights = GrayscaleWeights::custom(r_weight, g_weight, b_weight);
        grayscale::grayscale(&mut buffer, weights);
        Ok(buffer.into_array().into_pyarray(py))
    }

    /// Convolve with arbitrary row-major weights.
    ///
    /// Raises ValueError when the weight count is not an odd square.
    #[pyfunction]
    #[pyo3(signature = (image, weights, factor=1.0, bias=0.0))]
    pub fn convolve_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        weights: Vec<f64>,
        factor: f64,
        bias: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut buffer = load(image)?;
        Convolution::new(weights)
            .factor(factor)
            .bias(bias)
            .apply(&mut buffer)
            .map_err(to_py_err)?;
        Ok(buffer.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    /// Run named filters in order, e.g. `["enhance", "sharpen"]`.
    #[pyfunction]
    pub fn run_pipeline<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        names: Vec<String>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut buffer = load(image)?;
        let mut pipeline = Pipeline::new();
        for name in &names {
            let kind: FilterKind = name.parse().map_err(to_py_err)?;
            pipeline.append(kind);
        }
        pipeline.run(&mut buffer).map_err(to_py_err)?;
        Ok(buffer.into_array().into_pyarray(py))
    }

    /// pixelstage extension module
    #[pymodule]
    pub fn pixelstage(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(enhance_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(sharpen_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(smooth_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(grayscale_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(convolve_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(run_pipeline, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pixelstage;
