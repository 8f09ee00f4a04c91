//! WebAssembly exports for the editor front end.
//!
//! The browser hands over canvas `ImageData` bytes, queues filters by name
//! and reads the working pixels back for `putImageData`.
//!
//! ## Buffer Format
//!
//! All buffers are flat RGBA u8 arrays of length `width * height * 4`.

use wasm_bindgen::prelude::*;

use crate::filters::core::Kernel;
use crate::filters::FilterKind;
use crate::image::ImageBuffer;
use crate::session::{Preset, Session};

fn to_js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Session
// ============================================================================

/// Editing session owned by the JS side.
#[wasm_bindgen]
pub struct WasmSession {
    inner: Session,
}

#[wasm_bindgen]
impl WasmSession {
    /// Start a session from canvas bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(data: &[u8], width: usize, height: usize) -> Result<WasmSession, JsValue> {
        let image = ImageBuffer::from_rgba(width, height, data.to_vec()).map_err(to_js_err)?;
        Ok(Self {
            inner: Session::new(image),
        })
    }

    /// Load a new image, replacing the original snapshot.
    pub fn load(&mut self, data: &[u8], width: usize, height: usize) -> Result<(), JsValue> {
        let image = ImageBuffer::from_rgba(width, height, data.to_vec()).map_err(to_js_err)?;
        self.inner.load(image);
        Ok(())
    }

    /// Queue a filter by name.
    pub fn append(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.append_named(name).map_err(to_js_err)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn run(&mut self) -> Result<(), JsValue> {
        self.inner.run().map_err(to_js_err)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Clear, queue and run a preset (`enhance`, `sharpen`, `smooth`, `grayscale`).
    #[wasm_bindgen(js_name = applyPreset)]
    pub fn apply_preset(&mut self, name: &str) -> Result<(), JsValue> {
        let preset: Preset = name.parse().map_err(to_js_err)?;
        self.inner.apply_preset(preset).map_err(to_js_err)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.inner.working().width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.inner.working().height()
    }

    /// Working pixels as flat RGBA bytes.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.working().as_bytes().to_vec()
    }

    /// Original pixels as flat RGBA bytes.
    #[wasm_bindgen(js_name = originalPixels)]
    pub fn original_pixels(&self) -> Vec<u8> {
        self.inner.original().as_bytes().to_vec()
    }
}

// ============================================================================
// One-shot filters
// ============================================================================

/// Apply one named filter to canvas bytes.
#[wasm_bindgen]
pub fn apply_filter_wasm(
    name: &str,
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsValue> {
    use crate::filters::Filter;

    let kind: FilterKind = name.parse().map_err(to_js_err)?;
    let mut image = ImageBuffer::from_rgba(width, height, data.to_vec()).map_err(to_js_err)?;
    kind.apply(&mut image).map_err(to_js_err)?;
    Ok(image.into_raw())
}

/// Convolve canvas bytes with arbitrary row-major weights.
#[wasm_bindgen]
pub fn convolve_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    weights: Vec<f64>,
    factor: f64,
    bias: f64,
) -> Result<Vec<u8>, JsValue> {
    let kernel = Kernel::new(weights)
        .map_err(to_js_err)?
        .with_factor(factor)
        .with_bias(bias);
    let image = ImageBuffer::from_rgba(width, height, data.to_vec()).map_err(to_js_err)?;
    Ok(crate::filters::core::convolve(&image, &kernel).into_raw())
}
