//! Error types shared by the engine, the filters and the pipeline.

use thiserror::Error;

/// Failure raised by a primitive or a single filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Kernel weight count is not the square of an odd side length.
    #[error("malformed kernel: {len} weights do not form an odd square")]
    MalformedKernel { len: usize },

    /// Box radius above [`MAX_BOX_RADIUS`](crate::filters::core::MAX_BOX_RADIUS).
    #[error("kernel radius {radius} exceeds the maximum of {max}")]
    KernelTooLarge { radius: usize, max: usize },

    /// Pixel data does not match the declared geometry.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Pixel array does not have the expected number of channels.
    #[error("channel mismatch: expected {expected} channels, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    /// `width * height * 4` does not fit in `usize`.
    #[error("image dimensions {width}x{height} overflow the pixel store")]
    DimensionOverflow { width: usize, height: usize },

    /// No filter is registered under this name.
    #[error("unknown filter: {0:?}")]
    UnknownFilter(String),
}

/// Failure raised by [`Pipeline::run`](crate::pipeline::Pipeline::run).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A stage failed; every earlier stage has already been applied.
    #[error("stage {index} ({name}) failed")]
    Stage {
        index: usize,
        name: &'static str,
        #[source]
        source: FilterError,
    },
}

impl PipelineError {
    /// The filter error that aborted the run.
    pub fn filter_error(&self) -> &FilterError {
        match self {
            Self::Stage { source, .. } => source,
        }
    }
}
