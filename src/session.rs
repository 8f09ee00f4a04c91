//! Editing session: original snapshot, working buffer and pipeline.
//!
//! This is the control surface an external UI drives. Loading an image
//! captures a snapshot; filters are queued with `append`, executed with
//! `run`, and `reset` swaps the working buffer back to the snapshot.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{FilterError, PipelineError};
use crate::filters::{Filter, FilterKind};
use crate::image::{ImageBuffer, Snapshot};
use crate::pipeline::Pipeline;

/// Stage sequences bound to the buttons of the editor UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Gamma/contrast enhancement followed by sharpening.
    Enhance,
    Sharpen,
    Smooth,
    Grayscale,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Enhance,
        Preset::Sharpen,
        Preset::Smooth,
        Preset::Grayscale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Enhance => "enhance",
            Preset::Sharpen => "sharpen",
            Preset::Smooth => "smooth",
            Preset::Grayscale => "grayscale",
        }
    }

    /// Filters run by this preset, in order.
    pub fn stages(&self) -> &'static [FilterKind] {
        match self {
            Preset::Enhance => &[FilterKind::Enhance, FilterKind::Sharpen],
            Preset::Sharpen => &[FilterKind::Sharpen],
            Preset::Smooth => &[FilterKind::Smooth],
            Preset::Grayscale => &[FilterKind::Grayscale],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

/// Holds the loaded image and the pipeline that edits it.
#[derive(Debug, Clone)]
pub struct Session {
    original: Snapshot,
    working: ImageBuffer,
    pipeline: Pipeline,
}

impl Session {
    /// Start a session on a freshly decoded image.
    pub fn new(image: ImageBuffer) -> Self {
        debug!("session loaded {}x{} image", image.width(), image.height());
        Self {
            original: Snapshot::capture(&image),
            working: image,
            pipeline: Pipeline::new(),
        }
    }

    /// Replace both the snapshot and the working buffer with a new image.
    ///
    /// Queued stages are kept.
    pub fn load(&mut self, image: ImageBuffer) {
        debug!("session loaded {}x{} image", image.width(), image.height());
        self.original = Snapshot::capture(&image);
        self.working = image;
    }

    pub fn original(&self) -> &ImageBuffer {
        self.original.image()
    }

    /// Current working image, for display.
    pub fn working(&self) -> &ImageBuffer {
        &self.working
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn append<F: Filter + 'static>(&mut self, filter: F) {
        self.pipeline.append(filter);
    }

    /// Queue a filter by name (`enhance`, `sharpen`, `smooth`, `grayscale`).
    pub fn append_named(&mut self, name: &str) -> Result<(), FilterError> {
        let kind: FilterKind = name.parse()?;
        self.pipeline.append(kind);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.pipeline.clear();
    }

    /// Run the queued stages against the working image.
    pub fn run(&mut self) -> Result<(), PipelineError> {
        self.pipeline.run(&mut self.working)
    }

    /// Replace the working image with a copy of the original.
    pub fn reset(&mut self) {
        debug!("session reset to original");
        self.working = self.original.restore();
    }

    /// Clear the pipeline, queue the preset's stages and run them.
    pub fn apply_preset(&mut self, preset: Preset) -> Result<(), PipelineError> {
        debug!("applying preset {}", preset);
        self.pipeline.clear();
        for &kind in preset.stages() {
            self.pipeline.append(kind);
        }
        self.run()
    }

    /// Give up the session, returning the working image.
    pub fn into_working(self) -> ImageBuffer {
        self.working
    }
}
