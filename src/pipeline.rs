//! Ordered filter pipeline.
//!
//! Stages run strictly in insertion order, each one seeing the buffer left
//! by the previous stage. `run` borrows the pipeline immutably and the image
//! mutably, so a pipeline cannot be edited while it runs and two runs can
//! never touch the same image at once.
//!
//! A failing stage stops the run. The image keeps the output of every stage
//! before it; nothing is rolled back.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::error::PipelineError;
use crate::filters::Filter;
use crate::image::ImageBuffer;

/// Ordered list of filters.
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Filter>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `filter` onto the end. Duplicates are allowed.
    pub fn append<F: Filter + 'static>(&mut self, filter: F) {
        self.stages.push(Arc::new(filter));
    }

    /// Push an already shared filter; the same instance may appear many times.
    pub fn append_shared(&mut self, filter: Arc<dyn Filter>) {
        self.stages.push(filter);
    }

    /// Remove every stage. No image is touched.
    pub fn clear(&mut self) {
        self.stages.clear();
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage against `image`, in order.
    ///
    /// # Errors
    /// The first stage failure, tagged with its index and name. `image`
    /// then holds the result of all stages before it.
    pub fn run(&self, image: &mut ImageBuffer) -> Result<(), PipelineError> {
        debug!(
            "running pipeline with {} stage(s) on {}x{} image",
            self.stages.len(),
            image.width(),
            image.height()
        );

        for (index, stage) in self.stages.iter().enumerate() {
            debug!("stage {}: {}", index, stage.name());
            if let Err(source) = stage.apply(image) {
                warn!("stage {} ({}) failed: {}", index, stage.name(), source);
                return Err(PipelineError::Stage {
                    index,
                    name: stage.name(),
                    source,
                });
            }
        }

        debug!("pipeline finished");
        Ok(())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
