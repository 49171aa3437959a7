//! Prediction filters and their composition into pipelines.
//!
//! A [`PredictionFilter`] maps a [`Detections`] set to a new one. Filters
//! may drop or reorder detections, but the three collections always move
//! together so index correspondence is never broken. A [`Pipeline`] is
//! itself a filter, so pipelines nest.

mod classwise;
mod confidence;
mod detections;
mod max_det;
mod nms;
mod pipeline;

pub use classwise::ClasswiseFilter;
pub use confidence::ConfidenceFilter;
pub use detections::Detections;
pub use max_det::MaxDetFilter;
pub use nms::NmsFilter;
pub use pipeline::{Pipeline, PipelineConfig};

use crate::boxes::CenterBox;
use crate::util::DetFilterResult;

/// Parallel `(confidences, classes, boxes)` collections.
pub type DetectionParts = (Vec<f32>, Vec<i32>, Vec<CenterBox>);

/// A stage that filters or reorders a detection set.
pub trait PredictionFilter: Send + Sync {
    /// Filters `dets`, returning a freshly allocated set.
    fn filter(&self, dets: &Detections) -> DetFilterResult<Detections>;

    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Filters raw parallel slices, validating their lengths first.
    fn filter_parts(
        &self,
        confidences: &[f32],
        classes: &[i32],
        boxes: &[CenterBox],
    ) -> DetFilterResult<DetectionParts> {
        let dets = Detections::from_slices(confidences, classes, boxes)?;
        Ok(self.filter(&dets)?.into_parts())
    }
}

impl<F: PredictionFilter + ?Sized> PredictionFilter for Box<F> {
    fn filter(&self, dets: &Detections) -> DetFilterResult<Detections> {
        (**self).filter(dets)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
