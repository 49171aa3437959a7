//! Confidence threshold filter.

use crate::filter::{Detections, PredictionFilter};
use crate::mask::KeepMask;
use crate::trace::trace_event;
use crate::util::DetFilterResult;

/// Keeps detections whose confidence is strictly above a threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceFilter {
    conf_thresh: f32,
}

impl ConfidenceFilter {
    /// Creates a filter keeping confidences strictly above `conf_thresh`.
    pub fn new(conf_thresh: f32) -> Self {
        Self { conf_thresh }
    }

    /// Returns the confidence threshold.
    pub fn conf_thresh(&self) -> f32 {
        self.conf_thresh
    }
}

impl PredictionFilter for ConfidenceFilter {
    fn filter(&self, dets: &Detections) -> DetFilterResult<Detections> {
        let mask = KeepMask::from_predicate(dets.confidences(), |&c| c > self.conf_thresh);
        let out = dets.apply_mask(&mask)?;
        trace_event!("confidence_filter", input = dets.len(), kept = out.len());
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "confidence"
    }
}
