//! Non-maximum suppression filter.

use crate::filter::classwise::map_classes;
use crate::filter::{Detections, PredictionFilter};
use crate::suppress::nms_mask;
use crate::trace::{trace_event, trace_span};
use crate::util::DetFilterResult;

/// Suppresses overlapping detections with greedy NMS.
///
/// By default suppression only happens between detections of the same
/// class; boxes of different classes never suppress each other. Survivors
/// are grouped by ascending class id and keep their relative input order
/// within a class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NmsFilter {
    iou_thresh: f32,
    per_class: bool,
    parallel: bool,
}

impl NmsFilter {
    /// Per-class NMS with the given IOU threshold.
    pub fn new(iou_thresh: f32) -> Self {
        Self {
            iou_thresh,
            per_class: true,
            parallel: false,
        }
    }

    /// NMS over the whole set regardless of class; input order is kept.
    pub fn class_agnostic(iou_thresh: f32) -> Self {
        Self {
            per_class: false,
            ..Self::new(iou_thresh)
        }
    }

    /// Processes classes concurrently when the `rayon` feature is enabled.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the IOU threshold.
    pub fn iou_thresh(&self) -> f32 {
        self.iou_thresh
    }

    /// Returns true if suppression is restricted to each class.
    pub fn is_per_class(&self) -> bool {
        self.per_class
    }

    fn suppress(&self, dets: &Detections) -> DetFilterResult<Detections> {
        let mask = nms_mask(dets.confidences(), dets.boxes(), self.iou_thresh)?;
        dets.apply_mask(&mask)
    }
}

impl PredictionFilter for NmsFilter {
    fn filter(&self, dets: &Detections) -> DetFilterResult<Detections> {
        let _span = trace_span!(
            "nms_filter",
            n = dets.len(),
            per_class = self.per_class,
            parallel = self.parallel
        )
        .entered();

        let out = if self.per_class {
            map_classes(dets, self.parallel, |subset| self.suppress(&subset))?
        } else {
            self.suppress(dets)?
        };

        trace_event!("nms_filter", input = dets.len(), kept = out.len());
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "nms"
    }
}
