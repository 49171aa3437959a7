//! Top-K by confidence.

use crate::filter::{Detections, PredictionFilter};
use crate::suppress::order_by_confidence_desc;
use crate::trace::trace_event;
use crate::util::DetFilterResult;

/// Keeps the `max_dets` most confident detections, most confident first.
///
/// Ties rank by ascending input index, matching the NMS ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxDetFilter {
    max_dets: usize,
}

impl MaxDetFilter {
    /// Creates a filter keeping at most `max_dets` detections.
    pub fn new(max_dets: usize) -> Self {
        Self { max_dets }
    }

    /// Returns the detection limit.
    pub fn max_dets(&self) -> usize {
        self.max_dets
    }
}

impl PredictionFilter for MaxDetFilter {
    fn filter(&self, dets: &Detections) -> DetFilterResult<Detections> {
        let mut order = order_by_confidence_desc(dets.confidences());
        order.truncate(self.max_dets);
        let out = dets.select(&order)?;
        trace_event!("max_det_filter", input = dets.len(), kept = out.len());
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "max_det"
    }
}
