//! Per-class partitioning of detection sets.
//!
//! Each distinct class id is handled independently and the resulting
//! fragments are concatenated in ascending class-id order. With the `rayon`
//! feature and `parallel` set, classes are processed concurrently; the
//! output order is unchanged.

use crate::filter::{Detections, PredictionFilter};
use crate::trace::trace_debug;
use crate::util::DetFilterResult;

/// Runs `per_class` on every class partition of `dets` and concatenates.
pub(crate) fn map_classes<F>(
    dets: &Detections,
    parallel: bool,
    per_class: F,
) -> DetFilterResult<Detections>
where
    F: Fn(Detections) -> DetFilterResult<Detections> + Sync,
{
    let class_ids = dets.class_ids();
    let run = |&class_id: &i32| -> DetFilterResult<Detections> {
        let subset = dets.of_class(class_id)?;
        let input = subset.len();
        let out = per_class(subset)?;
        trace_debug!("class_filtered", class_id = class_id, input = input, kept = out.len());
        Ok(out)
    };

    #[cfg(feature = "rayon")]
    {
        if parallel {
            use rayon::prelude::*;
            let parts = class_ids
                .par_iter()
                .map(&run)
                .collect::<DetFilterResult<Vec<_>>>()?;
            return Ok(Detections::concat(parts));
        }
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;

    let parts = class_ids
        .iter()
        .map(&run)
        .collect::<DetFilterResult<Vec<_>>>()?;
    Ok(Detections::concat(parts))
}

/// Applies an inner filter independently to each class.
#[derive(Clone, Debug)]
pub struct ClasswiseFilter<F> {
    inner: F,
    parallel: bool,
}

impl<F: PredictionFilter> ClasswiseFilter<F> {
    /// Wraps `inner` so it runs once per class.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            parallel: false,
        }
    }

    /// Processes classes concurrently when the `rayon` feature is enabled.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the wrapped filter.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: PredictionFilter> PredictionFilter for ClasswiseFilter<F> {
    fn filter(&self, dets: &Detections) -> DetFilterResult<Detections> {
        map_classes(dets, self.parallel, |subset| self.inner.filter(&subset))
    }

    fn name(&self) -> &'static str {
        "classwise"
    }
}
