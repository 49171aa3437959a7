//! Ordered composition of prediction filters.

use crate::filter::{ConfidenceFilter, Detections, MaxDetFilter, NmsFilter, PredictionFilter};
use crate::trace::{trace_event, trace_span};
use crate::util::{DetFilterError, DetFilterResult};

/// Settings for the standard post-processing pipeline.
///
/// Each stage is included only when its setting is present, in the order
/// confidence threshold, NMS, max detections.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Minimum confidence (exclusive) for a detection to survive.
    pub conf_thresh: Option<f32>,
    /// IOU above which a lower-confidence box is suppressed.
    pub iou_thresh: Option<f32>,
    /// Maximum number of detections to return.
    pub max_dets: Option<usize>,
    /// Run NMS across classes instead of within each class.
    pub class_agnostic: bool,
    /// Process classes in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            conf_thresh: Some(0.5),
            iou_thresh: Some(0.5),
            max_dets: None,
            class_agnostic: false,
            parallel: false,
        }
    }
}

/// Filters applied in sequence, each stage consuming the previous output.
///
/// An empty pipeline returns its input unchanged.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn PredictionFilter>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the standard pipeline described by `cfg`.
    pub fn from_config(cfg: &PipelineConfig) -> DetFilterResult<Self> {
        let mut pipeline = Self::new();
        if let Some(conf_thresh) = cfg.conf_thresh {
            if !conf_thresh.is_finite() {
                return Err(DetFilterError::InvalidConfig("conf_thresh must be finite"));
            }
            pipeline.push(ConfidenceFilter::new(conf_thresh));
        }
        if let Some(iou_thresh) = cfg.iou_thresh {
            if !iou_thresh.is_finite() {
                return Err(DetFilterError::InvalidConfig("iou_thresh must be finite"));
            }
            let nms = if cfg.class_agnostic {
                NmsFilter::class_agnostic(iou_thresh)
            } else {
                NmsFilter::new(iou_thresh)
            };
            pipeline.push(nms.with_parallel(cfg.parallel));
        }
        if let Some(max_dets) = cfg.max_dets {
            pipeline.push(MaxDetFilter::new(max_dets));
        }
        Ok(pipeline)
    }

    /// Appends a stage.
    pub fn push<F: PredictionFilter + 'static>(&mut self, stage: F) {
        self.stages.push(Box::new(stage));
    }

    /// Appends a stage, builder style.
    pub fn with_stage<F: PredictionFilter + 'static>(mut self, stage: F) -> Self {
        self.push(stage);
        self
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in application order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl PredictionFilter for Pipeline {
    fn filter(&self, dets: &Detections) -> DetFilterResult<Detections> {
        let _span = trace_span!("pipeline", stages = self.stages.len()).entered();

        let mut current = dets.clone();
        for (idx, stage) in self.stages.iter().enumerate() {
            current = stage.filter(&current)?;
            trace_event!(
                "pipeline_stage",
                index = idx,
                stage = stage.name(),
                kept = current.len()
            );
        }
        Ok(current)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}
