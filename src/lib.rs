//! detfilter post-processes raw object-detector output.
//!
//! It computes pairwise IOU between axis-aligned boxes, runs greedy
//! non-maximum suppression, and chains prediction filters (confidence
//! threshold, per-class NMS, top-K) into pipelines over co-indexed
//! confidence, class and box collections. Class-parallel NMS is available
//! via the `rayon` feature and a vectorized IOU kernel via `simd`.

pub mod boxes;
pub mod filter;
pub mod lowlevel;
mod mask;
pub mod suppress;
mod trace;
pub mod util;

pub use boxes::{compute_ious, CenterBox, CornerBox, IouMatrix};
pub use filter::{
    ClasswiseFilter, ConfidenceFilter, DetectionParts, Detections, MaxDetFilter, NmsFilter,
    Pipeline, PipelineConfig, PredictionFilter,
};
pub use mask::KeepMask;
pub use suppress::nms_mask;
pub use util::{DetFilterError, DetFilterResult};

#[cfg(feature = "rayon")]
pub use boxes::compute_ious_par;
