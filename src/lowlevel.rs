//! Low-level building blocks for custom filtering stages.
//!
//! These expose the geometry and suppression primitives used by the
//! built-in filters. Most users should compose [`crate::Pipeline`] from the
//! top-level filter types instead.

pub use crate::boxes::iou::pair_iou;
pub use crate::boxes::{center_to_corner, corner_areas, corner_to_center, from_flat, from_shape};
pub use crate::mask::KeepMask;
pub use crate::suppress::{nms_mask_with_ious, order_by_confidence_desc};
