//! Greedy non-maximum suppression over a single box collection.
//!
//! Boxes are visited in descending confidence order. Each box that is still
//! kept when visited suppresses every other kept box whose IOU with it is
//! strictly greater than the threshold. Membership is a flat `Vec<bool>`
//! indexed by position.

mod order;

pub use order::order_by_confidence_desc;

use crate::boxes::{compute_ious, CenterBox, IouMatrix};
use crate::mask::KeepMask;
use crate::trace::{trace_event, trace_span};
use crate::util::{ensure_len, DetFilterResult};

/// Computes the NMS keep mask for `boxes` ranked by `confs`.
///
/// `iou_thresh` is used as-is as a strict `>` comparator; values outside
/// `(0, 1]` are not rejected.
pub fn nms_mask(confs: &[f32], boxes: &[CenterBox], iou_thresh: f32) -> DetFilterResult<KeepMask> {
    ensure_len("boxes", confs.len(), boxes.len())?;
    if confs.is_empty() {
        return Ok(KeepMask::default());
    }
    let ious = compute_ious(boxes, boxes);
    nms_mask_with_ious(confs, &ious, iou_thresh)
}

/// Computes the NMS keep mask from a precomputed square IOU matrix.
pub fn nms_mask_with_ious(
    confs: &[f32],
    ious: &IouMatrix,
    iou_thresh: f32,
) -> DetFilterResult<KeepMask> {
    let n = confs.len();
    ensure_len("iou matrix rows", n, ious.rows())?;
    ensure_len("iou matrix cols", n, ious.cols())?;

    let _span = trace_span!("nms_mask", n = n).entered();

    let mut kept = vec![true; n];
    for i in order_by_confidence_desc(confs) {
        if !kept[i] {
            continue;
        }
        let Some(row) = ious.row(i) else {
            continue;
        };
        for (j, &iou) in row.iter().enumerate() {
            if j != i && kept[j] && iou > iou_thresh {
                kept[j] = false;
            }
        }
    }

    let mask = KeepMask::new(kept);
    trace_event!("nms_survivors", n = n, kept = mask.count_kept());
    Ok(mask)
}
