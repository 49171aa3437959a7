//! Co-indexed detection sets.

use crate::boxes::{self, CenterBox};
use crate::mask::KeepMask;
use crate::util::{ensure_len, DetFilterError, DetFilterResult};

/// One image's predictions as three parallel collections.
///
/// Index `k` refers to the same detection in `confidences`, `classes` and
/// `boxes`; every constructor checks that the lengths agree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Detections {
    confidences: Vec<f32>,
    classes: Vec<i32>,
    boxes: Vec<CenterBox>,
}

impl Detections {
    /// Builds a detection set, failing if the three lengths disagree.
    pub fn new(
        confidences: Vec<f32>,
        classes: Vec<i32>,
        boxes: Vec<CenterBox>,
    ) -> DetFilterResult<Self> {
        ensure_len("classes", confidences.len(), classes.len())?;
        ensure_len("boxes", confidences.len(), boxes.len())?;
        Ok(Self {
            confidences,
            classes,
            boxes,
        })
    }

    /// Builds a detection set from a flat row-major `N x 4` box buffer.
    pub fn from_flat(
        confidences: Vec<f32>,
        classes: Vec<i32>,
        flat_boxes: &[f32],
    ) -> DetFilterResult<Self> {
        let boxes = boxes::from_flat(flat_boxes)?;
        Self::new(confidences, classes, boxes)
    }

    /// Builds a detection set from borrowed slices.
    pub fn from_slices(
        confidences: &[f32],
        classes: &[i32],
        boxes: &[CenterBox],
    ) -> DetFilterResult<Self> {
        Self::new(confidences.to_vec(), classes.to_vec(), boxes.to_vec())
    }

    /// Returns the number of detections.
    pub fn len(&self) -> usize {
        self.confidences.len()
    }

    /// Returns true if there are no detections.
    pub fn is_empty(&self) -> bool {
        self.confidences.is_empty()
    }

    /// Returns the confidence scores.
    pub fn confidences(&self) -> &[f32] {
        &self.confidences
    }

    /// Returns the class ids.
    pub fn classes(&self) -> &[i32] {
        &self.classes
    }

    /// Returns the boxes in center-extent form.
    pub fn boxes(&self) -> &[CenterBox] {
        &self.boxes
    }

    /// Splits into `(confidences, classes, boxes)`.
    pub fn into_parts(self) -> (Vec<f32>, Vec<i32>, Vec<CenterBox>) {
        (self.confidences, self.classes, self.boxes)
    }

    /// Restricts all three collections with the same mask.
    pub fn apply_mask(&self, mask: &KeepMask) -> DetFilterResult<Self> {
        Ok(Self {
            confidences: mask.apply(&self.confidences)?,
            classes: mask.apply(&self.classes)?,
            boxes: mask.apply(&self.boxes)?,
        })
    }

    /// Gathers the detections at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> DetFilterResult<Self> {
        let mut out = Self::with_capacity(indices.len());
        for &idx in indices {
            if idx >= self.len() {
                return Err(DetFilterError::IndexOutOfBounds {
                    index: idx,
                    len: self.len(),
                    context: "detection",
                });
            }
            out.push(self.confidences[idx], self.classes[idx], self.boxes[idx]);
        }
        Ok(out)
    }

    /// Distinct class ids in ascending order.
    pub fn class_ids(&self) -> Vec<i32> {
        let mut ids = self.classes.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// The detections whose class equals `class_id`, in original order.
    pub fn of_class(&self, class_id: i32) -> DetFilterResult<Self> {
        self.apply_mask(&KeepMask::from_predicate(&self.classes, |&c| c == class_id))
    }

    /// Concatenates detection sets in order.
    pub fn concat(parts: impl IntoIterator<Item = Detections>) -> Self {
        let mut out = Self::default();
        for part in parts {
            out.confidences.extend(part.confidences);
            out.classes.extend(part.classes);
            out.boxes.extend(part.boxes);
        }
        out
    }

    fn with_capacity(n: usize) -> Self {
        Self {
            confidences: Vec::with_capacity(n),
            classes: Vec::with_capacity(n),
            boxes: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, confidence: f32, class: i32, bbox: CenterBox) {
        self.confidences.push(confidence);
        self.classes.push(class);
        self.boxes.push(bbox);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Detections {
        Detections::new(
            vec![0.9, 0.2, 0.7],
            vec![2, 0, 2],
            vec![
                CenterBox::new(0.1, 0.1, 0.1, 0.1),
                CenterBox::new(0.2, 0.2, 0.1, 0.1),
                CenterBox::new(0.3, 0.3, 0.1, 0.1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_disagreeing_lengths() {
        let err = Detections::new(vec![0.5, 0.6], vec![1], vec![CenterBox::default(); 2])
            .unwrap_err();
        assert_eq!(
            err,
            DetFilterError::ShapeMismatch {
                what: "classes",
                expected: 2,
                got: 1,
            }
        );

        let err = Detections::new(vec![0.5], vec![1], vec![]).unwrap_err();
        assert_eq!(
            err,
            DetFilterError::ShapeMismatch {
                what: "boxes",
                expected: 1,
                got: 0,
            }
        );
    }

    #[test]
    fn from_flat_rejects_ragged_boxes() {
        let err = Detections::from_flat(vec![0.5], vec![0], &[0.5; 5]).unwrap_err();
        assert_eq!(err, DetFilterError::RaggedBoxBuffer { len: 5 });
    }

    #[test]
    fn of_class_keeps_correspondence() {
        let dets = sample();
        let twos = dets.of_class(2).unwrap();
        assert_eq!(twos.confidences(), &[0.9, 0.7]);
        assert_eq!(twos.classes(), &[2, 2]);
        assert_eq!(twos.boxes()[1], CenterBox::new(0.3, 0.3, 0.1, 0.1));
        assert!(dets.of_class(5).unwrap().is_empty());
    }

    #[test]
    fn class_ids_are_sorted_and_unique() {
        assert_eq!(sample().class_ids(), vec![0, 2]);
    }

    #[test]
    fn select_reorders_and_bounds_checks() {
        let dets = sample();
        let picked = dets.select(&[2, 0]).unwrap();
        assert_eq!(picked.confidences(), &[0.7, 0.9]);
        let err = dets.select(&[3]).unwrap_err();
        assert_eq!(
            err,
            DetFilterError::IndexOutOfBounds {
                index: 3,
                len: 3,
                context: "detection",
            }
        );
    }

    #[test]
    fn concat_appends_in_order() {
        let dets = sample();
        let joined = Detections::concat([dets.of_class(0).unwrap(), dets.of_class(2).unwrap()]);
        assert_eq!(joined.classes(), &[0, 2, 2]);
        assert_eq!(joined.len(), 3);
    }
}
