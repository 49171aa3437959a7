//! Keep masks and the apply-mask primitive.

use crate::util::{ensure_len, DetFilterResult};

/// Boolean selector aligned to a detection set's index space.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeepMask {
    keep: Vec<bool>,
}

impl KeepMask {
    /// Wraps a vector of keep flags.
    pub fn new(keep: Vec<bool>) -> Self {
        Self { keep }
    }

    /// Mask of length `len` with every index kept.
    pub fn all(len: usize) -> Self {
        Self {
            keep: vec![true; len],
        }
    }

    /// Builds a mask by evaluating `pred` on each item.
    pub fn from_predicate<T>(items: &[T], mut pred: impl FnMut(&T) -> bool) -> Self {
        Self {
            keep: items.iter().map(|item| pred(item)).collect(),
        }
    }

    /// Returns the number of indices covered by the mask.
    pub fn len(&self) -> usize {
        self.keep.len()
    }

    /// Returns true if the mask covers no indices.
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }

    /// Returns whether index `idx` is kept; out-of-range indices are not.
    pub fn is_kept(&self, idx: usize) -> bool {
        self.keep.get(idx).copied().unwrap_or(false)
    }

    /// Number of kept indices.
    pub fn count_kept(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    /// Kept indices in ascending order.
    pub fn kept_indices(&self) -> Vec<usize> {
        self.keep
            .iter()
            .enumerate()
            .filter_map(|(idx, &k)| k.then_some(idx))
            .collect()
    }

    /// Returns the keep flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.keep
    }

    /// Consumes the mask, returning the keep flags.
    pub fn into_vec(self) -> Vec<bool> {
        self.keep
    }

    /// Restricts `items` to kept indices, preserving their relative order.
    pub fn apply<T: Clone>(&self, items: &[T]) -> DetFilterResult<Vec<T>> {
        ensure_len("mask", self.keep.len(), items.len())?;
        Ok(items
            .iter()
            .zip(&self.keep)
            .filter_map(|(item, &k)| k.then(|| item.clone()))
            .collect())
    }
}

impl From<Vec<bool>> for KeepMask {
    fn from(keep: Vec<bool>) -> Self {
        Self::new(keep)
    }
}
