//! Box encodings and flat-buffer ingestion.
//!
//! Boxes are stored in fractional image coordinates. The center-extent form
//! `(i, j, h, w)` is what detectors emit and what every filter consumes; the
//! corner form `(i0, j0, i1, j1)` is derived on demand for geometry and is
//! always clamped to `[0, 1]`.

mod convert;
pub mod iou;

pub use convert::{center_to_corner, corner_areas, corner_to_center};
pub use iou::{compute_ious, IouMatrix};

#[cfg(feature = "rayon")]
pub use iou::compute_ious_par;

use crate::util::{DetFilterError, DetFilterResult};

/// Number of coordinates per box in either encoding.
pub const BOX_WIDTH: usize = 4;

/// Box in center-extent form: center row/col and height/width fractions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CenterBox {
    /// Center row.
    pub i: f32,
    /// Center column.
    pub j: f32,
    /// Height.
    pub h: f32,
    /// Width.
    pub w: f32,
}

/// Box in corner form: top-left and bottom-right corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerBox {
    /// Top row.
    pub i0: f32,
    /// Left column.
    pub j0: f32,
    /// Bottom row.
    pub i1: f32,
    /// Right column.
    pub j1: f32,
}

impl CenterBox {
    /// Creates a box from center row/col and height/width.
    pub const fn new(i: f32, j: f32, h: f32, w: f32) -> Self {
        Self { i, j, h, w }
    }

    /// Returns the coordinates as `[i, j, h, w]`.
    pub fn to_array(self) -> [f32; BOX_WIDTH] {
        [self.i, self.j, self.h, self.w]
    }
}

impl From<[f32; BOX_WIDTH]> for CenterBox {
    fn from([i, j, h, w]: [f32; BOX_WIDTH]) -> Self {
        Self { i, j, h, w }
    }
}

impl CornerBox {
    /// Creates a box from its top-left and bottom-right corners.
    pub const fn new(i0: f32, j0: f32, i1: f32, j1: f32) -> Self {
        Self { i0, j0, i1, j1 }
    }

    /// Returns the coordinates as `[i0, j0, i1, j1]`.
    pub fn to_array(self) -> [f32; BOX_WIDTH] {
        [self.i0, self.j0, self.i1, self.j1]
    }
}

impl From<[f32; BOX_WIDTH]> for CornerBox {
    fn from([i0, j0, i1, j1]: [f32; BOX_WIDTH]) -> Self {
        Self { i0, j0, i1, j1 }
    }
}

/// Splits a flat row-major `N x 4` buffer into center-extent boxes.
pub fn from_flat(data: &[f32]) -> DetFilterResult<Vec<CenterBox>> {
    if data.len() % BOX_WIDTH != 0 {
        return Err(DetFilterError::RaggedBoxBuffer { len: data.len() });
    }
    Ok(data
        .chunks_exact(BOX_WIDTH)
        .map(|c| CenterBox::new(c[0], c[1], c[2], c[3]))
        .collect())
}

/// Reads a row-major `rows x width` buffer, rejecting any width other than 4.
pub fn from_shape(data: &[f32], rows: usize, width: usize) -> DetFilterResult<Vec<CenterBox>> {
    if width != BOX_WIDTH {
        return Err(DetFilterError::InvalidBoxWidth { width });
    }
    let needed = rows
        .checked_mul(BOX_WIDTH)
        .ok_or(DetFilterError::RaggedBoxBuffer { len: data.len() })?;
    if data.len() != needed {
        return Err(DetFilterError::ShapeMismatch {
            what: "box buffer",
            expected: needed,
            got: data.len(),
        });
    }
    from_flat(data)
}

/// Flattens boxes into a row-major `N x 4` buffer.
pub fn to_flat(boxes: &[CenterBox]) -> Vec<f32> {
    boxes.iter().flat_map(|b| b.to_array()).collect()
}
