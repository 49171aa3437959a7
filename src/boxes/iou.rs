//! Pairwise intersection-over-union between two box collections.
//!
//! Both collections are converted to clamped corner form once and stored as
//! structure-of-arrays so the inner loop over column boxes is contiguous.
//! A pair whose union is zero (two collapsed boxes) has IOU 0, never NaN.

use crate::boxes::{CenterBox, CornerBox};
use crate::trace::{trace_event, trace_span};

/// Dense `rows x cols` IOU matrix in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct IouMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl IouMatrix {
    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Returns the number of row boxes.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of column boxes.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `iou(rows[a], cols[b])` if both indices are in bounds.
    pub fn get(&self, a: usize, b: usize) -> Option<f32> {
        if a >= self.rows || b >= self.cols {
            return None;
        }
        self.data.get(a * self.cols + b).copied()
    }

    /// Returns the IOUs of row box `a` against every column box.
    pub fn row(&self, a: usize) -> Option<&[f32]> {
        if a >= self.rows {
            return None;
        }
        let start = a * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Returns the backing row-major buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Corner-form boxes with precomputed areas, laid out per coordinate.
pub(crate) struct CornerSet {
    pub(crate) i0: Vec<f32>,
    pub(crate) j0: Vec<f32>,
    pub(crate) i1: Vec<f32>,
    pub(crate) j1: Vec<f32>,
    pub(crate) area: Vec<f32>,
}

impl CornerSet {
    pub(crate) fn from_center(boxes: &[CenterBox]) -> Self {
        let n = boxes.len();
        let mut set = Self {
            i0: Vec::with_capacity(n),
            j0: Vec::with_capacity(n),
            i1: Vec::with_capacity(n),
            j1: Vec::with_capacity(n),
            area: Vec::with_capacity(n),
        };
        for b in boxes {
            let c = b.to_corner();
            set.i0.push(c.i0);
            set.j0.push(c.j0);
            set.i1.push(c.i1);
            set.j1.push(c.j1);
            set.area.push(c.area());
        }
        set
    }

    pub(crate) fn len(&self) -> usize {
        self.area.len()
    }

    pub(crate) fn corner(&self, idx: usize) -> CornerBox {
        CornerBox::new(self.i0[idx], self.j0[idx], self.i1[idx], self.j1[idx])
    }
}

/// IOU of two corner boxes given their areas; zero when the union is empty.
#[inline]
pub fn pair_iou(a: CornerBox, area_a: f32, b: CornerBox, area_b: f32) -> f32 {
    let inter_h = (a.i1.min(b.i1) - a.i0.max(b.i0)).max(0.0);
    let inter_w = (a.j1.min(b.j1) - a.j0.max(b.j0)).max(0.0);
    let inter = inter_h * inter_w;
    let union = area_a + area_b - inter;
    if union > 0.0 {
        (inter / union).min(1.0)
    } else {
        0.0
    }
}

#[cfg(not(feature = "simd"))]
fn iou_row(row: CornerBox, row_area: f32, cols: &CornerSet, out: &mut [f32]) {
    for (b, slot) in out.iter_mut().enumerate() {
        *slot = pair_iou(row, row_area, cols.corner(b), cols.area[b]);
    }
}

#[cfg(feature = "simd")]
fn iou_row(row: CornerBox, row_area: f32, cols: &CornerSet, out: &mut [f32]) {
    use wide::f32x8;

    const LANES: usize = 8;

    #[inline]
    fn load(slice: &[f32]) -> f32x8 {
        f32x8::from([
            slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
        ])
    }

    let n = cols.len();
    let simd_end = n / LANES * LANES;
    let zero = f32x8::ZERO;
    let one = f32x8::ONE;
    let a_i0 = f32x8::splat(row.i0);
    let a_j0 = f32x8::splat(row.j0);
    let a_i1 = f32x8::splat(row.i1);
    let a_j1 = f32x8::splat(row.j1);
    let a_area = f32x8::splat(row_area);

    let mut b = 0;
    while b < simd_end {
        let inter_h = (a_i1.min(load(&cols.i1[b..])) - a_i0.max(load(&cols.i0[b..]))).max(zero);
        let inter_w = (a_j1.min(load(&cols.j1[b..])) - a_j0.max(load(&cols.j0[b..]))).max(zero);
        let inter = inter_h * inter_w;
        let union = a_area + load(&cols.area[b..]) - inter;
        // Lanes with an empty union divide by zero; they are masked to 0.
        let iou = union.simd_gt(zero).blend((inter / union).min(one), zero);
        out[b..b + LANES].copy_from_slice(&iou.to_array());
        b += LANES;
    }

    while b < n {
        out[b] = pair_iou(row, row_area, cols.corner(b), cols.area[b]);
        b += 1;
    }
}

/// Computes `iou(rows[a], cols[b])` for every pair, as a `rows x cols` matrix.
///
/// Both inputs are in center-extent form and are clamped to the unit square
/// before intersecting. Empty inputs produce an empty matrix.
pub fn compute_ious(rows: &[CenterBox], cols: &[CenterBox]) -> IouMatrix {
    let _span = trace_span!("compute_ious", rows = rows.len(), cols = cols.len()).entered();

    let mut matrix = IouMatrix::zeros(rows.len(), cols.len());
    if rows.is_empty() || cols.is_empty() {
        return matrix;
    }

    let row_set = CornerSet::from_center(rows);
    let col_set = CornerSet::from_center(cols);
    for (a, out) in matrix.data.chunks_exact_mut(col_set.len()).enumerate() {
        iou_row(row_set.corner(a), row_set.area[a], &col_set, out);
    }

    trace_event!("ious_computed", pairs = matrix.data.len());
    matrix
}

/// Row-parallel variant of [`compute_ious`] (rayon).
#[cfg(feature = "rayon")]
pub fn compute_ious_par(rows: &[CenterBox], cols: &[CenterBox]) -> IouMatrix {
    use rayon::prelude::*;

    let _span = trace_span!(
        "compute_ious",
        rows = rows.len(),
        cols = cols.len(),
        parallel = true
    )
    .entered();

    let mut matrix = IouMatrix::zeros(rows.len(), cols.len());
    if rows.is_empty() || cols.is_empty() {
        return matrix;
    }

    let row_set = CornerSet::from_center(rows);
    let col_set = CornerSet::from_center(cols);
    matrix
        .data
        .par_chunks_mut(col_set.len())
        .enumerate()
        .for_each(|(a, out)| iou_row(row_set.corner(a), row_set.area[a], &col_set, out));

    trace_event!("ious_computed", pairs = matrix.data.len());
    matrix
}
