//! Conversions between center-extent and corner encodings.

use crate::boxes::{CenterBox, CornerBox};

impl CenterBox {
    /// Converts to corner form, clamping every corner to `[0, 1]`.
    ///
    /// Clamping happens after the conversion, so out-of-range centers or
    /// extents collapse onto the image boundary instead of failing. A
    /// negative extent produces an inverted box whose area is zero.
    pub fn to_corner(self) -> CornerBox {
        let rad_i = self.h / 2.0;
        let rad_j = self.w / 2.0;
        CornerBox {
            i0: clamp_unit(self.i - rad_i),
            j0: clamp_unit(self.j - rad_j),
            i1: clamp_unit(self.i + rad_i),
            j1: clamp_unit(self.j + rad_j),
        }
    }
}

impl CornerBox {
    /// Converts back to center-extent form. No clamping is applied.
    pub fn to_center(self) -> CenterBox {
        CenterBox {
            i: (self.i0 + self.i1) / 2.0,
            j: (self.j0 + self.j1) / 2.0,
            h: self.i1 - self.i0,
            w: self.j1 - self.j0,
        }
    }

    /// Height, never negative.
    pub fn height(&self) -> f32 {
        (self.i1 - self.i0).max(0.0)
    }

    /// Width, never negative.
    pub fn width(&self) -> f32 {
        (self.j1 - self.j0).max(0.0)
    }

    /// Area, zero for collapsed or inverted boxes.
    pub fn area(&self) -> f32 {
        self.height() * self.width()
    }

    /// Scales fractional coordinates to absolute image coordinates.
    pub fn scale(self, image_height: f32, image_width: f32) -> CornerBox {
        CornerBox {
            i0: self.i0 * image_height,
            j0: self.j0 * image_width,
            i1: self.i1 * image_height,
            j1: self.j1 * image_width,
        }
    }
}

// `f32::clamp` propagates NaN; `max`/`min` map it onto the lower bound.
#[inline]
fn clamp_unit(value: f32) -> f32 {
    value.max(0.0).min(1.0)
}

/// Converts a center-extent collection to clamped corner form.
pub fn center_to_corner(boxes: &[CenterBox]) -> Vec<CornerBox> {
    boxes.iter().map(|b| b.to_corner()).collect()
}

/// Converts a corner collection to center-extent form.
pub fn corner_to_center(boxes: &[CornerBox]) -> Vec<CenterBox> {
    boxes.iter().map(|b| b.to_center()).collect()
}

/// Computes one area per corner-form box.
pub fn corner_areas(boxes: &[CornerBox]) -> Vec<f32> {
    boxes.iter().map(CornerBox::area).collect()
}
