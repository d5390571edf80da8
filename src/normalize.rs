//! Normalization pipeline.
//!
//! Higher-level policies built from the transform engine: moving a
//! drawing's center of mass to the middle of a target box, and fitting its
//! bounding box into a viewbox with or without preserving aspect ratio.

use crate::bounding_rect::{bounding_box, centroid};
use crate::drawing::Drawing;
use crate::error::{Result, TransformError};
use crate::options::{image_size, CenterOptions, FitViewBoxOptions};
use crate::trans_affine::TransAffine;
use crate::transforms::apply_affine;

/// Shift the drawing so its centroid lands on the center of the target box.
pub fn center(drawing: &mut Drawing, opts: &CenterOptions) -> Result<()> {
    let (w, h) = image_size(opts.image_s, opts.image_w, opts.image_h)?;
    let c = centroid(drawing)?;
    let dx = w / 2.0 - c.x;
    let dy = h / 2.0 - c.y;
    log::debug!("center: centroid ({}, {}) -> ({}, {})", c.x, c.y, w / 2.0, h / 2.0);
    apply_affine(drawing, &TransAffine::new_translation(dx, dy));
    Ok(())
}

/// Map `v` from `[min, min + len]` onto `[0, target]`.
///
/// Dividing before multiplying sends the far edge to exactly `target`,
/// since `len / len` is exactly one.
#[inline]
fn fit_axis(v: f64, min: f64, len: f64, target: f64) -> f64 {
    (v - min) / len * target
}

/// Fit the drawing's bounding box into `[0, w] x [0, h]`.
///
/// Without `preserve_aspect_ratio` each axis is stretched to fill the box
/// and a zero extent on either axis is an error. With it, the smaller of
/// the two axis scale factors is applied uniformly; an axis with zero
/// extent does not constrain the factor, and `center` then spreads the
/// leftover space evenly on both sides. The filled axes end exactly on
/// the box edges.
pub fn fit_view_box(drawing: &mut Drawing, opts: &FitViewBoxOptions) -> Result<()> {
    let (w, h) = image_size(opts.image_s, opts.image_w, opts.image_h)?;
    let bb = bounding_box(drawing)?;
    let length_x = bb.width();
    let length_y = bb.height();

    if !opts.preserve_aspect_ratio {
        if length_x == 0.0 {
            log::warn!("fit_view_box rejected: drawing has zero width");
            return Err(TransformError::DivisionByZero("curr_w"));
        }
        if length_y == 0.0 {
            log::warn!("fit_view_box rejected: drawing has zero height");
            return Err(TransformError::DivisionByZero("curr_h"));
        }
        log::debug!("fit_view_box: stretch {length_x}x{length_y} to {w}x{h}");
        drawing.for_each_point_mut(|p| {
            p.x = fit_axis(p.x, bb.x_min, length_x, w);
            p.y = fit_axis(p.y, bb.y_min, length_y, h);
        });
        return Ok(());
    }

    // The binding axis: its extent and the target it has to fill.
    let (len, target) = match (length_x != 0.0, length_y != 0.0) {
        (true, true) if w / length_x <= h / length_y => (length_x, w),
        (true, true) => (length_y, h),
        (true, false) => (length_x, w),
        (false, true) => (length_y, h),
        (false, false) => {
            log::warn!("fit_view_box rejected: drawing collapses to a single point");
            return Err(TransformError::DivisionByZero("extent"));
        }
    };
    log::debug!("fit_view_box: uniform scale {} into {w}x{h}", target / len);

    let (dx, dy) = if opts.center {
        (
            (w - fit_axis(length_x, 0.0, len, target)) / 2.0,
            (h - fit_axis(length_y, 0.0, len, target)) / 2.0,
        )
    } else {
        (0.0, 0.0)
    };
    drawing.for_each_point_mut(|p| {
        p.x = fit_axis(p.x, bb.x_min, len, target) + dx;
        p.y = fit_axis(p.y, bb.y_min, len, target) + dy;
    });
    Ok(())
}
