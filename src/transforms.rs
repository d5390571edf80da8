//! Affine transform engine.
//!
//! Stateless, origin-relative operations on a drawing: shift, scale,
//! resize, rotate and shear. Each one resolves its options into a
//! [`TransAffine`] first and only then walks the points, so a rejected
//! call leaves the drawing untouched.

use crate::drawing::Drawing;
use crate::error::{Result, TransformError};
use crate::options::{
    angle, optional, required, ResizeOptions, RotateOptions, ScaleOptions, ShearOptions,
    ShiftOptions,
};
use crate::trans_affine::TransAffine;

/// Apply `m` to every point of every stroke, in place. An exact identity
/// leaves the points untouched.
pub fn apply_affine(drawing: &mut Drawing, m: &TransAffine) {
    if m.is_identity(0.0) {
        return;
    }
    drawing.for_each_point_mut(|p| m.transform(&mut p.x, &mut p.y));
}

// ============================================================================
// Matrix construction
// ============================================================================

pub fn shift_matrix(opts: &ShiftOptions) -> Result<TransAffine> {
    let dx = required("shift_x", opts.shift_x)?;
    let dy = required("shift_y", opts.shift_y)?;
    Ok(TransAffine::new_translation(dx, dy))
}

pub fn scale_matrix(opts: &ScaleOptions) -> Result<TransAffine> {
    let sx = required("scale_x", opts.scale_x)?;
    let sy = required("scale_y", opts.scale_y)?;
    let ox = optional("origin_x", opts.origin_x, 0.0)?;
    let oy = optional("origin_y", opts.origin_y, 0.0)?;
    Ok(TransAffine::new_scaling(sx, sy).about(ox, oy))
}

pub fn resize_matrix(opts: &ResizeOptions) -> Result<TransAffine> {
    let target_w = required("target_w", opts.target_w)?;
    let target_h = required("target_h", opts.target_h)?;
    let curr_w = required("curr_w", opts.curr_w)?;
    let curr_h = required("curr_h", opts.curr_h)?;
    if curr_w == 0.0 {
        log::warn!("resize rejected: current width is zero");
        return Err(TransformError::DivisionByZero("curr_w"));
    }
    if curr_h == 0.0 {
        log::warn!("resize rejected: current height is zero");
        return Err(TransformError::DivisionByZero("curr_h"));
    }
    scale_matrix(&ScaleOptions {
        scale_x: Some(target_w / curr_w),
        scale_y: Some(target_h / curr_h),
        origin_x: opts.origin_x,
        origin_y: opts.origin_y,
    })
}

/// See [`RotateOptions`] for the sign convention.
pub fn rotate_matrix(opts: &RotateOptions) -> Result<TransAffine> {
    let theta = angle("radians", opts.radians, "degrees", opts.degrees)?
        .ok_or(TransformError::MissingOption("radians"))?;
    let ox = optional("origin_x", opts.origin_x, 0.0)?;
    let oy = optional("origin_y", opts.origin_y, 0.0)?;
    Ok(TransAffine::new_rotation(-theta).about(ox, oy))
}

/// Each output axis gets its own negated angle in the rotation formula:
/// `x' = x*cos(-tx) - y*sin(-tx)`, `y' = y*cos(-ty) + x*sin(-ty)`.
/// This is not a textbook shear matrix.
pub fn shear_matrix(opts: &ShearOptions) -> Result<TransAffine> {
    let tx = angle("radians_x", opts.radians_x, "degrees_x", opts.degrees_x)?.unwrap_or(0.0);
    let ty = angle("radians_y", opts.radians_y, "degrees_y", opts.degrees_y)?.unwrap_or(0.0);
    let ox = optional("origin_x", opts.origin_x, 0.0)?;
    let oy = optional("origin_y", opts.origin_y, 0.0)?;
    Ok(TransAffine::new_axis_rotation(-tx, -ty).about(ox, oy))
}

// ============================================================================
// Operations
// ============================================================================

/// Move every point right by `shift_x` and down by `shift_y`.
pub fn shift(drawing: &mut Drawing, opts: &ShiftOptions) -> Result<()> {
    let m = shift_matrix(opts)?;
    log::debug!("shift by ({}, {})", m.tx, m.ty);
    apply_affine(drawing, &m);
    Ok(())
}

/// Stretch the drawing by `(scale_x, scale_y)` about the origin.
pub fn scale(drawing: &mut Drawing, opts: &ScaleOptions) -> Result<()> {
    let m = scale_matrix(opts)?;
    log::debug!("scale {:?}", opts);
    apply_affine(drawing, &m);
    Ok(())
}

/// Scale so an extent of `(curr_w, curr_h)` becomes `(target_w, target_h)`.
pub fn resize(drawing: &mut Drawing, opts: &ResizeOptions) -> Result<()> {
    let m = resize_matrix(opts)?;
    log::debug!("resize {:?}", opts);
    apply_affine(drawing, &m);
    Ok(())
}

/// Rotate about the origin.
pub fn rotate(drawing: &mut Drawing, opts: &RotateOptions) -> Result<()> {
    let m = rotate_matrix(opts)?;
    log::debug!("rotate {:?}", opts);
    apply_affine(drawing, &m);
    Ok(())
}

/// Slant each axis by its own angle about the origin.
pub fn shear(drawing: &mut Drawing, opts: &ShearOptions) -> Result<()> {
    let m = shear_matrix(opts)?;
    log::debug!("shear {:?}", opts);
    apply_affine(drawing, &m);
    Ok(())
}
