//! Per-operation configuration.
//!
//! Every field is an `Option`: an explicit `0.0` is a real value, not an
//! "unset" marker. Required fields that are `None` are reported as
//! [`TransformError::MissingOption`] and non-finite values as
//! [`TransformError::InvalidOption`], both before any point is touched.

use crate::basics::deg2rad;
use crate::error::{Result, TransformError};

// ============================================================================
// Value resolution
// ============================================================================

fn finite(name: &'static str, v: f64) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        log::warn!("rejecting non-finite option {name}={v}");
        Err(TransformError::InvalidOption { name, value: v })
    }
}

/// A field that must be present.
pub(crate) fn required(name: &'static str, v: Option<f64>) -> Result<f64> {
    match v {
        Some(v) => finite(name, v),
        None => {
            log::warn!("missing required option {name}");
            Err(TransformError::MissingOption(name))
        }
    }
}

/// A field with a default.
pub(crate) fn optional(name: &'static str, v: Option<f64>, default: f64) -> Result<f64> {
    v.map_or(Ok(default), |v| finite(name, v))
}

/// An angle given in radians or degrees; radians win when both are set.
pub(crate) fn angle(
    radians_name: &'static str,
    radians: Option<f64>,
    degrees_name: &'static str,
    degrees: Option<f64>,
) -> Result<Option<f64>> {
    match (radians, degrees) {
        (Some(r), _) => finite(radians_name, r).map(Some),
        (None, Some(d)) => finite(degrees_name, d).map(|d| Some(deg2rad(d))),
        (None, None) => Ok(None),
    }
}

/// Target box size from `image_w`/`image_h`, each falling back to `image_s`.
pub(crate) fn image_size(
    image_s: Option<f64>,
    image_w: Option<f64>,
    image_h: Option<f64>,
) -> Result<(f64, f64)> {
    let w = required("image_w", image_w.or(image_s))?;
    let h = required("image_h", image_h.or(image_s))?;
    Ok((w, h))
}

// ============================================================================
// Affine primitives
// ============================================================================

/// Translation by `(shift_x, shift_y)`. Both fields are required.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShiftOptions {
    pub shift_x: Option<f64>,
    pub shift_y: Option<f64>,
}

impl ShiftOptions {
    pub fn new(shift_x: f64, shift_y: f64) -> Self {
        Self {
            shift_x: Some(shift_x),
            shift_y: Some(shift_y),
        }
    }
}

/// Scaling by `(scale_x, scale_y)` about `(origin_x, origin_y)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScaleOptions {
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub origin_x: Option<f64>,
    pub origin_y: Option<f64>,
}

impl ScaleOptions {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            ..Self::default()
        }
    }

    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin_x = Some(x);
        self.origin_y = Some(y);
        self
    }
}

/// Scaling that maps a current extent onto a target extent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResizeOptions {
    pub target_w: Option<f64>,
    pub target_h: Option<f64>,
    pub curr_w: Option<f64>,
    pub curr_h: Option<f64>,
    pub origin_x: Option<f64>,
    pub origin_y: Option<f64>,
}

impl ResizeOptions {
    pub fn new(target_w: f64, target_h: f64, curr_w: f64, curr_h: f64) -> Self {
        Self {
            target_w: Some(target_w),
            target_h: Some(target_h),
            curr_w: Some(curr_w),
            curr_h: Some(curr_h),
            ..Self::default()
        }
    }

    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin_x = Some(x);
        self.origin_y = Some(y);
        self
    }
}

/// Rotation by a clockwise angle.
///
/// The angle is negated and fed to the standard rotation matrix:
/// `x' = x*cos(-a) - y*sin(-a)`, `y' = y*cos(-a) + x*sin(-a)`. With
/// `a = 90` degrees, `(1, 0)` goes to `(0, -1)`. That is a clockwise turn
/// when y points up, and appears counter-clockwise on a y-down raster.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotateOptions {
    pub radians: Option<f64>,
    pub degrees: Option<f64>,
    pub origin_x: Option<f64>,
    pub origin_y: Option<f64>,
}

impl RotateOptions {
    pub fn radians(radians: f64) -> Self {
        Self {
            radians: Some(radians),
            ..Self::default()
        }
    }

    pub fn degrees(degrees: f64) -> Self {
        Self {
            degrees: Some(degrees),
            ..Self::default()
        }
    }

    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin_x = Some(x);
        self.origin_y = Some(y);
        self
    }
}

/// Per-axis slant. An axis with neither angle set is left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShearOptions {
    pub radians_x: Option<f64>,
    pub degrees_x: Option<f64>,
    pub radians_y: Option<f64>,
    pub degrees_y: Option<f64>,
    pub origin_x: Option<f64>,
    pub origin_y: Option<f64>,
}

impl ShearOptions {
    pub fn radians(x: f64, y: f64) -> Self {
        Self {
            radians_x: Some(x),
            radians_y: Some(y),
            ..Self::default()
        }
    }

    pub fn degrees(x: f64, y: f64) -> Self {
        Self {
            degrees_x: Some(x),
            degrees_y: Some(y),
            ..Self::default()
        }
    }

    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin_x = Some(x);
        self.origin_y = Some(y);
        self
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Target box for center-of-mass centering.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CenterOptions {
    pub image_s: Option<f64>,
    pub image_w: Option<f64>,
    pub image_h: Option<f64>,
}

impl CenterOptions {
    /// Square target of side `s`.
    pub fn square(s: f64) -> Self {
        Self {
            image_s: Some(s),
            ..Self::default()
        }
    }

    pub fn new(w: f64, h: f64) -> Self {
        Self {
            image_w: Some(w),
            image_h: Some(h),
            ..Self::default()
        }
    }
}

/// Target box and policy for viewbox fitting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitViewBoxOptions {
    pub image_s: Option<f64>,
    pub image_w: Option<f64>,
    pub image_h: Option<f64>,
    /// Scale uniformly instead of stretching each axis to fill the box.
    pub preserve_aspect_ratio: bool,
    /// With `preserve_aspect_ratio`, center the content in the leftover space.
    pub center: bool,
}

impl FitViewBoxOptions {
    /// Square target of side `s`.
    pub fn square(s: f64) -> Self {
        Self {
            image_s: Some(s),
            ..Self::default()
        }
    }

    pub fn new(w: f64, h: f64) -> Self {
        Self {
            image_w: Some(w),
            image_h: Some(h),
            ..Self::default()
        }
    }

    pub fn preserve_aspect_ratio(mut self, flag: bool) -> Self {
        self.preserve_aspect_ratio = flag;
        self
    }

    pub fn center(mut self, flag: bool) -> Self {
        self.center = flag;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PI;

    #[test]
    fn test_required() {
        assert_eq!(required("scale_x", Some(2.0)), Ok(2.0));
        assert_eq!(
            required("scale_x", None),
            Err(TransformError::MissingOption("scale_x"))
        );
        assert!(matches!(
            required("scale_x", Some(f64::NAN)),
            Err(TransformError::InvalidOption { name: "scale_x", .. })
        ));
    }

    #[test]
    fn test_optional_zero_is_a_value() {
        assert_eq!(optional("origin_x", Some(0.0), 7.0), Ok(0.0));
        assert_eq!(optional("origin_x", None, 7.0), Ok(7.0));
    }

    #[test]
    fn test_angle_precedence() {
        assert_eq!(angle("r", Some(1.0), "d", Some(90.0)), Ok(Some(1.0)));
        let a = angle("r", None, "d", Some(90.0)).unwrap().unwrap();
        assert!((a - PI / 2.0).abs() < 1e-12);
        assert_eq!(angle("r", None, "d", None), Ok(None));
        // An explicit zero in radians is honored, not treated as unset.
        assert_eq!(angle("r", Some(0.0), "d", Some(90.0)), Ok(Some(0.0)));
    }

    #[test]
    fn test_image_size_fallback() {
        assert_eq!(image_size(Some(28.0), None, None), Ok((28.0, 28.0)));
        assert_eq!(image_size(Some(28.0), Some(10.0), None), Ok((10.0, 28.0)));
        assert_eq!(image_size(None, Some(10.0), Some(20.0)), Ok((10.0, 20.0)));
        assert_eq!(
            image_size(None, Some(10.0), None),
            Err(TransformError::MissingOption("image_h"))
        );
    }

    #[test]
    fn test_builders() {
        let s = ScaleOptions::new(2.0, 3.0).origin(1.0, 1.0);
        assert_eq!(s.origin_x, Some(1.0));
        let f = FitViewBoxOptions::square(28.0)
            .preserve_aspect_ratio(true)
            .center(true);
        assert!(f.preserve_aspect_ratio && f.center);
        assert_eq!(ShiftOptions::default().shift_x, None);
    }
}
