//! Affine transformation matrix.
//!
//! Every drawing transform resolves to one of these before any point is
//! touched: translation, scaling, rotation, the per-axis rotation behind
//! shearing, and any of them re-anchored at an arbitrary origin.

/// Tolerance used by `PartialEq`.
pub const AFFINE_EPSILON: f64 = 1e-14;

/// 2D affine matrix `[sx, shy, shx, sy, tx, ty]`:
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
#[derive(Debug, Clone, Copy)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    pub fn new() -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn new_custom(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx,
            ty,
        }
    }

    /// Counter-clockwise rotation by `a` radians in a y-up frame.
    pub fn new_rotation(a: f64) -> Self {
        Self::new_axis_rotation(a, a)
    }

    /// Rotation with its own angle per output axis:
    /// `x' = x*cos(ax) - y*sin(ax)`, `y' = y*cos(ay) + x*sin(ay)`.
    pub fn new_axis_rotation(ax: f64, ay: f64) -> Self {
        let (sin_x, cos_x) = ax.sin_cos();
        let (sin_y, cos_y) = ay.sin_cos();
        Self::new_custom(cos_x, sin_y, -sin_x, cos_y, 0.0, 0.0)
    }

    pub fn new_scaling(x: f64, y: f64) -> Self {
        Self::new_custom(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    pub fn new_translation(x: f64, y: f64) -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, x, y)
    }

    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.tx += x;
        self.ty += y;
        self
    }

    /// `self = self * m`: apply `self` first, then `m`.
    pub fn multiply(&mut self, m: &TransAffine) -> &mut Self {
        *self = Self {
            sx: self.sx * m.sx + self.shy * m.shx,
            shy: self.sx * m.shy + self.shy * m.sy,
            shx: self.shx * m.sx + self.sy * m.shx,
            sy: self.shx * m.shy + self.sy * m.sy,
            tx: self.tx * m.sx + self.ty * m.shx + m.tx,
            ty: self.tx * m.shy + self.ty * m.sy + m.ty,
        };
        self
    }

    /// The same transform with `(ox, oy)` as its fixed point.
    pub fn about(&self, ox: f64, oy: f64) -> TransAffine {
        if ox == 0.0 && oy == 0.0 {
            return *self;
        }
        let mut m = TransAffine::new_translation(-ox, -oy);
        m.multiply(self);
        m.translate(ox, oy);
        m
    }

    /// Determinant of the linear part.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }

    /// Invert in place. The matrix must be non-singular; see [`Self::inverted`].
    pub fn invert(&mut self) -> &mut Self {
        let d = 1.0 / self.determinant();
        let t0 = self.sy * d;
        self.sy = self.sx * d;
        self.shy = -self.shy * d;
        self.shx = -self.shx * d;
        let t4 = -self.tx * t0 - self.ty * self.shx;
        self.ty = -self.tx * self.shy - self.ty * self.sy;
        self.sx = t0;
        self.tx = t4;
        self
    }

    /// The inverse transform, or `None` for a singular matrix.
    pub fn inverted(&self) -> Option<TransAffine> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let mut m = *self;
        m.invert();
        Some(m)
    }

    #[inline]
    pub fn transform(&self, x: &mut f64, y: &mut f64) {
        let (x0, y0) = (*x, *y);
        *x = x0 * self.sx + y0 * self.shx + self.tx;
        *y = x0 * self.shy + y0 * self.sy + self.ty;
    }

    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.is_equal(&TransAffine::new(), epsilon)
    }

    pub fn is_equal(&self, m: &TransAffine, epsilon: f64) -> bool {
        [
            self.sx - m.sx,
            self.shy - m.shy,
            self.shx - m.shx,
            self.sy - m.sy,
            self.tx - m.tx,
            self.ty - m.ty,
        ]
        .iter()
        .all(|d| d.abs() <= epsilon)
    }
}

impl Default for TransAffine {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TransAffine {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other, AFFINE_EPSILON)
    }
}

impl std::ops::Mul for TransAffine {
    type Output = TransAffine;
    fn mul(mut self, rhs: TransAffine) -> TransAffine {
        self.multiply(&rhs);
        self
    }
}
