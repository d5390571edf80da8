//! Shared primitives.
//!
//! Fixed-point and coverage constants for the rasterizer, the point and
//! rectangle types, angle conversion, and the `VertexSource` protocol that
//! streams geometry from a drawing into the outliner and the rasterizer.

/// Round half away from zero.
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

// ============================================================================
// Fixed point and coverage
// ============================================================================

/// Fractional bits of rasterizer coordinates (24.8 fixed point).
pub const POLY_SUBPIXEL_SHIFT: u32 = 8;
pub const POLY_SUBPIXEL_SCALE: u32 = 1 << POLY_SUBPIXEL_SHIFT;
pub const POLY_SUBPIXEL_MASK: u32 = POLY_SUBPIXEL_SCALE - 1;

/// Each pixel row is sampled on `SAMPLE_GRID` sub-scanlines; along each one
/// the nonzero spans are exact in x and averaged into the pixel.
pub const SAMPLE_GRID_SHIFT: u32 = 4;
pub const SAMPLE_GRID: i32 = 1 << SAMPLE_GRID_SHIFT;

/// Per-pixel coverage, `0` (empty) to [`COVER_FULL`].
pub type CoverType = u8;
pub const COVER_FULL: CoverType = u8::MAX;

// ============================================================================
// Angles
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg / 180.0 * PI
}

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle from `(x1, y1)` to `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectD {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl RectD {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Order the corners so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            std::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            std::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }
}

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
pub const PATH_CMD_END_POLY: u32 = 0x0F;
pub const PATH_FLAGS_CLOSE: u32 = 0x40;

/// `move_to` or `line_to`.
#[inline]
pub fn is_vertex(c: u32) -> bool {
    (PATH_CMD_MOVE_TO..PATH_CMD_END_POLY).contains(&c)
}

#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

#[inline]
pub fn is_move_to(c: u32) -> bool {
    c == PATH_CMD_MOVE_TO
}

/// `end_poly` carrying the close flag.
#[inline]
pub fn is_close(c: u32) -> bool {
    c == (PATH_CMD_END_POLY | PATH_FLAGS_CLOSE)
}

/// A rewindable stream of path vertices.
///
/// `vertex` writes the next coordinate pair and returns its command;
/// `PATH_CMD_STOP` marks the end of the stream. `rewind` restarts it.
pub trait VertexSource {
    fn rewind(&mut self, path_id: u32);
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}
