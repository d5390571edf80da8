//! Coverage surface and the pixel grid handed to callers.
//!
//! [`CoverageBuffer`] is the rasterizer's scratch surface: one alpha byte
//! per pixel, blended source-over. [`PixelGrid`] is the row-major `[0,1]`
//! grid extracted from it at the end of a call.

use crate::basics::{CoverType, COVER_FULL};
use crate::rasterizer_scanline_aa::{RasterizerScanlineAa, Scanline};
use crate::scanline_u::ScanlineU8;

const BASE_SHIFT: u32 = 8;
const BASE_MSB: i32 = 1 << (BASE_SHIFT - 1);

/// Interpolate `p` toward `q` by `a` (all 0..=255), rounding to nearest.
#[inline]
fn lerp(p: u8, q: u8, a: u8) -> u8 {
    let t = (q as i32 - p as i32) * a as i32 + BASE_MSB - (p > q) as i32;
    (p as i32 + (((t >> BASE_SHIFT) + t) >> BASE_SHIFT)) as u8
}

// ============================================================================
// CoverageBuffer
// ============================================================================

/// Single-channel alpha surface used during one rasterization.
pub struct CoverageBuffer {
    width: usize,
    height: usize,
    alpha: Vec<u8>,
}

impl CoverageBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width * height],
        }
    }

    /// Resize to `width x height` and clear every pixel.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.alpha.clear();
        self.alpha.resize(width * height, 0);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.alpha
    }

    /// Source-over blend of an opaque source with per-pixel `covers`
    /// starting at `(x, y)`. Pixels outside the surface are skipped.
    pub fn blend_solid_hspan(&mut self, x: i32, y: i32, covers: &[CoverType]) {
        if y < 0 || y as usize >= self.height {
            return;
        }
        let mut x = x;
        let mut covers = covers;
        if x < 0 {
            let skip = (-(x as i64)) as usize;
            if skip >= covers.len() {
                return;
            }
            covers = &covers[skip..];
            x = 0;
        }
        let x = x as usize;
        if x >= self.width {
            return;
        }
        let len = covers.len().min(self.width - x);

        let start = y as usize * self.width + x;
        let row = &mut self.alpha[start..start + len];
        for (dst, &cover) in row.iter_mut().zip(covers) {
            if cover == COVER_FULL {
                *dst = COVER_FULL;
            } else if cover > 0 {
                *dst = lerp(*dst, COVER_FULL, cover);
            }
        }
    }

    /// Sweep every scanline of `ras` into this buffer.
    pub fn render_scanlines(&mut self, ras: &mut RasterizerScanlineAa, sl: &mut ScanlineU8) {
        if !ras.rewind_scanlines() {
            return;
        }
        sl.reset(ras.min_x(), ras.max_x());
        while ras.sweep_scanline(sl) {
            let y = sl.y();
            for span in sl.spans() {
                self.blend_solid_hspan(span.x, y, sl.span_covers(span));
            }
        }
    }
}

// ============================================================================
// PixelGrid
// ============================================================================

/// Row-major grid of `width * height` coverage values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl PixelGrid {
    /// Extract `alpha / 255` for every pixel of `buf`.
    pub fn from_coverage(buf: &CoverageBuffer) -> Self {
        Self {
            width: buf.width(),
            height: buf.height(),
            values: buf
                .as_bytes()
                .iter()
                .map(|&a| a as f64 / COVER_FULL as f64)
                .collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at column `x`, row `y`; `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.values[y * self.width + x])
        } else {
            None
        }
    }

    /// Row `y`, or `None` outside the grid.
    pub fn row(&self, y: usize) -> Option<&[f64]> {
        if y < self.height {
            Some(&self.values[y * self.width..(y + 1) * self.width])
        } else {
            None
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Back to 8-bit gray, rounding to nearest.
    pub fn to_gray8(&self) -> Vec<u8> {
        self.values
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}
