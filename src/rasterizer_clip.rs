//! Viewport clipping for the scanline rasterizer.
//!
//! Segments are clipped in floating point against the clip box and only
//! then converted to 24.8 fixed point on the sample grid, so coordinates
//! far outside the raster never reach the integer cell engine.
//!
//! Parts of a segment above or below the box are dropped: rows outside the
//! box are never swept. Parts to the left or right are clamped onto the
//! nearest vertical edge of the box instead, which keeps the winding
//! contribution to the pixels inside intact.

use crate::basics::{iround, RectD, POLY_SUBPIXEL_SCALE, SAMPLE_GRID};
use crate::rasterizer_cells_aa::RasterizerCellsAa;

/// Convert a pixel coordinate to 24.8 fixed point in sample-grid cells.
#[inline]
pub fn upscale(v: f64) -> i32 {
    iround(v * (SAMPLE_GRID as u32 * POLY_SUBPIXEL_SCALE) as f64)
}

/// Clipping front end that feeds line segments into the cell engine.
pub struct RasterizerClip {
    clip_box: RectD,
    clipping: bool,
    x1: f64,
    y1: f64,
}

impl RasterizerClip {
    pub fn new() -> Self {
        Self {
            clip_box: RectD::new(0.0, 0.0, 0.0, 0.0),
            clipping: false,
            x1: 0.0,
            y1: 0.0,
        }
    }

    /// Set the clip box in pixel coordinates.
    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.clip_box = RectD::new(x1, y1, x2, y2);
        self.clip_box.normalize();
        self.clipping = true;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x1 = x;
        self.y1 = y;
    }

    pub fn line_to(&mut self, ras: &mut RasterizerCellsAa, x2: f64, y2: f64) {
        let (x1, y1) = (self.x1, self.y1);
        if self.clipping {
            self.clip_segment(ras, x1, y1, x2, y2);
        } else {
            ras.line(upscale(x1), upscale(y1), upscale(x2), upscale(y2));
        }
        self.x1 = x2;
        self.y1 = y2;
    }

    fn clip_segment(&self, ras: &mut RasterizerCellsAa, x1: f64, y1: f64, x2: f64, y2: f64) {
        let b = &self.clip_box;

        if (y1 < b.y1 && y2 < b.y1) || (y1 > b.y2 && y2 > b.y2) {
            return;
        }

        let (mut ax, mut ay, mut bx, mut by) = (x1, y1, x2, y2);
        if y1 != y2 {
            let x_at = |y: f64| x1 + (x2 - x1) * (y - y1) / (y2 - y1);
            if ay < b.y1 {
                ax = x_at(b.y1);
                ay = b.y1;
            } else if ay > b.y2 {
                ax = x_at(b.y2);
                ay = b.y2;
            }
            if by < b.y1 {
                bx = x_at(b.y1);
                by = b.y1;
            } else if by > b.y2 {
                bx = x_at(b.y2);
                by = b.y2;
            }
        }

        // Split where the segment crosses the left or right edge.
        let dx = bx - ax;
        let dy = by - ay;
        let mut cuts = [1.0f64; 3];
        let mut n = 0;
        if dx != 0.0 {
            for edge in [b.x1, b.x2] {
                let t = (edge - ax) / dx;
                if t > 0.0 && t < 1.0 {
                    cuts[n] = t;
                    n += 1;
                }
            }
        }
        if n == 2 && cuts[0] > cuts[1] {
            cuts.swap(0, 1);
        }
        cuts[n] = 1.0;
        n += 1;

        let mut px = ax.clamp(b.x1, b.x2);
        let mut py = ay;
        for &t in &cuts[..n] {
            let (cx, cy) = if t >= 1.0 {
                (bx, by)
            } else {
                (ax + dx * t, ay + dy * t)
            };
            let cx = cx.clamp(b.x1, b.x2);
            ras.line(upscale(px), upscale(py), upscale(cx), upscale(cy));
            px = cx;
            py = cy;
        }
    }
}

impl Default for RasterizerClip {
    fn default() -> Self {
        Self::new()
    }
}
