//! Polygon scanline rasterizer with anti-aliasing.
//!
//! Accepts closed contours (move_to/line_to/close) and samples them on
//! `SAMPLE_GRID` sub-scanlines per pixel row. Along each sub-scanline the
//! edge crossings give the nonzero winding number, and the spans where it
//! is nonzero are added to their pixels with exact x extents. Overlapping
//! or coincident contours therefore add up to their union. A pixel row is
//! swept by averaging its sub-scanlines into coverage values (0..=255).

use crate::basics::{
    is_close, is_move_to, is_stop, is_vertex, VertexSource, POLY_SUBPIXEL_SHIFT,
    SAMPLE_GRID, SAMPLE_GRID_SHIFT,
};
use crate::rasterizer_cells_aa::RasterizerCellsAa;
use crate::rasterizer_clip::RasterizerClip;

const AA_MASK: u32 = 255;

/// Fixed-point x units per pixel.
const PIXEL_SHIFT: u32 = POLY_SUBPIXEL_SHIFT + SAMPLE_GRID_SHIFT;

/// Receiver for the spans produced by [`RasterizerScanlineAa::sweep_scanline`].
pub trait Scanline {
    /// Clear span data before a new row.
    fn reset_spans(&mut self);

    /// A single pixel at `x` with coverage `cover`.
    fn add_cell(&mut self, x: i32, cover: u32);

    /// `len` pixels starting at `x`, all with coverage `cover`.
    fn add_span(&mut self, x: i32, len: u32, cover: u32);

    fn finalize(&mut self, y: i32);

    fn num_spans(&self) -> u32;

    fn y(&self) -> i32;
}

/// Pixel coverage from its summed span length over all sub-scanlines.
#[inline]
fn pixel_alpha(sum: u32) -> u32 {
    let shift = PIXEL_SHIFT + SAMPLE_GRID_SHIFT;
    let alpha = (sum as u64 * AA_MASK as u64 + (1 << (shift - 1))) >> shift;
    (alpha as u32).min(AA_MASK)
}

/// Per-pixel covered length for the row being swept.
#[derive(Default)]
struct RowCoverage {
    min_x: i32,
    sums: Vec<u32>,
}

impl RowCoverage {
    /// Clear and size for pixels `min_x..=max_x`.
    fn reset(&mut self, min_x: i32, max_x: i32) {
        self.min_x = min_x;
        self.sums.clear();
        self.sums.resize((max_x - min_x + 1).max(0) as usize, 0);
    }

    /// Add the span `[x1, x2)`, in fixed point, to the pixels it touches.
    fn add(&mut self, x1: i32, x2: i32) {
        let mut x = x1;
        while x < x2 {
            let px = x >> PIXEL_SHIFT;
            let next = ((px + 1) << PIXEL_SHIFT).min(x2);
            if let Some(sum) = self.sums.get_mut((px - self.min_x) as usize) {
                *sum += (next - x) as u32;
            }
            x = next;
        }
    }

    /// Accumulate the nonzero spans of sub-scanline `y`.
    fn add_cells(&mut self, outline: &RasterizerCellsAa, y: i32) {
        let mut winding = 0;
        let mut start = 0;
        for &idx in outline.scanline_cells(y) {
            let cell = outline.cell(idx);
            let was = winding;
            winding += cell.cover;
            if was == 0 && winding != 0 {
                start = cell.x;
            } else if was != 0 && winding == 0 {
                self.add(start, cell.x);
            }
        }
    }

    /// Emit non-zero pixels as runs of equal coverage.
    fn emit<SL: Scanline>(&self, sl: &mut SL) {
        let mut i = 0;
        while i < self.sums.len() {
            let alpha = pixel_alpha(self.sums[i]);
            let start = i;
            i += 1;
            if alpha == 0 {
                continue;
            }
            while i < self.sums.len() && pixel_alpha(self.sums[i]) == alpha {
                i += 1;
            }
            let x = self.min_x + start as i32;
            match i - start {
                1 => sl.add_cell(x, alpha),
                len => sl.add_span(x, len as u32, alpha),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
    Closed,
}

/// Usage:
/// 1. `clip_box()` to bound the output
/// 2. contours via `move_to_d()` / `line_to_d()` or `add_path()`
/// 3. `rewind_scanlines()`, then `sweep_scanline()` until it returns `false`
///
/// Every contour is closed implicitly before the next `move_to_d()` and
/// before the sweep starts. Coordinates and bounds are in pixels.
pub struct RasterizerScanlineAa {
    outline: RasterizerCellsAa,
    clipper: RasterizerClip,
    row: RowCoverage,
    start_x: f64,
    start_y: f64,
    status: Status,
    scan_y: i32,
}

impl RasterizerScanlineAa {
    pub fn new() -> Self {
        Self {
            outline: RasterizerCellsAa::new(),
            clipper: RasterizerClip::new(),
            row: RowCoverage::default(),
            start_x: 0.0,
            start_y: 0.0,
            status: Status::Initial,
            scan_y: 0,
        }
    }

    /// Discard all accumulated geometry. The clip box is kept.
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = Status::Initial;
    }

    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.reset();
        self.clipper.clip_box(x1, y1, x2, y2);
    }

    // ========================================================================
    // Path building
    // ========================================================================

    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.clipper
                .line_to(&mut self.outline, self.start_x, self.start_y);
            self.status = Status::Closed;
        }
    }

    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.close_polygon();
        self.start_x = x;
        self.start_y = y;
        self.clipper.move_to(x, y);
        self.status = Status::MoveTo;
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        self.clipper.line_to(&mut self.outline, x, y);
        self.status = Status::LineTo;
    }

    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        if is_move_to(cmd) {
            self.move_to_d(x, y);
        } else if is_vertex(cmd) {
            self.line_to_d(x, y);
        } else if is_close(cmd) {
            self.close_polygon();
        }
    }

    /// Feed every vertex of `vs` (path `path_id`) into the rasterizer.
    pub fn add_path(&mut self, vs: &mut dyn VertexSource, path_id: u32) {
        let (mut x, mut y) = (0.0, 0.0);
        vs.rewind(path_id);
        if self.outline.sorted() {
            self.reset();
        }
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            self.add_vertex(x, y, cmd);
        }
    }

    #[inline]
    pub fn min_x(&self) -> i32 {
        self.outline.min_x() >> SAMPLE_GRID_SHIFT
    }
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.outline.min_y() >> SAMPLE_GRID_SHIFT
    }
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.outline.max_x() >> SAMPLE_GRID_SHIFT
    }
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.outline.max_y() >> SAMPLE_GRID_SHIFT
    }

    // ========================================================================
    // Scanline sweeping
    // ========================================================================

    /// Close the open contour and sort cells. `false` means nothing to render.
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.outline.sort_cells();
        if self.outline.total_cells() == 0 {
            return false;
        }
        self.scan_y = self.min_y();
        true
    }

    /// Emit the next non-empty pixel row into `sl`. `false` once all rows are done.
    pub fn sweep_scanline<SL: Scanline>(&mut self, sl: &mut SL) -> bool {
        loop {
            if self.scan_y > self.max_y() {
                return false;
            }
            let (min_x, max_x) = (self.min_x(), self.max_x());
            self.row.reset(min_x, max_x);
            let first = (self.scan_y << SAMPLE_GRID_SHIFT).max(self.outline.min_y());
            let last = ((self.scan_y << SAMPLE_GRID_SHIFT) + SAMPLE_GRID - 1)
                .min(self.outline.max_y());
            for y in first..=last {
                self.row.add_cells(&self.outline, y);
            }

            sl.reset_spans();
            self.row.emit(sl);
            if sl.num_spans() > 0 {
                break;
            }
            self.scan_y += 1;
        }

        sl.finalize(self.scan_y);
        self.scan_y += 1;
        true
    }
}

impl Default for RasterizerScanlineAa {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every row as `(y, [(x, cover)])` with spans expanded.
    #[derive(Default)]
    struct Recorder {
        y: i32,
        pixels: Vec<(i32, u32)>,
        spans: u32,
    }

    impl Scanline for Recorder {
        fn reset_spans(&mut self) {
            self.pixels.clear();
            self.spans = 0;
        }
        fn add_cell(&mut self, x: i32, cover: u32) {
            self.pixels.push((x, cover));
            self.spans += 1;
        }
        fn add_span(&mut self, x: i32, len: u32, cover: u32) {
            for i in 0..len as i32 {
                self.pixels.push((x + i, cover));
            }
            self.spans += 1;
        }
        fn finalize(&mut self, y: i32) {
            self.y = y;
        }
        fn num_spans(&self) -> u32 {
            self.spans
        }
        fn y(&self) -> i32 {
            self.y
        }
    }

    fn rect(ras: &mut RasterizerScanlineAa, x1: f64, y1: f64, x2: f64, y2: f64) {
        ras.move_to_d(x1, y1);
        ras.line_to_d(x2, y1);
        ras.line_to_d(x2, y2);
        ras.line_to_d(x1, y2);
    }

    fn sweep(ras: &mut RasterizerScanlineAa) -> Vec<(i32, Vec<(i32, u32)>)> {
        let mut rows = Vec::new();
        let mut sl = Recorder::default();
        if ras.rewind_scanlines() {
            while ras.sweep_scanline(&mut sl) {
                rows.push((sl.y(), sl.pixels.clone()));
            }
        }
        rows
    }

    #[test]
    fn test_pixel_alpha() {
        let full = 1 << (PIXEL_SHIFT + SAMPLE_GRID_SHIFT);
        assert_eq!(pixel_alpha(0), 0);
        assert_eq!(pixel_alpha(full), 255);
        assert_eq!(pixel_alpha(full / 2), 128);
        assert_eq!(pixel_alpha(full / 4 * 3), 191);
    }

    #[test]
    fn test_row_coverage_splits_span_across_pixels() {
        let unit = 1 << PIXEL_SHIFT;
        let mut row = RowCoverage::default();
        row.reset(0, 3);
        row.add(unit / 2, 2 * unit + unit / 4);
        assert_eq!(row.sums, vec![unit as u32 / 2, unit as u32, unit as u32 / 4, 0]);
    }

    #[test]
    fn test_empty_has_no_scanlines() {
        let mut ras = RasterizerScanlineAa::new();
        assert!(!ras.rewind_scanlines());
    }

    #[test]
    fn test_pixel_aligned_rect_is_fully_covered() {
        let mut ras = RasterizerScanlineAa::new();
        rect(&mut ras, 2.0, 1.0, 5.0, 3.0);
        let rows = sweep(&mut ras);
        assert_eq!(rows.len(), 2);
        for (i, (y, pixels)) in rows.iter().enumerate() {
            assert_eq!(*y, 1 + i as i32);
            assert_eq!(pixels, &vec![(2, 255), (3, 255), (4, 255)]);
        }
    }

    #[test]
    fn test_half_pixel_edge() {
        let mut ras = RasterizerScanlineAa::new();
        rect(&mut ras, 0.0, 0.0, 1.5, 1.0);
        let rows = sweep(&mut ras);
        assert_eq!(rows, vec![(0, vec![(0, 255), (1, 128)])]);
    }

    #[test]
    fn test_nonzero_overlap_does_not_exceed_full() {
        let mut ras = RasterizerScanlineAa::new();
        rect(&mut ras, 0.0, 0.0, 4.0, 1.0);
        rect(&mut ras, 2.0, 0.0, 6.0, 1.0);
        let rows = sweep(&mut ras);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].1.iter().all(|&(_, c)| c == 255));
        assert_eq!(rows[0].1.len(), 6);
    }

    #[test]
    fn test_coincident_contours_count_once() {
        let mut once = RasterizerScanlineAa::new();
        rect(&mut once, 0.0, 0.5, 3.0, 1.5);
        let expected = sweep(&mut once);
        assert_eq!(
            expected,
            vec![
                (0, vec![(0, 128), (1, 128), (2, 128)]),
                (1, vec![(0, 128), (1, 128), (2, 128)]),
            ]
        );

        let mut twice = RasterizerScanlineAa::new();
        rect(&mut twice, 0.0, 0.5, 3.0, 1.5);
        rect(&mut twice, 0.0, 0.5, 3.0, 1.5);
        assert_eq!(sweep(&mut twice), expected);
    }

    #[test]
    fn test_overlap_inside_partial_pixel_is_union() {
        // Two rects sharing the left half of column 1; the union covers
        // half of it.
        let mut ras = RasterizerScanlineAa::new();
        rect(&mut ras, 0.0, 0.0, 1.5, 1.0);
        rect(&mut ras, 0.5, 0.0, 1.5, 1.0);
        let rows = sweep(&mut ras);
        assert_eq!(rows, vec![(0, vec![(0, 255), (1, 128)])]);
    }

    #[test]
    fn test_clip_box_bounds_output() {
        let mut ras = RasterizerScanlineAa::new();
        ras.clip_box(0.0, 0.0, 4.0, 4.0);
        rect(&mut ras, -10.0, -10.0, 10.0, 2.0);
        let rows = sweep(&mut ras);
        assert_eq!(rows.len(), 2);
        for (_, pixels) in &rows {
            assert!(pixels.iter().all(|&(x, c)| (0..4).contains(&x) && c == 255));
            assert_eq!(pixels.len(), 4);
        }
    }
}
