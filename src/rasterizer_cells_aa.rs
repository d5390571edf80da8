//! Anti-aliased cell rasterizer engine.
//!
//! Edges arrive as line segments in 24.8 fixed point on the sample grid.
//! Every sub-scanline (one sample-grid row) is sampled at its vertical
//! center, and each edge crossing that center becomes a cell holding the
//! exact x of the crossing and a winding `cover` of `+1` or `-1`. Read left
//! to right, the cells of one sub-scanline give the winding number along
//! it. The scanline sweep in `rasterizer_scanline_aa` turns that into
//! covered intervals.

use crate::basics::{POLY_SUBPIXEL_SCALE, POLY_SUBPIXEL_SHIFT};

const SCALE: i64 = POLY_SUBPIXEL_SCALE as i64;
const HALF: i64 = SCALE / 2;

/// One edge crossing of a sub-scanline center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAa {
    /// Crossing position, 24.8 fixed point.
    pub x: i32,
    /// Sub-scanline index.
    pub y: i32,
    /// `+1` for an edge running towards larger y, `-1` for the reverse.
    pub cover: i32,
}

/// Per-scanline slice into the sorted cell index.
#[derive(Debug, Clone, Copy, Default)]
struct SortedY {
    start: u32,
    num: u32,
}

/// Edge-to-cell conversion engine.
///
/// Cells live in a flat `Vec`; after `sort_cells()` each sub-scanline's
/// cells are reachable as a slice of indices ordered by x. Bounds are in
/// whole sample-grid cells.
pub struct RasterizerCellsAa {
    cells: Vec<CellAa>,
    sorted_cells: Vec<u32>,
    sorted_y: Vec<SortedY>,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    sorted: bool,
}

impl RasterizerCellsAa {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            sorted_cells: Vec::new(),
            sorted_y: Vec::new(),
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
            sorted: false,
        }
    }

    /// Discard all cells. Allocations are kept for reuse.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.sorted_cells.clear();
        self.sorted_y.clear();
        self.min_x = i32::MAX;
        self.min_y = i32::MAX;
        self.max_x = i32::MIN;
        self.max_y = i32::MIN;
        self.sorted = false;
    }

    #[inline]
    pub fn min_x(&self) -> i32 {
        self.min_x
    }
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_y
    }
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.max_x
    }
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    #[inline]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn sorted(&self) -> bool {
        self.sorted
    }

    /// Cell indices of sub-scanline `y`, ordered by x. Only valid after
    /// `sort_cells()` and for `min_y() <= y <= max_y()`.
    #[inline]
    pub fn scanline_cells(&self, y: i32) -> &[u32] {
        let sy = &self.sorted_y[(y - self.min_y) as usize];
        &self.sorted_cells[sy.start as usize..(sy.start + sy.num) as usize]
    }

    #[inline]
    pub fn cell(&self, idx: u32) -> &CellAa {
        &self.cells[idx as usize]
    }

    #[inline]
    fn add_cell(&mut self, x: i32, y: i32, cover: i32) {
        let ex = x >> POLY_SUBPIXEL_SHIFT;
        self.min_x = self.min_x.min(ex);
        self.max_x = self.max_x.max(ex);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.cells.push(CellAa { x, y, cover });
    }

    /// Add a line segment in 24.8 fixed-point coordinates.
    ///
    /// The segment crosses sub-scanline `k` when the center `k + 0.5` lies
    /// in `[y_top, y_bottom)`. Both directions of the same segment produce
    /// the same crossings, with opposite covers.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if y1 == y2 {
            return;
        }
        let (cover, xa, ya, xb, yb) = if y1 < y2 {
            (1, x1 as i64, y1 as i64, x2 as i64, y2 as i64)
        } else {
            (-1, x2 as i64, y2 as i64, x1 as i64, y1 as i64)
        };

        let first = (ya - HALF + SCALE - 1).div_euclid(SCALE);
        let last = (yb - HALF - 1).div_euclid(SCALE);
        let (dx, dy) = (xb - xa, yb - ya);

        for k in first..=last {
            let ys = k * SCALE + HALF;
            let x = xa + ((ys - ya) * dx).div_euclid(dy);
            self.add_cell(x as i32, k as i32, cover);
        }
    }

    /// Sort all accumulated cells by y, then x.
    pub fn sort_cells(&mut self) {
        if self.sorted || self.cells.is_empty() {
            return;
        }

        self.sorted_cells.clear();
        self.sorted_cells.resize(self.cells.len(), 0);
        self.sorted_y.clear();
        self.sorted_y
            .resize((self.max_y - self.min_y + 1) as usize, SortedY::default());

        // Histogram of cells per row, then prefix sums as start offsets.
        for cell in &self.cells {
            self.sorted_y[(cell.y - self.min_y) as usize].start += 1;
        }
        let mut start = 0u32;
        for sy in &mut self.sorted_y {
            let count = sy.start;
            sy.start = start;
            start += count;
        }

        for (i, cell) in self.cells.iter().enumerate() {
            let sy = &mut self.sorted_y[(cell.y - self.min_y) as usize];
            self.sorted_cells[(sy.start + sy.num) as usize] = i as u32;
            sy.num += 1;
        }

        let cells = &self.cells;
        for sy in &self.sorted_y {
            let row = &mut self.sorted_cells[sy.start as usize..(sy.start + sy.num) as usize];
            row.sort_unstable_by_key(|&idx| cells[idx as usize].x);
        }

        self.sorted = true;
    }
}

impl Default for RasterizerCellsAa {
    fn default() -> Self {
        Self::new()
    }
}
