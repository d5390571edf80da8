//! Unpacked scanline container.
//!
//! One coverage byte per pixel, with spans indexing into the shared cover
//! array. Rows are filled by the rasterizer sweep and drained by the
//! coverage renderer.

use crate::basics::CoverType;
use crate::rasterizer_scanline_aa::Scanline;

/// A horizontal run of pixels within a scanline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScanlineSpan {
    pub x: i32,
    pub len: i32,
    /// Offset of the run's first cover in [`ScanlineU8::covers`].
    pub cover_offset: usize,
}

/// Scanline with per-pixel u8 coverage.
///
/// `reset(min_x, max_x)` must cover every x the rasterizer can emit; x
/// values must arrive in increasing order within a row.
pub struct ScanlineU8 {
    min_x: i32,
    last_x: Option<usize>,
    y: i32,
    covers: Vec<CoverType>,
    spans: Vec<ScanlineSpan>,
}

impl ScanlineU8 {
    pub fn new() -> Self {
        Self {
            min_x: 0,
            last_x: None,
            y: 0,
            covers: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// Size the cover array for the x range `min_x..=max_x`.
    pub fn reset(&mut self, min_x: i32, max_x: i32) {
        let len = (max_x - min_x + 2).max(0) as usize;
        if len > self.covers.len() {
            self.covers.resize(len, 0);
        }
        self.min_x = min_x;
        self.last_x = None;
        self.spans.clear();
    }

    pub fn spans(&self) -> &[ScanlineSpan] {
        &self.spans
    }

    /// Covers belonging to one span.
    pub fn span_covers(&self, span: &ScanlineSpan) -> &[CoverType] {
        &self.covers[span.cover_offset..span.cover_offset + span.len as usize]
    }

    fn push_run(&mut self, x: i32, xi: usize, len: usize) {
        let contiguous = self.last_x.map_or(false, |last| last + 1 == xi);
        self.last_x = Some(xi + len - 1);
        if contiguous {
            if let Some(span) = self.spans.last_mut() {
                span.len += len as i32;
                return;
            }
        }
        self.spans.push(ScanlineSpan {
            x,
            len: len as i32,
            cover_offset: xi,
        });
    }
}

impl Scanline for ScanlineU8 {
    fn reset_spans(&mut self) {
        self.last_x = None;
        self.spans.clear();
    }

    fn add_cell(&mut self, x: i32, cover: u32) {
        let xi = (x - self.min_x) as usize;
        self.covers[xi] = cover as CoverType;
        self.push_run(x, xi, 1);
    }

    fn add_span(&mut self, x: i32, len: u32, cover: u32) {
        let xi = (x - self.min_x) as usize;
        let len = len as usize;
        self.covers[xi..xi + len].fill(cover as CoverType);
        self.push_run(x, xi, len);
    }

    fn finalize(&mut self, y: i32) {
        self.y = y;
    }

    fn num_spans(&self) -> u32 {
        self.spans.len() as u32
    }

    fn y(&self) -> i32 {
        self.y
    }
}

impl Default for ScanlineU8 {
    fn default() -> Self {
        Self::new()
    }
}
