//! Drawing rasterizer.
//!
//! Strokes each polyline of a [`Drawing`] with a canvas-style pen onto a
//! `width x height` coverage surface and returns the coverage as a
//! [`PixelGrid`] of `[0,1]` values.

use crate::drawing::Drawing;
use crate::error::{Result, TransformError};
use crate::pixel_grid::{CoverageBuffer, PixelGrid};
use crate::rasterizer_scanline_aa::RasterizerScanlineAa;
use crate::scanline_u::ScanlineU8;
use crate::stroke_outline::{LineCap, LineJoin, StrokeOutline, StrokeStyle};

/// Raster size and pen settings.
///
/// The pen defaults match a 2D canvas context: 1px wide, butt caps, miter
/// joins with a limit of 10.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub width: i32,
    pub height: i32,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
}

impl RasterOptions {
    pub fn new(width: i32, height: i32) -> Self {
        let pen = StrokeStyle::default();
        Self {
            width,
            height,
            line_width: pen.width,
            line_cap: pen.line_cap,
            line_join: pen.line_join,
            miter_limit: pen.miter_limit,
        }
    }

    pub fn line_width(mut self, w: f64) -> Self {
        self.line_width = w;
        self
    }

    pub fn line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    pub fn line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    pub fn miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }

    /// Check the settings and return the pixel size and pen.
    fn validate(&self) -> Result<(usize, usize, StrokeStyle)> {
        if self.width <= 0 || self.height <= 0 {
            log::warn!(
                "rasterize rejected: dimensions {}x{}",
                self.width,
                self.height
            );
            return Err(TransformError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            log::warn!("rasterize rejected: line_width={}", self.line_width);
            return Err(TransformError::InvalidOption {
                name: "line_width",
                value: self.line_width,
            });
        }
        if !(self.miter_limit.is_finite() && self.miter_limit >= 1.0) {
            log::warn!("rasterize rejected: miter_limit={}", self.miter_limit);
            return Err(TransformError::InvalidOption {
                name: "miter_limit",
                value: self.miter_limit,
            });
        }
        let pen = StrokeStyle {
            width: self.line_width,
            line_cap: self.line_cap,
            line_join: self.line_join,
            miter_limit: self.miter_limit,
        };
        Ok((self.width as usize, self.height as usize, pen))
    }
}

impl Default for RasterOptions {
    /// Zero-sized; rendering with it fails until a size is set.
    fn default() -> Self {
        Self::new(0, 0)
    }
}

fn check_finite(drawing: &Drawing) -> Result<()> {
    for (stroke, s) in drawing.strokes.iter().enumerate() {
        if let Some(index) = s
            .points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            log::warn!("rasterize rejected: non-finite point {index} in stroke {stroke}");
            return Err(TransformError::NonFinitePoint { stroke, index });
        }
    }
    Ok(())
}

/// Reusable rasterization context.
///
/// Holds the outliner, cell store, scanline and coverage surface between
/// calls so their allocations are reused. Every [`Rasterizer::render`]
/// starts from a cleared state.
pub struct Rasterizer {
    outline: StrokeOutline,
    ras: RasterizerScanlineAa,
    sl: ScanlineU8,
    surface: CoverageBuffer,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            outline: StrokeOutline::default(),
            ras: RasterizerScanlineAa::new(),
            sl: ScanlineU8::new(),
            surface: CoverageBuffer::new(0, 0),
        }
    }

    /// Render `drawing` and return its coverage grid.
    ///
    /// Nothing is drawn unless the options and every point are valid.
    pub fn render(&mut self, drawing: &Drawing, opts: &RasterOptions) -> Result<PixelGrid> {
        let (w, h, pen) = opts.validate()?;
        check_finite(drawing)?;

        log::debug!(
            "rasterize: {} strokes, {} points into {w}x{h}, line_width {}",
            drawing.stroke_count(),
            drawing.point_count(),
            pen.width
        );

        self.surface.reset(w, h);
        self.ras.reset();
        self.ras.clip_box(0.0, 0.0, w as f64, h as f64);

        self.outline.set_style(pen);
        self.outline.build(&mut drawing.vertices());
        self.ras.add_path(&mut self.outline, 0);
        self.surface.render_scanlines(&mut self.ras, &mut self.sl);

        Ok(PixelGrid::from_coverage(&self.surface))
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rasterize `drawing` with a fresh context.
pub fn rasterize(drawing: &Drawing, opts: &RasterOptions) -> Result<PixelGrid> {
    Rasterizer::new().render(drawing, opts)
}
