//! Bounding box and centroid of a drawing.
//!
//! Computes the axis-aligned box of any vertex source and, on top of that,
//! the drawing-level [`bounding_box`] used by viewbox fitting. A drawing
//! without points has no box: that is reported as
//! [`TransformError::EmptyDrawing`] instead of infinite sentinels.

use crate::basics::{is_stop, is_vertex, PointD, RectD, VertexSource};
use crate::drawing::Drawing;
use crate::error::{Result, TransformError};

/// Minimal axis-aligned box enclosing every point of a drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> PointD {
        PointD::new(
            (self.x_min + self.x_max) * 0.5,
            (self.y_min + self.y_max) * 0.5,
        )
    }
}

impl From<RectD> for BoundingBox {
    fn from(r: RectD) -> Self {
        Self::new(r.x1, r.x2, r.y1, r.y2)
    }
}

/// Extent of every vertex of path `path_id`, or `None` when it has none.
pub fn bounding_rect_single(vs: &mut dyn VertexSource, path_id: u32) -> Option<RectD> {
    let (mut x, mut y) = (0.0, 0.0);
    let mut rect: Option<RectD> = None;

    vs.rewind(path_id);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        if !is_vertex(cmd) {
            continue;
        }
        rect = Some(match rect {
            None => RectD::new(x, y, x, y),
            Some(r) => RectD::new(r.x1.min(x), r.y1.min(y), r.x2.max(x), r.y2.max(y)),
        });
    }
    rect
}

/// Bounding box of all points in `drawing`.
pub fn bounding_box(drawing: &Drawing) -> Result<BoundingBox> {
    bounding_rect_single(&mut drawing.vertices(), 0)
        .map(BoundingBox::from)
        .ok_or(TransformError::EmptyDrawing)
}

/// Arithmetic mean of all point coordinates (center of mass).
pub fn centroid(drawing: &Drawing) -> Result<PointD> {
    let mut n = 0usize;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for p in drawing.points() {
        sx += p.x;
        sy += p.y;
        n += 1;
    }
    if n == 0 {
        return Err(TransformError::EmptyDrawing);
    }
    Ok(PointD::new(sx / n as f64, sy / n as f64))
}
