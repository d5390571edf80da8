//! Drawing model: points, strokes, and the drawing that owns them.
//!
//! A drawing is the unit every pipeline stage works on. Transforms take it
//! by `&mut` and relocate points in place; the rasterizer reads it through
//! [`DrawingVertices`], which presents each stroke as an open polyline
//! (`move_to` followed by `line_to`s).

use crate::basics::{PointD, VertexSource, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP};

/// A single drawing coordinate.
pub type Point = PointD;

/// One continuous pen path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a pen sample.
    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push(Point::new(x, y));
    }
}

/// An ordered collection of strokes forming one freehand figure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drawing {
    pub strokes: Vec<Stroke>,
}

impl Drawing {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    /// Build a drawing from nested `[x, y]` arrays, one inner vector per stroke.
    pub fn from_arrays(strokes: &[Vec<[f64; 2]>]) -> Self {
        Self {
            strokes: strokes
                .iter()
                .map(|s| Stroke::from_points(s.iter().map(|p| Point::new(p[0], p[1])).collect()))
                .collect(),
        }
    }

    /// Inverse of [`Drawing::from_arrays`].
    pub fn to_arrays(&self) -> Vec<Vec<[f64; 2]>> {
        self.strokes
            .iter()
            .map(|s| s.points.iter().map(|p| [p.x, p.y]).collect())
            .collect()
    }

    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Total number of points across all strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    /// `true` when no stroke holds a point.
    pub fn is_empty(&self) -> bool {
        self.strokes.iter().all(Stroke::is_empty)
    }

    /// Iterate every point in stroke order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.strokes.iter().flat_map(|s| s.points.iter())
    }

    /// Visit every point mutably, in stroke order.
    pub fn for_each_point_mut<F: FnMut(&mut Point)>(&mut self, mut f: F) {
        for stroke in &mut self.strokes {
            for p in &mut stroke.points {
                f(p);
            }
        }
    }

    /// Borrow the drawing as a vertex source.
    pub fn vertices(&self) -> DrawingVertices<'_> {
        DrawingVertices::new(self)
    }
}

impl From<Vec<Vec<[f64; 2]>>> for Drawing {
    fn from(strokes: Vec<Vec<[f64; 2]>>) -> Self {
        Self::from_arrays(&strokes)
    }
}

impl From<&Drawing> for Vec<Vec<[f64; 2]>> {
    fn from(d: &Drawing) -> Self {
        d.to_arrays()
    }
}

/// Vertex source over a borrowed drawing.
///
/// Emits `move_to` at the first point of each non-empty stroke and
/// `line_to` for the rest. Strokes are never closed or joined to each other.
/// The path id passed to `rewind` is ignored; all strokes form path 0.
pub struct DrawingVertices<'a> {
    drawing: &'a Drawing,
    stroke: usize,
    index: usize,
}

impl<'a> DrawingVertices<'a> {
    pub fn new(drawing: &'a Drawing) -> Self {
        Self {
            drawing,
            stroke: 0,
            index: 0,
        }
    }
}

impl VertexSource for DrawingVertices<'_> {
    fn rewind(&mut self, _path_id: u32) {
        self.stroke = 0;
        self.index = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        while let Some(stroke) = self.drawing.strokes.get(self.stroke) {
            if let Some(p) = stroke.points.get(self.index) {
                *x = p.x;
                *y = p.y;
                let cmd = if self.index == 0 {
                    PATH_CMD_MOVE_TO
                } else {
                    PATH_CMD_LINE_TO
                };
                self.index += 1;
                return cmd;
            }
            self.stroke += 1;
            self.index = 0;
        }
        PATH_CMD_STOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(vs: &mut dyn VertexSource) -> Vec<(f64, f64, u32)> {
        let mut out = Vec::new();
        let (mut x, mut y) = (0.0, 0.0);
        vs.rewind(0);
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if cmd == PATH_CMD_STOP {
                break;
            }
            out.push((x, y, cmd));
        }
        out
    }

    #[test]
    fn test_from_arrays_roundtrip_shape() {
        let raw = vec![vec![[1.0, 2.0], [3.0, 4.0]], vec![[0.0, 0.0]]];
        let d = Drawing::from_arrays(&raw);
        assert_eq!(d.stroke_count(), 2);
        assert_eq!(d.point_count(), 3);
        assert_eq!(d.to_arrays(), raw);
    }

    #[test]
    fn test_incremental_build() {
        let mut d = Drawing::new();
        let mut s = Stroke::default();
        s.push(1.0, 2.0);
        s.push(3.0, 4.0);
        d.push_stroke(s);
        d.push_stroke(Stroke::from_points(vec![Point::new(0.0, 0.0)]));
        assert_eq!(d, Drawing::from(vec![vec![[1.0, 2.0], [3.0, 4.0]], vec![[0.0, 0.0]]]));
        assert_eq!(d.point_count(), 3);
    }

    #[test]
    fn test_empty_detection() {
        assert!(Drawing::new().is_empty());
        let raw: Vec<Vec<[f64; 2]>> = vec![vec![], vec![]];
        let d = Drawing::from(raw);
        assert!(d.is_empty());
        assert_eq!(d.stroke_count(), 2);
        let raw: Vec<Vec<[f64; 2]>> = vec![vec![], vec![[1.0, 1.0]]];
        let d = Drawing::from(raw);
        assert!(!d.is_empty());
    }

    #[test]
    fn test_for_each_point_mut() {
        let mut d = Drawing::from(vec![vec![[1.0, 1.0], [2.0, 2.0]], vec![[3.0, 3.0]]]);
        d.for_each_point_mut(|p| p.x *= 10.0);
        let xs: Vec<f64> = d.points().map(|p| p.x).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_vertices_commands() {
        let d = Drawing::from(vec![
            vec![[0.0, 0.0], [1.0, 0.0]],
            vec![],
            vec![[5.0, 5.0], [6.0, 6.0], [7.0, 5.0]],
        ]);
        let v = collect(&mut d.vertices());
        assert_eq!(
            v,
            vec![
                (0.0, 0.0, PATH_CMD_MOVE_TO),
                (1.0, 0.0, PATH_CMD_LINE_TO),
                (5.0, 5.0, PATH_CMD_MOVE_TO),
                (6.0, 6.0, PATH_CMD_LINE_TO),
                (7.0, 5.0, PATH_CMD_LINE_TO),
            ]
        );
    }

    #[test]
    fn test_vertices_rewind() {
        let d = Drawing::from(vec![vec![[2.0, 3.0]]]);
        let mut vs = d.vertices();
        assert_eq!(collect(&mut vs).len(), 1);
        assert_eq!(collect(&mut vs).len(), 1);
    }
}
