//! Stroke outliner.
//!
//! Turns open polylines into filled polygons: one quad per segment, plus
//! caps at the two ends and a join wedge at every interior vertex. Every
//! polygon is emitted with positive orientation, so the nonzero winding
//! rule fills exactly their union.

use crate::basics::{
    is_move_to, is_stop, is_vertex, PointD, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO,
    PATH_CMD_MOVE_TO, PATH_CMD_STOP, PATH_FLAGS_CLOSE, PI,
};

/// Shape drawn at the two ends of every stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    /// Extends the stroke by half its width.
    Square,
    Round,
}

/// Shape drawn where two segments of a stroke meet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Pen geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Largest miter length, in half widths, before a miter falls back to a bevel.
    pub miter_limit: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
        }
    }
}

// ============================================================================
// Geometry helpers
// ============================================================================

/// Doubled area below which a polygon is treated as a sliver.
const MIN_AREA: f64 = 1e-12;

const MIN_DISC_VERTICES: usize = 8;
const MAX_DISC_VERTICES: usize = 1024;

/// Twice the signed area; positive for counter-clockwise in a y-up frame.
fn doubled_area(poly: &[PointD]) -> f64 {
    let n = poly.len();
    (0..n)
        .map(|i| {
            let a = poly[i];
            let b = poly[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

#[inline]
fn offset(p: PointD, dx: f64, dy: f64) -> PointD {
    PointD::new(p.x + dx, p.y + dy)
}

/// Unit direction from `a` to `b`.
#[inline]
fn direction(a: PointD, b: PointD) -> (f64, f64) {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = dx.hypot(dy);
    (dx / len, dy / len)
}

// ============================================================================
// StrokeOutline
// ============================================================================

/// Polygon generator over a polyline vertex source.
///
/// `build()` consumes the source: each `move_to` starts a new polyline and
/// `line_to` extends it. The resulting polygons are then read back through
/// [`VertexSource`], each one closed.
pub struct StrokeOutline {
    style: StrokeStyle,
    polyline: Vec<PointD>,
    vertices: Vec<PointD>,
    ends: Vec<usize>,
    out_poly: usize,
    out_vertex: usize,
}

impl StrokeOutline {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            polyline: Vec::new(),
            vertices: Vec::new(),
            ends: Vec::new(),
            out_poly: 0,
            out_vertex: 0,
        }
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Drop all generated polygons.
    pub fn reset(&mut self) {
        self.polyline.clear();
        self.vertices.clear();
        self.ends.clear();
        self.out_poly = 0;
        self.out_vertex = 0;
    }

    pub fn num_polygons(&self) -> usize {
        self.ends.len()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &[PointD]> + '_ {
        let starts = std::iter::once(0).chain(self.ends.iter().copied());
        starts
            .zip(self.ends.iter().copied())
            .map(move |(s, e)| &self.vertices[s..e])
    }

    /// Replace the current polygons with the outline of every polyline in `vs`.
    pub fn build(&mut self, vs: &mut dyn VertexSource) {
        self.reset();
        let (mut x, mut y) = (0.0, 0.0);
        vs.rewind(0);
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            if is_move_to(cmd) {
                self.flush_polyline();
                self.polyline.push(PointD::new(x, y));
            } else if is_vertex(cmd) {
                let p = PointD::new(x, y);
                // Repeated points make zero-length segments.
                if self.polyline.last() != Some(&p) {
                    self.polyline.push(p);
                }
            }
        }
        self.flush_polyline();
    }

    fn flush_polyline(&mut self) {
        let pts = std::mem::take(&mut self.polyline);
        self.outline_polyline(&pts);
        self.polyline = pts;
        self.polyline.clear();
    }

    fn outline_polyline(&mut self, pts: &[PointD]) {
        let hw = self.style.width / 2.0;
        match pts {
            [] => {}
            [p] => match self.style.line_cap {
                LineCap::Butt => {}
                LineCap::Round => self.push_disc(*p, hw),
                LineCap::Square => self.push_polygon(&[
                    offset(*p, -hw, -hw),
                    offset(*p, hw, -hw),
                    offset(*p, hw, hw),
                    offset(*p, -hw, hw),
                ]),
            },
            _ => {
                for seg in pts.windows(2) {
                    self.push_segment(seg[0], seg[1], hw);
                }
                for w in pts.windows(3) {
                    self.push_join(w[0], w[1], w[2], hw);
                }
                let n = pts.len();
                self.push_cap(pts[0], direction(pts[1], pts[0]), hw);
                self.push_cap(pts[n - 1], direction(pts[n - 2], pts[n - 1]), hw);
            }
        }
    }

    /// Append `poly` with positive orientation. Degenerate polygons are dropped.
    fn push_polygon(&mut self, poly: &[PointD]) {
        let area = doubled_area(poly);
        if area.abs() < MIN_AREA || !area.is_finite() {
            return;
        }
        if area > 0.0 {
            self.vertices.extend_from_slice(poly);
        } else {
            self.vertices.extend(poly.iter().rev());
        }
        self.ends.push(self.vertices.len());
    }

    fn push_segment(&mut self, a: PointD, b: PointD, hw: f64) {
        let (dx, dy) = direction(a, b);
        let (nx, ny) = (-dy * hw, dx * hw);
        self.push_polygon(&[
            offset(a, nx, ny),
            offset(b, nx, ny),
            offset(b, -nx, -ny),
            offset(a, -nx, -ny),
        ]);
    }

    /// Cap at `p`, where `(dx, dy)` points outward along the stroke.
    fn push_cap(&mut self, p: PointD, (dx, dy): (f64, f64), hw: f64) {
        match self.style.line_cap {
            LineCap::Butt => {}
            LineCap::Round => self.push_disc(p, hw),
            LineCap::Square => {
                let (nx, ny) = (-dy * hw, dx * hw);
                let (ex, ey) = (dx * hw, dy * hw);
                self.push_polygon(&[
                    offset(p, nx, ny),
                    offset(p, nx + ex, ny + ey),
                    offset(p, -nx + ex, -ny + ey),
                    offset(p, -nx, -ny),
                ]);
            }
        }
    }

    /// Fill the wedge left open on the outer side of the turn at `v`.
    fn push_join(&mut self, a: PointD, v: PointD, b: PointD, hw: f64) {
        let (d1x, d1y) = direction(a, v);
        let (d2x, d2y) = direction(v, b);
        let cross = d1x * d2y - d1y * d2x;
        let dot = d1x * d2x + d1y * d2y;
        if cross.abs() < 1e-12 && dot > 0.0 {
            return;
        }

        let s = if cross > 0.0 { -hw } else { hw };
        let (n1x, n1y) = (-d1y * s, d1x * s);
        let (n2x, n2y) = (-d2y * s, d2x * s);
        let p1 = offset(v, n1x, n1y);
        let p2 = offset(v, n2x, n2y);

        match self.style.line_join {
            LineJoin::Round => self.push_disc(v, hw),
            LineJoin::Bevel => self.push_polygon(&[v, p1, p2]),
            LineJoin::Miter => {
                let denom = 1.0 + dot;
                let within_limit =
                    denom > 0.0 && (2.0 / denom).sqrt() <= self.style.miter_limit;
                if within_limit {
                    let tip = offset(v, (n1x + n2x) / denom, (n1y + n2y) / denom);
                    self.push_polygon(&[v, p1, tip, p2]);
                } else {
                    self.push_polygon(&[v, p1, p2]);
                }
            }
        }
    }

    fn push_disc(&mut self, center: PointD, r: f64) {
        let da = (r / (r + 0.125)).acos() * 2.0;
        let n = ((2.0 * PI / da).ceil() as usize).clamp(MIN_DISC_VERTICES, MAX_DISC_VERTICES);
        let step = 2.0 * PI / n as f64;
        let disc: Vec<PointD> = (0..n)
            .map(|i| {
                let (sa, ca) = (i as f64 * step).sin_cos();
                offset(center, r * ca, r * sa)
            })
            .collect();
        self.push_polygon(&disc);
    }
}

impl Default for StrokeOutline {
    fn default() -> Self {
        Self::new(StrokeStyle::default())
    }
}

impl VertexSource for StrokeOutline {
    fn rewind(&mut self, _path_id: u32) {
        self.out_poly = 0;
        self.out_vertex = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let Some(&end) = self.ends.get(self.out_poly) else {
            return PATH_CMD_STOP;
        };
        let start = match self.out_poly {
            0 => 0,
            i => self.ends[i - 1],
        };
        let i = start + self.out_vertex;
        if i < end {
            let p = self.vertices[i];
            *x = p.x;
            *y = p.y;
            let cmd = if self.out_vertex == 0 {
                PATH_CMD_MOVE_TO
            } else {
                PATH_CMD_LINE_TO
            };
            self.out_vertex += 1;
            return cmd;
        }
        self.out_poly += 1;
        self.out_vertex = 0;
        PATH_CMD_END_POLY | PATH_FLAGS_CLOSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::is_close;
    use crate::drawing::Drawing;

    const EPS: f64 = 1e-9;

    fn outline(strokes: Vec<Vec<[f64; 2]>>, style: StrokeStyle) -> StrokeOutline {
        let drawing = Drawing::from(strokes);
        let mut so = StrokeOutline::new(style);
        so.build(&mut drawing.vertices());
        so
    }

    fn with_cap(cap: LineCap) -> StrokeStyle {
        StrokeStyle {
            line_cap: cap,
            ..StrokeStyle::default()
        }
    }

    fn with_join(join: LineJoin) -> StrokeStyle {
        StrokeStyle {
            line_join: join,
            ..StrokeStyle::default()
        }
    }

    #[test]
    fn test_segment_quad() {
        let so = outline(vec![vec![[0.0, 5.0], [10.0, 5.0]]], StrokeStyle::default());
        assert_eq!(so.num_polygons(), 1);
        let quad: Vec<&[PointD]> = so.polygons().collect();
        assert_eq!(quad[0].len(), 4);
        assert!((doubled_area(quad[0]) / 2.0 - 10.0).abs() < EPS);
        for p in quad[0] {
            assert!((p.y - 4.5).abs() < EPS || (p.y - 5.5).abs() < EPS);
        }
    }

    #[test]
    fn test_all_polygons_positive() {
        for join in [LineJoin::Miter, LineJoin::Round, LineJoin::Bevel] {
            let so = outline(
                vec![
                    vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 3.0]],
                    vec![[5.0, 5.0], [1.0, 9.0], [8.0, 2.0]],
                ],
                StrokeStyle {
                    line_cap: LineCap::Round,
                    ..with_join(join)
                },
            );
            assert!(so.polygons().all(|p| doubled_area(p) > 0.0));
        }
    }

    #[test]
    fn test_single_point_caps() {
        let pt = || vec![vec![[3.0, 3.0]]];
        assert_eq!(outline(pt(), with_cap(LineCap::Butt)).num_polygons(), 0);

        let round = outline(pt(), with_cap(LineCap::Round));
        assert_eq!(round.num_polygons(), 1);

        let square = outline(pt(), with_cap(LineCap::Square));
        let poly: Vec<&[PointD]> = square.polygons().collect();
        assert!((doubled_area(poly[0]) / 2.0 - 1.0).abs() < EPS);
    }

    #[test]
    fn test_repeated_points_are_skipped() {
        let so = outline(
            vec![vec![[0.0, 0.0], [0.0, 0.0], [5.0, 0.0], [5.0, 0.0]]],
            StrokeStyle::default(),
        );
        assert_eq!(so.num_polygons(), 1);

        let dot = outline(vec![vec![[1.0, 1.0], [1.0, 1.0]]], StrokeStyle::default());
        assert_eq!(dot.num_polygons(), 0);
    }

    #[test]
    fn test_huge_disc_vertex_count_is_bounded() {
        let so = outline(
            vec![vec![[0.0, 0.0]]],
            StrokeStyle {
                width: 1e12,
                ..with_cap(LineCap::Round)
            },
        );
        let disc: Vec<&[PointD]> = so.polygons().collect();
        assert_eq!(disc.len(), 1);
        assert_eq!(disc[0].len(), MAX_DISC_VERTICES);

        let small = outline(
            vec![vec![[0.0, 0.0]]],
            StrokeStyle {
                width: 0.01,
                ..with_cap(LineCap::Round)
            },
        );
        assert_eq!(small.polygons().next().map(|p| p.len()), Some(MIN_DISC_VERTICES));
    }

    #[test]
    fn test_square_cap_extends_by_half_width() {
        let so = outline(
            vec![vec![[2.0, 5.0], [8.0, 5.0]]],
            StrokeStyle {
                width: 2.0,
                ..with_cap(LineCap::Square)
            },
        );
        assert_eq!(so.num_polygons(), 3);
        let xs: Vec<f64> = so.polygons().flatten().map(|p| p.x).collect();
        let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((min - 1.0).abs() < EPS);
        assert!((max - 9.0).abs() < EPS);
    }

    #[test]
    fn test_right_angle_miter_tip() {
        let so = outline(
            vec![vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]],
            StrokeStyle::default(),
        );
        // Two segments and one join.
        assert_eq!(so.num_polygons(), 3);
        let join: Vec<&[PointD]> = so.polygons().collect();
        let tip = join[2]
            .iter()
            .any(|p| (p.x - 10.5).abs() < EPS && (p.y + 0.5).abs() < EPS);
        assert!(tip);
    }

    #[test]
    fn test_sharp_turn_falls_back_to_bevel() {
        let so = outline(
            vec![vec![[0.0, 0.0], [10.0, 0.0], [0.0, 1.0]]],
            StrokeStyle::default(),
        );
        let polys: Vec<&[PointD]> = so.polygons().collect();
        assert_eq!(polys.len(), 3);
        assert_eq!(polys[2].len(), 3);
    }

    #[test]
    fn test_collinear_vertex_has_no_join() {
        let so = outline(
            vec![vec![[0.0, 0.0], [5.0, 0.0], [10.0, 0.0]]],
            StrokeStyle::default(),
        );
        assert_eq!(so.num_polygons(), 2);
    }

    #[test]
    fn test_strokes_are_not_connected() {
        let so = outline(
            vec![vec![[0.0, 0.0], [4.0, 0.0]], vec![[4.0, 4.0], [8.0, 4.0]]],
            StrokeStyle::default(),
        );
        assert_eq!(so.num_polygons(), 2);
    }

    #[test]
    fn test_vertex_source_closes_each_polygon() {
        let mut so = outline(
            vec![vec![[0.0, 0.0], [4.0, 0.0]], vec![[4.0, 4.0], [8.0, 4.0]]],
            StrokeStyle::default(),
        );
        let (mut x, mut y) = (0.0, 0.0);
        let mut closes = 0;
        let mut moves = 0;
        so.rewind(0);
        loop {
            let cmd = so.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            if is_move_to(cmd) {
                moves += 1;
            }
            if is_close(cmd) {
                closes += 1;
            }
        }
        assert_eq!((moves, closes), (2, 2));
    }
}
