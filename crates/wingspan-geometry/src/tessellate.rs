//! Curve discretisation helpers.

use wingspan_math::Point3;

use crate::curve::Curve;
use crate::sink::{Topology, VertexSink};

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Polyline whose chords stay within `tolerance` of the curve.
///
/// Segments are split at their parameter midpoint until the curve point there
/// lies within `tolerance` of the chord midpoint.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let mut points = vec![curve.point_at(t_min)];
    subdivide_curve(curve, t_min, t_max, tolerance, &mut points, 0);
    points
}

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    let p1 = curve.point_at(t1);
    if depth >= MAX_DEPTH {
        points.push(p1);
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let deviation = (curve.point_at(t_mid) - (p0 + p1) * 0.5).length();

    // A cubic can cross its chord at the midpoint; always split the root once.
    if deviation > tolerance || depth == 0 {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}

/// Stream `points` as a single line strip.
pub fn emit_line_strip(points: &[Point3], sink: &mut dyn VertexSink) {
    sink.begin_group(Topology::LineStrip);
    for &p in points {
        sink.vertex(p);
    }
    sink.end_group();
}
