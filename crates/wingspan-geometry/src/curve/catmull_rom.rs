//! Four-point cubic segments in the Catmull-Rom family.

use std::iter::FusedIterator;

use wingspan_math::{Point3, Vector3};

use super::Curve;

/// Number of line segments a four-point window is drawn with.
pub const DEFAULT_SAMPLES: usize = 20;

/// The cubic segment spanned by the two middle points of a four-point window.
///
/// Per axis:
/// `x(t) = 0.5 * (2*p1 + t*(p2 - p0) + t^2*(2*p0 - 5*p1 + 4*p2 - p3) + t^3*(-p0 + 3*p1 - 3*p2 + p3))`
///
/// The segment passes through `p1` at `t = 0` and `p2` at `t = 1`; neighbouring
/// windows that share three points meet with matching tangents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatmullRomSegment {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CatmullRomSegment {
    pub fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    pub fn from_window(points: [Point3; 4]) -> Self {
        let [p0, p1, p2, p3] = points;
        Self { p0, p1, p2, p3 }
    }

    /// Polynomial coefficients `(c0, c1, c2, c3)` such that the point is
    /// `0.5 * (c0 + c1*t + c2*t^2 + c3*t^3)`.
    fn coefficients(&self) -> (Vector3, Vector3, Vector3, Vector3) {
        let (p0, p1, p2, p3) = (self.p0, self.p1, self.p2, self.p3);
        (
            2.0 * p1,
            p2 - p0,
            2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3,
            -p0 + 3.0 * p1 - 3.0 * p2 + p3,
        )
    }

    /// `samples + 1` evenly spaced points from `p1` to `p2`.
    pub fn samples(&self, samples: usize) -> CurveSamples {
        CurveSamples::new(*self, samples)
    }
}

impl Curve for CatmullRomSegment {
    fn point_at(&self, t: f64) -> Point3 {
        let (c0, c1, c2, c3) = self.coefficients();
        0.5 * (c0 + t * (c1 + t * (c2 + t * c3)))
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let (_, c1, c2, c3) = self.coefficients();
        0.5 * (c1 + t * (2.0 * c2 + 3.0 * t * c3))
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// Lazily evaluated samples of a [`CatmullRomSegment`].
#[derive(Debug, Clone)]
pub struct CurveSamples {
    segment: CatmullRomSegment,
    samples: usize,
    next: usize,
}

impl CurveSamples {
    fn new(segment: CatmullRomSegment, samples: usize) -> Self {
        Self {
            segment,
            samples: samples.max(1),
            next: 0,
        }
    }
}

impl Iterator for CurveSamples {
    type Item = Point3;

    fn next(&mut self) -> Option<Point3> {
        if self.next > self.samples {
            return None;
        }
        let t = self.next as f64 / self.samples as f64;
        self.next += 1;
        Some(self.segment.point_at(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.samples + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurveSamples {}

impl FusedIterator for CurveSamples {}

/// Sample the segment through `p1` and `p2` of the window `(p0, p1, p2, p3)`.
///
/// Yields `sample_count + 1` points for `t = i / sample_count`. A sample count
/// of zero is treated as one.
pub fn evaluate_curve(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    sample_count: usize,
) -> CurveSamples {
    CatmullRomSegment::new(p0, p1, p2, p3).samples(sample_count)
}
