//! Authored control polygons drawn as chains of four-point segments.

use wingspan_core::{Result, WingspanError};
use wingspan_math::{AnimatedPoint, Color, Point3};

use super::catmull_rom::CatmullRomSegment;
use crate::sink::{Topology, VertexSink};

const GUIDE_COLOR: Color = [1.0, 1.0, 1.0];

/// A named, flat-colored contour made of animated control points.
///
/// The contour is drawn by evaluating each four-point window as a
/// [`CatmullRomSegment`]. Unless windows are authored explicitly, every cyclic
/// window `(p[i], p[i+1], p[i+2], p[i+3])` (indices mod n) is used.
#[derive(Debug, Clone)]
pub struct ControlCurve {
    name: String,
    color: Color,
    points: Vec<AnimatedPoint>,
    windows: Vec<[usize; 4]>,
}

impl ControlCurve {
    /// Minimum number of control points in a well-formed curve.
    pub const MIN_POINTS: usize = 4;

    pub fn new(name: impl Into<String>, color: Color, rest: impl IntoIterator<Item = Point3>) -> Self {
        let points: Vec<AnimatedPoint> = rest.into_iter().map(AnimatedPoint::new).collect();
        let windows = Self::cyclic_windows(points.len());
        Self {
            name: name.into(),
            color,
            points,
            windows,
        }
    }

    /// Replace the cyclic windows with an authored list.
    pub fn with_windows(mut self, windows: Vec<[usize; 4]>) -> Result<Self> {
        let n = self.points.len();
        if let Some(bad) = windows.iter().find(|w| w.iter().any(|&i| i >= n)) {
            return Err(WingspanError::InvalidScene(format!(
                "curve '{}': window {:?} refers past its {} points",
                self.name, bad, n
            )));
        }
        self.windows = windows;
        Ok(self)
    }

    /// Every cyclic four-point window over `n` points.
    pub fn cyclic_windows(n: usize) -> Vec<[usize; 4]> {
        (0..n)
            .map(|i| [i, (i + 1) % n, (i + 2) % n, (i + 3) % n])
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn points(&self) -> &[AnimatedPoint] {
        &self.points
    }

    pub fn point_mut(&mut self, index: usize) -> Option<&mut AnimatedPoint> {
        self.points.get_mut(index)
    }

    pub fn windows(&self) -> &[[usize; 4]] {
        &self.windows
    }

    /// Return every point to its rest pose.
    pub fn reset(&mut self) {
        self.points.iter_mut().for_each(AnimatedPoint::reset);
    }

    /// Current positions of the four points of `window`.
    pub fn window_points(&self, window: [usize; 4]) -> [Point3; 4] {
        window.map(|i| self.points[i].current())
    }

    /// One segment per window, built from the current pose.
    pub fn segments(&self) -> impl Iterator<Item = CatmullRomSegment> + '_ {
        self.windows
            .iter()
            .map(|&w| CatmullRomSegment::from_window(self.window_points(w)))
    }

    /// Emit one line strip of `samples + 1` points per window.
    pub fn draw(&self, samples: usize, sink: &mut dyn VertexSink) {
        sink.color(self.color);
        for segment in self.segments() {
            sink.begin_group(Topology::LineStrip);
            for p in segment.samples(samples) {
                sink.vertex(p);
            }
            sink.end_group();
        }
    }

    /// Emit the four control points of each window as a line strip.
    pub fn draw_control_polygon(&self, sink: &mut dyn VertexSink) {
        sink.color(GUIDE_COLOR);
        for &window in &self.windows {
            sink.begin_group(Topology::LineStrip);
            for p in self.window_points(window) {
                sink.vertex(p);
            }
            sink.end_group();
        }
    }

    /// Emit every control point once, as a single point group.
    pub fn draw_control_points(&self, sink: &mut dyn VertexSink) {
        sink.color(GUIDE_COLOR);
        sink.begin_group(Topology::Points);
        for p in &self.points {
            sink.vertex(p.current());
        }
        sink.end_group();
    }
}
