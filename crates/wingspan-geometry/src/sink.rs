//! Vertex sinks: the seam between geometry generation and rendering.
//!
//! Generators describe geometry as a sequence of groups, each with a
//! [`Topology`]. Inside a group, `normal` and `tex_coord` set attributes that
//! stick to every following `vertex` until changed, the way immediate-mode
//! rendering APIs behave. Attributes do not carry over between groups.

use serde::{Deserialize, Serialize};
use wingspan_math::{Color, Point2, Point3, Vector3};

/// How consecutive vertices of a group are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    Points,
    LineStrip,
    TriangleStrip,
    TriangleFan,
}

impl Topology {
    /// Triangles formed by a group of `len` vertices, as indices into the
    /// group. Odd strip triangles are reordered so every triangle keeps the
    /// winding of the first one.
    pub fn triangles(self, len: usize) -> Vec<[usize; 3]> {
        match self {
            Topology::TriangleStrip => (2..len)
                .map(|i| {
                    if i % 2 == 0 {
                        [i - 2, i - 1, i]
                    } else {
                        [i - 1, i - 2, i]
                    }
                })
                .collect(),
            Topology::TriangleFan => (2..len).map(|i| [0, i - 1, i]).collect(),
            Topology::Points | Topology::LineStrip => Vec::new(),
        }
    }
}

/// Consumer of generated vertex streams.
pub trait VertexSink {
    fn begin_group(&mut self, topology: Topology);

    fn end_group(&mut self);

    /// Flat color for the groups that follow.
    fn color(&mut self, _color: Color) {}

    fn normal(&mut self, normal: Vector3);

    fn tex_coord(&mut self, st: Point2);

    fn vertex(&mut self, position: Point3);
}

/// A vertex captured by [`StreamRecorder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedVertex {
    pub position: Point3,
    pub normal: Option<Vector3>,
    pub tex_coord: Option<Point2>,
}

/// One `begin_group` .. `end_group` span captured by [`StreamRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedGroup {
    pub topology: Topology,
    pub color: Option<Color>,
    pub vertices: Vec<RecordedVertex>,
}

impl RecordedGroup {
    pub fn triangles(&self) -> impl Iterator<Item = [&RecordedVertex; 3]> + '_ {
        self.topology
            .triangles(self.vertices.len())
            .into_iter()
            .map(|[a, b, c]| [&self.vertices[a], &self.vertices[b], &self.vertices[c]])
    }
}

/// Sink that records the stream verbatim, group boundaries included.
#[derive(Debug, Default)]
pub struct StreamRecorder {
    groups: Vec<RecordedGroup>,
    open: Option<RecordedGroup>,
    color: Option<Color>,
    normal: Option<Vector3>,
    tex_coord: Option<Point2>,
}

impl StreamRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed groups, in emission order.
    pub fn groups(&self) -> &[RecordedGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<RecordedGroup> {
        self.groups
    }

    pub fn vertices(&self) -> impl Iterator<Item = &RecordedVertex> + '_ {
        self.groups.iter().flat_map(|g| g.vertices.iter())
    }

    pub fn vertex_count(&self) -> usize {
        self.groups.iter().map(|g| g.vertices.len()).sum()
    }
}

impl VertexSink for StreamRecorder {
    fn begin_group(&mut self, topology: Topology) {
        if self.open.is_some() {
            log::warn!("begin_group({topology:?}) while a group is open; closing it");
            self.end_group();
        }
        self.normal = None;
        self.tex_coord = None;
        self.open = Some(RecordedGroup {
            topology,
            color: self.color,
            vertices: Vec::new(),
        });
    }

    fn end_group(&mut self) {
        match self.open.take() {
            Some(group) => self.groups.push(group),
            None => log::warn!("end_group without a matching begin_group"),
        }
    }

    fn color(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn normal(&mut self, normal: Vector3) {
        self.normal = Some(normal);
    }

    fn tex_coord(&mut self, st: Point2) {
        self.tex_coord = Some(st);
    }

    fn vertex(&mut self, position: Point3) {
        let vertex = RecordedVertex {
            position,
            normal: self.normal,
            tex_coord: self.tex_coord,
        };
        match self.open.as_mut() {
            Some(group) => group.vertices.push(vertex),
            None => log::warn!("vertex {position} emitted outside a group; dropped"),
        }
    }
}
