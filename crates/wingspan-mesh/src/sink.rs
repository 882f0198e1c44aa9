//! Renderer-side [`VertexSink`] that assembles vertex streams into buffers.

use wingspan_geometry::{Topology, VertexSink};
use wingspan_math::{Color, Point2, Point3, Vector3};

use crate::gpu::LineVertex;
use crate::triangle_mesh::TriangleMesh;

const DEFAULT_COLOR: Color = [1.0, 1.0, 1.0];

/// A line strip with its flat color.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub color: Color,
    pub points: Vec<Point3>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredPoint {
    pub position: Point3,
    pub color: Color,
}

/// Everything a [`MeshSink`] collected, ready for upload.
#[derive(Debug, Clone, Default)]
pub struct RenderBatch {
    pub mesh: TriangleMesh,
    pub polylines: Vec<Polyline>,
    pub points: Vec<ColoredPoint>,
}

impl RenderBatch {
    /// Line strips flattened to a line-list vertex buffer.
    pub fn line_list(&self) -> Vec<LineVertex> {
        self.polylines
            .iter()
            .flat_map(|line| {
                line.points
                    .windows(2)
                    .flat_map(move |seg| [LineVertex::new(seg[0], line.color), LineVertex::new(seg[1], line.color)])
            })
            .collect()
    }
}

#[derive(Debug)]
struct OpenGroup {
    topology: Topology,
    positions: Vec<Point3>,
    normals: Vec<Option<Vector3>>,
    uvs: Vec<Point2>,
}

/// Turns strips and fans into an indexed [`TriangleMesh`], line strips into
/// [`Polyline`]s and point groups into [`ColoredPoint`]s.
///
/// Triangle vertices are not shared between groups; call
/// [`TriangleMesh::weld`] when connectivity matters. Vertices emitted without a
/// normal get smooth normals computed in [`finish`](Self::finish).
#[derive(Debug)]
pub struct MeshSink {
    batch: RenderBatch,
    open: Option<OpenGroup>,
    color: Color,
    normal: Option<Vector3>,
    tex_coord: Point2,
    missing_normals: bool,
}

impl Default for MeshSink {
    fn default() -> Self {
        Self {
            batch: RenderBatch::default(),
            open: None,
            color: DEFAULT_COLOR,
            normal: None,
            tex_coord: Point2::ZERO,
            missing_normals: false,
        }
    }
}

impl MeshSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(mut self) -> RenderBatch {
        if self.open.is_some() {
            log::warn!("finishing with an unterminated group; closing it");
            self.end_group();
        }
        if self.missing_normals {
            log::debug!("computing normals for {} vertices", self.batch.mesh.vertex_count());
            self.batch.mesh.compute_normals();
        }
        self.batch
    }

    fn flush_triangles(&mut self, group: OpenGroup) {
        let mesh = &mut self.batch.mesh;
        let base = mesh.positions.len() as u32;
        let triangles = group.topology.triangles(group.positions.len());

        if group.normals.iter().any(Option::is_none) {
            self.missing_normals = true;
        }
        mesh.positions.extend(group.positions);
        mesh.normals
            .extend(group.normals.into_iter().map(|n| n.unwrap_or(Vector3::ZERO)));
        mesh.uvs.extend(group.uvs);
        for [a, b, c] in triangles {
            mesh.indices
                .extend([base + a as u32, base + b as u32, base + c as u32]);
        }
    }
}

impl VertexSink for MeshSink {
    fn begin_group(&mut self, topology: Topology) {
        if self.open.is_some() {
            log::warn!("begin_group({topology:?}) while a group is open; closing it");
            self.end_group();
        }
        self.normal = None;
        self.tex_coord = Point2::ZERO;
        self.open = Some(OpenGroup {
            topology,
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
        });
    }

    fn end_group(&mut self) {
        let Some(group) = self.open.take() else {
            log::warn!("end_group without a matching begin_group");
            return;
        };
        match group.topology {
            Topology::TriangleStrip | Topology::TriangleFan => self.flush_triangles(group),
            Topology::LineStrip => self.batch.polylines.push(Polyline {
                color: self.color,
                points: group.positions,
            }),
            Topology::Points => {
                let color = self.color;
                self.batch.points.extend(
                    group
                        .positions
                        .into_iter()
                        .map(|position| ColoredPoint { position, color }),
                );
            }
        }
    }

    fn color(&mut self, color: Color) {
        self.color = color;
    }

    fn normal(&mut self, normal: Vector3) {
        self.normal = Some(normal);
    }

    fn tex_coord(&mut self, st: Point2) {
        self.tex_coord = st;
    }

    fn vertex(&mut self, position: Point3) {
        match self.open.as_mut() {
            Some(group) => {
                group.positions.push(position);
                group.normals.push(self.normal);
                group.uvs.push(self.tex_coord);
            }
            None => log::warn!("vertex {position} emitted outside a group; dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::{dvec2, dvec3};

    #[test]
    fn test_strip_becomes_indexed_triangles() {
        let mut sink = MeshSink::new();
        sink.begin_group(Topology::TriangleStrip);
        for (i, p) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)].iter().enumerate() {
            sink.normal(Vector3::Z);
            sink.tex_coord(dvec2(i as f64, 0.0));
            sink.vertex(dvec3(p.0, p.1, 0.0));
        }
        sink.end_group();
        let batch = sink.finish();

        assert_eq!(batch.mesh.vertex_count(), 4);
        assert_eq!(batch.mesh.indices, vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(batch.mesh.uvs[3], dvec2(3.0, 0.0));
        assert!(batch.mesh.normals.iter().all(|&n| n == Vector3::Z));
    }

    #[test]
    fn test_second_group_indices_are_offset() {
        let mut sink = MeshSink::new();
        for _ in 0..2 {
            sink.begin_group(Topology::TriangleFan);
            sink.normal(Vector3::Y);
            for p in [dvec3(0.0, 0.0, 0.0), dvec3(1.0, 0.0, 0.0), dvec3(1.0, 0.0, -1.0)] {
                sink.vertex(p);
            }
            sink.end_group();
        }
        let batch = sink.finish();
        assert_eq!(batch.mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_missing_normals_are_computed() {
        let mut sink = MeshSink::new();
        sink.begin_group(Topology::TriangleFan);
        sink.vertex(dvec3(0.0, 0.0, 0.0));
        sink.vertex(dvec3(1.0, 0.0, 0.0));
        sink.vertex(dvec3(0.0, 1.0, 0.0));
        sink.end_group();
        let batch = sink.finish();
        for n in &batch.mesh.normals {
            assert_abs_diff_eq!(*n, Vector3::Z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lines_and_points_keep_color() {
        let mut sink = MeshSink::new();
        sink.color([1.0, 0.5, 0.0]);
        sink.begin_group(Topology::LineStrip);
        sink.vertex(dvec3(0.0, 0.0, 0.0));
        sink.vertex(dvec3(1.0, 0.0, 0.0));
        sink.vertex(dvec3(1.0, 1.0, 0.0));
        sink.end_group();
        sink.color([1.0, 1.0, 1.0]);
        sink.begin_group(Topology::Points);
        sink.vertex(dvec3(2.0, 0.0, 0.0));
        sink.end_group();
        let batch = sink.finish();

        assert_eq!(batch.polylines.len(), 1);
        assert_eq!(batch.polylines[0].color, [1.0, 0.5, 0.0]);
        assert_eq!(batch.points, vec![ColoredPoint { position: dvec3(2.0, 0.0, 0.0), color: [1.0, 1.0, 1.0] }]);
        assert_eq!(batch.mesh.vertex_count(), 0);

        let lines = batch.line_list();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(lines[2].position, [1.0, 0.0, 0.0]);
    }
}
