//! Wavefront OBJ export of a render batch.

use std::io::Write;

use wingspan_core::Result;
use wingspan_mesh::RenderBatch;

/// Triangles become `f v/vt/vn` faces, polylines become `l` elements.
/// Loose points are not written.
pub fn write_obj<W: Write>(batch: &RenderBatch, out: &mut W) -> Result<()> {
    let mesh = &batch.mesh;
    writeln!(out, "# wingspan")?;

    if mesh.triangle_count() > 0 {
        writeln!(out, "o mesh")?;
        for p in &mesh.positions {
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for uv in &mesh.uvs {
            writeln!(out, "vt {} {}", uv.x, uv.y)?;
        }
        for n in &mesh.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        let has_uvs = mesh.uvs.len() == mesh.positions.len();
        let has_normals = mesh.normals.len() == mesh.positions.len();
        let corner = |i: u32| match (has_uvs, has_normals) {
            (true, true) => format!("{i}/{i}/{i}"),
            (true, false) => format!("{i}/{i}"),
            (false, true) => format!("{i}//{i}"),
            (false, false) => i.to_string(),
        };
        for tri in mesh.triangles() {
            let [a, b, c] = tri.map(|i| corner(i + 1));
            writeln!(out, "f {a} {b} {c}")?;
        }
    }

    let mut next = mesh.positions.len() + 1;
    for (i, line) in batch.polylines.iter().enumerate() {
        if line.points.len() < 2 {
            continue;
        }
        writeln!(out, "o curve{i}")?;
        for p in &line.points {
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
        let indices: Vec<String> = (next..next + line.points.len()).map(|i| i.to_string()).collect();
        writeln!(out, "l {}", indices.join(" "))?;
        next += line.points.len();
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wingspan_geometry::{Topology, VertexSink};
    use wingspan_math::{Point2, Point3, Vector3};
    use wingspan_mesh::MeshSink;

    fn export(batch: &RenderBatch) -> String {
        let mut buf = Vec::new();
        write_obj(batch, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_faces_and_lines_are_one_based() {
        let mut sink = MeshSink::new();
        sink.begin_group(Topology::TriangleStrip);
        for p in [Point3::ZERO, Point3::X, Point3::Y, Point3::ONE] {
            sink.normal(Vector3::Z);
            sink.tex_coord(Point2::ZERO);
            sink.vertex(p);
        }
        sink.end_group();
        sink.begin_group(Topology::LineStrip);
        for p in [Point3::ZERO, Point3::Z, Point3::ONE] {
            sink.vertex(p);
        }
        sink.end_group();

        let text = export(&sink.finish());
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces, ["f 1/1/1 2/2/2 3/3/3", "f 3/3/3 2/2/2 4/4/4"]);
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 7);
        assert!(text.lines().any(|l| l == "l 5 6 7"));
    }

    #[test]
    fn test_lines_only() {
        let mut sink = MeshSink::new();
        for _ in 0..2 {
            sink.begin_group(Topology::LineStrip);
            sink.vertex(Point3::ZERO);
            sink.vertex(Point3::X);
            sink.end_group();
        }
        let text = export(&sink.finish());
        assert!(!text.contains("o mesh"));
        assert!(text.lines().any(|l| l == "l 1 2"));
        assert!(text.lines().any(|l| l == "l 3 4"));
    }
}
