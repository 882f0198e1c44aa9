//! Interleaved vertex layouts for upload to a GPU buffer.

use bytemuck::{Pod, Zeroable};
use wingspan_math::{Color, Point3};

use crate::triangle_mesh::TriangleMesh;

/// Position, normal and texture coordinate, 32 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Position and flat color for line and point rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub fn new(position: Point3, color: Color) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            color,
        }
    }
}

impl TriangleMesh {
    /// Interleave positions with normals and uvs; absent attributes are zero.
    pub fn to_gpu_vertices(&self) -> Vec<GpuVertex> {
        (0..self.positions.len())
            .map(|i| GpuVertex {
                position: self.positions[i].as_vec3().to_array(),
                normal: self
                    .normals
                    .get(i)
                    .map_or([0.0; 3], |n| n.as_vec3().to_array()),
                uv: self.uvs.get(i).map_or([0.0; 2], |uv| uv.as_vec2().to_array()),
            })
            .collect()
    }
}

/// View a vertex slice as raw bytes.
pub fn as_bytes<T: Pod>(vertices: &[T]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{dvec2, dvec3};

    #[test]
    fn test_vertex_layout_sizes() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 32);
        assert_eq!(std::mem::size_of::<LineVertex>(), 24);
    }

    #[test]
    fn test_to_gpu_vertices() {
        let mesh = TriangleMesh {
            positions: vec![dvec3(1.0, 2.0, 3.0), dvec3(0.0, -1.0, 0.0)],
            normals: vec![dvec3(0.0, 0.0, 1.0), dvec3(0.0, -1.0, 0.0)],
            indices: vec![],
            uvs: vec![dvec2(0.25, 0.75), dvec2(1.0, 0.0)],
        };
        let verts = mesh.to_gpu_vertices();
        assert_eq!(verts.len(), 2);
        assert_eq!(verts[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(verts[0].uv, [0.25, 0.75]);
        assert_eq!(verts[1].normal, [0.0, -1.0, 0.0]);
        assert_eq!(as_bytes(&verts).len(), 64);
    }

    #[test]
    fn test_missing_attributes_zeroed() {
        let mesh = TriangleMesh {
            positions: vec![dvec3(1.0, 0.0, 0.0)],
            ..Default::default()
        };
        let verts = mesh.to_gpu_vertices();
        assert_eq!(verts[0].normal, [0.0; 3]);
        assert_eq!(verts[0].uv, [0.0; 2]);
    }
}
