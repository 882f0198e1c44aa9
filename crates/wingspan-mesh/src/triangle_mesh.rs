use std::collections::HashMap;

use wingspan_core::traits::BoundingBox;
use wingspan_core::Tolerance;
use wingspan_math::aabb::Aabb3;
use wingspan_math::{Point2, Point3, Vector3};

/// Indexed triangle mesh with per-vertex attributes.
///
/// `normals` and `uvs` are either empty or the same length as `positions`.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Point2>,
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Area-weighted smooth normals; vertices touched by no triangle get a zero normal.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vector3::ZERO; self.positions.len()];
        for [a, b, c] in self.triangles() {
            let [pa, pb, pc] = [a, b, c].map(|i| self.positions[i as usize]);
            let face = (pb - pa).cross(pc - pa);
            for i in [a, b, c] {
                normals[i as usize] += face;
            }
        }
        self.normals = normals
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vector3::ZERO))
            .collect();
    }

    /// Positions-only copy with coincident vertices merged and the
    /// triangles that collapse under the merge dropped.
    pub fn weld(&self, tolerance: Tolerance) -> TriangleMesh {
        let mut lookup: HashMap<(i64, i64, i64), u32> = HashMap::new();
        let mut positions = Vec::new();
        let remap: Vec<u32> = self
            .positions
            .iter()
            .map(|p| {
                let key = (
                    tolerance.quantize(p.x),
                    tolerance.quantize(p.y),
                    tolerance.quantize(p.z),
                );
                *lookup.entry(key).or_insert_with(|| {
                    positions.push(*p);
                    (positions.len() - 1) as u32
                })
            })
            .collect();

        let mut indices = Vec::with_capacity(self.indices.len());
        for [a, b, c] in self.triangles() {
            let (a, b, c) = (remap[a as usize], remap[b as usize], remap[c as usize]);
            if a != b && b != c && a != c {
                indices.extend_from_slice(&[a, b, c]);
            }
        }

        log::debug!(
            "welded {} -> {} vertices, {} -> {} triangles",
            self.positions.len(),
            positions.len(),
            self.triangle_count(),
            indices.len() / 3
        );

        TriangleMesh {
            positions,
            normals: Vec::new(),
            indices,
            uvs: Vec::new(),
        }
    }

    /// Use count of every undirected edge.
    fn edge_uses(&self) -> HashMap<(u32, u32), usize> {
        let mut uses = HashMap::new();
        for [a, b, c] in self.triangles() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *uses.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            }
        }
        uses
    }

    /// Number of edges used by exactly one triangle.
    pub fn open_edge_count(&self) -> usize {
        self.edge_uses().values().filter(|&&n| n == 1).count()
    }

    /// Whether every edge is shared by exactly two triangles.
    ///
    /// Only meaningful on a welded mesh; strips that duplicate seam vertices
    /// are never closed before welding.
    pub fn is_closed(&self) -> bool {
        let uses = self.edge_uses();
        !uses.is_empty() && uses.values().all(|&n| n == 2)
    }

    pub fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(self.positions.iter().copied())
    }
}

impl BoundingBox for TriangleMesh {
    type Point = Point3;

    fn bounding_box(&self) -> Option<(Point3, Point3)> {
        self.bounds().map(|b| (b.min, b.max))
    }
}
