//! Latitude/longitude sphere tessellation streamed as triangle strips.
//!
//! The grid runs from the south pole ring (`ilat = 0`) to the north pole ring
//! (`ilat = stacks - 1`), and from longitude `-PI` (`ilng = 0`) to `PI`
//! (`ilng = slices - 1`). The first and last longitude columns share positions
//! but carry texture coordinates `s = 0` and `s = 1`, so the texture seam is
//! not smeared across a single triangle.
//!
//! The pole rings themselves are never drawn. Instead a synthetic pole vertex,
//! with `s` following the longitude being emitted, is stitched to the ring
//! next to it.

use std::f64::consts::PI;

use wingspan_math::{Point2, Point3, Vector3};

use crate::sink::{Topology, VertexSink};
use crate::surface::{SphericalSurface, Surface};

/// Lower bound applied to both slices and stacks.
pub const MIN_RESOLUTION: usize = 3;

/// A tessellated sphere vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub position: Point3,
    pub normal: Vector3,
    pub tex_coord: Point2,
}

impl SurfacePoint {
    pub fn emit(&self, sink: &mut dyn VertexSink) {
        sink.normal(self.normal);
        sink.tex_coord(self.tex_coord);
        sink.vertex(self.position);
    }
}

/// The vertex grid of one `(radius, slices, stacks)` sphere.
#[derive(Debug, Clone)]
pub struct SphereGrid {
    surface: SphericalSurface,
    num_lngs: usize,
    num_lats: usize,
    points: Vec<SurfacePoint>,
}

impl SphereGrid {
    /// Build the grid. `slices` and `stacks` below [`MIN_RESOLUTION`] are
    /// raised to it.
    pub fn new(radius: f64, slices: usize, stacks: usize) -> Self {
        let num_lngs = slices.max(MIN_RESOLUTION);
        let num_lats = stacks.max(MIN_RESOLUTION);
        if (num_lngs, num_lats) != (slices, stacks) {
            log::debug!("sphere resolution {slices}x{stacks} raised to {num_lngs}x{num_lats}");
        }

        let surface = SphericalSurface::new(radius);
        let mut grid = Self {
            surface,
            num_lngs,
            num_lats,
            points: Vec::with_capacity(num_lngs * num_lats),
        };
        for ilat in 0..num_lats {
            let lat = grid.latitude(ilat);
            for ilng in 0..num_lngs {
                let lng = grid.longitude(ilng);
                let point = grid.sample(lng, lat);
                grid.points.push(point);
            }
        }
        grid
    }

    pub fn radius(&self) -> f64 {
        self.surface.radius
    }

    pub fn slices(&self) -> usize {
        self.num_lngs
    }

    pub fn stacks(&self) -> usize {
        self.num_lats
    }

    /// Latitude of ring `ilat`: `-PI/2` at the south ring up to `PI/2`.
    pub fn latitude(&self, ilat: usize) -> f64 {
        -PI / 2.0 + PI * ilat as f64 / (self.num_lats - 1) as f64
    }

    /// Longitude of column `ilng`: `-PI` at column 0 up to `PI`.
    pub fn longitude(&self, ilng: usize) -> f64 {
        -PI + 2.0 * PI * ilng as f64 / (self.num_lngs - 1) as f64
    }

    fn sample(&self, lng: f64, lat: f64) -> SurfacePoint {
        SurfacePoint {
            position: self.surface.point_at(lng, lat),
            normal: self.surface.normal_at(lng, lat),
            tex_coord: self.surface.tex_coord_at(lng, lat),
        }
    }

    /// Grid vertex at `(ilat, ilng)`, wrapping out-of-range indices.
    ///
    /// Longitude wraps by whole turns of `slices`, so `-1` is the last column
    /// and `slices` is column 0. Latitude wraps by `stacks - 1`, so the north
    /// ring `stacks - 1` is addressable but `stacks` lands on ring 1.
    pub fn point(&self, ilat: isize, ilng: isize) -> &SurfacePoint {
        let lats = self.num_lats as isize - 1;
        let mut lat = ilat;
        while lat < 0 {
            lat += lats;
        }
        while lat > lats {
            lat -= lats;
        }
        let lng = ilng.rem_euclid(self.num_lngs as isize);
        &self.points[lat as usize * self.num_lngs + lng as usize]
    }

    /// Synthetic north pole vertex carrying the `s` of column `ilng`.
    pub fn north_pole(&self, ilng: usize) -> SurfacePoint {
        self.pole(ilng, 1.0)
    }

    /// Synthetic south pole vertex carrying the `s` of column `ilng`.
    pub fn south_pole(&self, ilng: usize) -> SurfacePoint {
        self.pole(ilng, -1.0)
    }

    fn pole(&self, ilng: usize, sign: f64) -> SurfacePoint {
        let s = (self.longitude(ilng) + PI) / (2.0 * PI);
        SurfacePoint {
            position: Point3::new(0.0, sign * self.radius(), 0.0),
            normal: Vector3::new(0.0, sign, 0.0),
            tex_coord: Point2::new(s, if sign > 0.0 { 1.0 } else { 0.0 }),
        }
    }

    /// Number of triangle strips [`stream`](Self::stream) emits.
    pub fn strip_count(&self) -> usize {
        // two pole strips + bands between rings 1..=stacks-2
        2 + (self.num_lats - 3)
    }

    /// Emit the sphere as triangle strips: the north cap, the south cap, then
    /// one band per pair of neighbouring interior rings.
    pub fn stream(&self, sink: &mut dyn VertexSink) {
        let lngs = self.num_lngs;
        let north_ring = self.num_lats as isize - 2;

        sink.begin_group(Topology::TriangleStrip);
        for ilng in 0..lngs {
            self.north_pole(ilng).emit(sink);
            self.point(north_ring, ilng as isize).emit(sink);
        }
        sink.end_group();

        sink.begin_group(Topology::TriangleStrip);
        for ilng in (0..lngs).rev() {
            self.south_pole(ilng).emit(sink);
            self.point(1, ilng as isize).emit(sink);
        }
        sink.end_group();

        for ilat in 2..self.num_lats as isize - 1 {
            sink.begin_group(Topology::TriangleStrip);
            for ilng in 0..lngs as isize {
                self.point(ilat, ilng).emit(sink);
                self.point(ilat - 1, ilng).emit(sink);
            }
            sink.end_group();
        }
    }
}

/// Tessellate a sphere of `radius` and stream it into `sink`.
///
/// The grid only lives for the duration of the call.
pub fn tessellate_sphere(radius: f64, slices: usize, stacks: usize, sink: &mut dyn VertexSink) {
    let grid = SphereGrid::new(radius, slices, stacks);
    log::debug!(
        "tessellating sphere r={} as {}x{} ({} strips)",
        radius,
        grid.slices(),
        grid.stacks(),
        grid.strip_count()
    );
    grid.stream(sink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::StreamRecorder;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_resolution_clamped() {
        let grid = SphereGrid::new(1.0, 0, 2);
        assert_eq!(grid.slices(), 3);
        assert_eq!(grid.stacks(), 3);
        assert_eq!(grid.strip_count(), 2);
    }

    #[test]
    fn test_grid_extremes() {
        let grid = SphereGrid::new(2.0, 8, 8);
        assert_abs_diff_eq!(grid.point(0, 3).position, Point3::new(0.0, -2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(grid.point(7, 5).position, Point3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(grid.point(3, 0).tex_coord.y, 3.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_seam_columns_coincide() {
        let grid = SphereGrid::new(1.0, 8, 8);
        for ilat in 0..8 {
            let first = grid.point(ilat, 0);
            let last = grid.point(ilat, 7);
            assert_abs_diff_eq!(first.position, last.position, epsilon = 1e-12);
            assert_eq!(first.tex_coord.x, 0.0);
            assert_eq!(last.tex_coord.x, 1.0);
        }
    }

    #[test]
    fn test_longitude_wraps() {
        let grid = SphereGrid::new(1.0, 8, 6);
        for ilat in 0..6 {
            assert_eq!(grid.point(ilat, -1), grid.point(ilat, 7));
            assert_eq!(grid.point(ilat, 8), grid.point(ilat, 0));
        }
    }

    #[test]
    fn test_latitude_wraps_by_stacks_minus_one() {
        let grid = SphereGrid::new(1.0, 8, 6);
        assert_eq!(grid.point(-1, 2), grid.point(4, 2));
        assert_eq!(grid.point(6, 2), grid.point(1, 2));
        // The north ring itself is not wrapped
        assert_abs_diff_eq!(grid.point(5, 2).position.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pole_tex_coords_follow_longitude() {
        let grid = SphereGrid::new(1.0, 5, 4);
        for ilng in 0..5 {
            let n = grid.north_pole(ilng);
            let s = grid.south_pole(ilng);
            assert_abs_diff_eq!(n.tex_coord.x, ilng as f64 / 4.0, epsilon = 1e-12);
            assert_eq!(n.tex_coord.y, 1.0);
            assert_eq!(s.tex_coord.y, 0.0);
            assert_eq!(n.normal, Vector3::Y);
            assert_eq!(s.normal, -Vector3::Y);
        }
    }

    #[test]
    fn test_stream_group_layout() {
        let mut rec = StreamRecorder::new();
        tessellate_sphere(1.0, 8, 8, &mut rec);
        let groups = rec.groups();
        assert_eq!(groups.len(), 7);
        assert!(groups.iter().all(|g| g.topology == Topology::TriangleStrip));
        assert!(groups.iter().all(|g| g.vertices.len() == 16));
    }

    #[test]
    fn test_zero_radius_is_degenerate_not_nan() {
        let mut rec = StreamRecorder::new();
        tessellate_sphere(0.0, 4, 4, &mut rec);
        for v in rec.vertices() {
            assert_eq!(v.position.length(), 0.0);
            assert!(v.normal.unwrap().is_finite());
        }
    }
}
