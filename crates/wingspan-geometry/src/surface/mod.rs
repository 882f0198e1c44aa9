//! Surface traits and implementations.

mod spherical;

use wingspan_math::{Point2, Point3, Vector3};

pub use spherical::SphericalSurface;

/// Trait for parametric surfaces in 3D space.
pub trait Surface {
    /// Evaluate the surface at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Evaluate the surface normal at parameters `(u, v)`.
    fn normal_at(&self, u: f64, v: f64) -> Vector3;

    /// Return the u-parameter domain `(u_min, u_max)`.
    fn domain_u(&self) -> (f64, f64);

    /// Return the v-parameter domain `(v_min, v_max)`.
    fn domain_v(&self) -> (f64, f64);

    /// Texture coordinate at `(u, v)`: the parameters rescaled to the unit square.
    fn tex_coord_at(&self, u: f64, v: f64) -> Point2 {
        let (u0, u1) = self.domain_u();
        let (v0, v1) = self.domain_v();
        Point2::new((u - u0) / (u1 - u0), (v - v0) / (v1 - v0))
    }
}
