//! Origin-centred sphere with +Y as its polar axis.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};
use wingspan_math::{Point3, Vector3};

use super::Surface;

/// A sphere parameterized by longitude `u` in `[-PI, PI]` and latitude `v` in
/// `[-PI/2, PI/2]`.
///
/// `P(u, v) = radius * (cos(v)*cos(u), sin(v), -cos(v)*sin(u))`
///
/// Latitude `-PI/2` is the south pole `(0, -radius, 0)`. Longitudes `-PI` and
/// `PI` describe the same meridian, on the -X side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SphericalSurface {
    pub radius: f64,
}

impl SphericalSurface {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    fn direction(u: f64, v: f64) -> Vector3 {
        let xz = v.cos();
        Vector3::new(xz * u.cos(), v.sin(), -xz * u.sin())
    }
}

impl Surface for SphericalSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.radius * Self::direction(u, v)
    }

    /// Unit radial direction. Independent of the radius, so it stays finite
    /// for a zero-radius sphere.
    fn normal_at(&self, u: f64, v: f64) -> Vector3 {
        Self::direction(u, v)
    }

    fn domain_u(&self) -> (f64, f64) {
        (-PI, PI)
    }

    fn domain_v(&self) -> (f64, f64) {
        (-FRAC_PI_2, FRAC_PI_2)
    }
}
