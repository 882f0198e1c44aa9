pub mod aabb;
pub mod point;
pub mod transform;

pub use glam::{DMat4, DVec2, DVec3};
pub use aabb::Aabb3;
pub use point::AnimatedPoint;
pub use transform::{Axis, Motion, Transform};

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;

/// Flat RGB color with components in `[0, 1]`.
pub type Color = [f32; 3];
