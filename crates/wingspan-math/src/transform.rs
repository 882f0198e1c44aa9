use crate::{DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Coordinate axis a rotation is taken about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rigid body transform (rotation + translation, no shear/scale).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    /// Right-handed rotation of `degrees` about `axis`, through the origin.
    pub fn from_rotation(axis: Axis, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        let m = match axis {
            Axis::X => DMat4::from_rotation_x(radians),
            Axis::Y => DMat4::from_rotation_y(radians),
            Axis::Z => DMat4::from_rotation_z(radians),
        };
        Self::from_mat4(m)
    }

    /// Rotation of `degrees` about the line through `pivot` parallel to `axis`.
    pub fn rotation_about(axis: Axis, degrees: f64, pivot: Point3) -> Self {
        Self::from_translation(-pivot)
            .then(&Self::from_rotation(axis, degrees))
            .then(&Self::from_translation(pivot))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    /// Apply `self` first, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }
}


/// A per-frame displacement of a single point away from its rest pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Translate { offset: Vector3 },
    Rotate { axis: Axis, degrees: f64, pivot: Point3 },
}

impl Motion {
    pub fn to_transform(&self) -> Transform {
        match *self {
            Motion::Translate { offset } => Transform::from_translation(offset),
            Motion::Rotate { axis, degrees, pivot } => {
                Transform::rotation_about(axis, degrees, pivot)
            }
        }
    }
}
