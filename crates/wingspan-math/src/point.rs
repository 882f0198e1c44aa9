//! Control points with an authored rest pose and a derived current pose.

use crate::transform::{Axis, Motion, Transform};
use crate::{Point3, Vector3};

/// A point that is animated by re-deriving its position from an immutable
/// rest pose every frame.
///
/// Every mutator overwrites `current` from `rest`; nothing accumulates across
/// calls, so repeated updates with the same parameters always agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedPoint {
    rest: Point3,
    current: Point3,
}

impl AnimatedPoint {
    pub fn new(rest: Point3) -> Self {
        Self {
            rest,
            current: rest,
        }
    }

    pub fn rest(&self) -> Point3 {
        self.rest
    }

    pub fn current(&self) -> Point3 {
        self.current
    }

    /// Put the point back at its rest pose.
    pub fn reset(&mut self) {
        self.current = self.rest;
    }

    /// `current = rest + offset`.
    pub fn translate(&mut self, offset: Vector3) {
        self.current = self.rest + offset;
    }

    /// Rotate the rest pose by `degrees` about the `axis`-parallel line
    /// through `pivot`.
    pub fn rotate_axis(&mut self, axis: Axis, degrees: f64, pivot: Point3) {
        self.current = Transform::rotation_about(axis, degrees, pivot).transform_point(self.rest);
    }

    pub fn apply(&mut self, motion: &Motion) {
        match *motion {
            Motion::Translate { offset } => self.translate(offset),
            Motion::Rotate { axis, degrees, pivot } => self.rotate_axis(axis, degrees, pivot),
        }
    }
}

impl From<Point3> for AnimatedPoint {
    fn from(rest: Point3) -> Self {
        Self::new(rest)
    }
}
