//! Straight 3D segments and horizontal cut planes.

use super::{Point3, Vector3, EPSILON};
use serde::{Deserialize, Serialize};

/// An ordered straight segment from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    p1: Point3,
    p2: Point3,
}

impl Line {
    pub fn new(p1: Point3, p2: Point3) -> Self {
        Self { p1, p2 }
    }

    pub fn p1(&self) -> Point3 {
        self.p1
    }

    pub fn p2(&self) -> Point3 {
        self.p2
    }

    /// Vector from `p1` to `p2`.
    pub fn vector(&self) -> Vector3 {
        self.p2 - self.p1
    }

    /// Unit direction, or the zero vector for a degenerate line.
    pub fn dir(&self) -> Vector3 {
        let v = self.vector();
        let len = v.norm();
        if len < EPSILON {
            Vector3::zeros()
        } else {
            v / len
        }
    }

    pub fn len(&self) -> f64 {
        self.vector().norm()
    }

    pub fn is_degenerate(&self) -> bool {
        self.len() < EPSILON
    }

    pub fn min_z(&self) -> f64 {
        self.p1.z.min(self.p2.z)
    }

    pub fn max_z(&self) -> f64 {
        self.p1.z.max(self.p2.z)
    }

    /// Point where the line reaches height `z`, by linear interpolation.
    ///
    /// Returns `None` for horizontal lines.
    pub fn point_at_z(&self, z: f64) -> Option<Point3> {
        let dz = self.p2.z - self.p1.z;
        if dz.abs() < f64::EPSILON {
            return None;
        }
        let factor = (z - self.p1.z) / dz;
        Some(self.p1 + self.vector() * factor)
    }
}

/// An infinite plane given by a point and a normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Point3,
    pub normal: Vector3,
}

impl Plane {
    pub fn new(point: Point3, normal: Vector3) -> Self {
        Self { point, normal }
    }

    /// Horizontal plane at height `z`.
    pub fn horizontal(z: f64) -> Self {
        Self::new(Point3::new(0.0, 0.0, z), Vector3::z())
    }

    /// Intersection of the ray `point + t * direction` with the plane.
    ///
    /// Returns the intersection point and the parameter `t`, or `None` when
    /// the direction is parallel to the plane.
    pub fn intersect_point(&self, direction: &Vector3, point: &Point3) -> Option<(Point3, f64)> {
        let denom = self.normal.dot(direction);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = self.normal.dot(&(self.point - *point)) / denom;
        Some((*point + *direction * t, t))
    }

    /// Intersection of `line` (extended infinitely) with the plane.
    pub fn intersect_line(&self, line: &Line) -> Option<Point3> {
        self.intersect_point(&line.dir(), &line.p1())
            .map(|(point, _)| point)
    }
}
