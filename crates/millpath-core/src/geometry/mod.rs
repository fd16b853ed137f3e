//! Geometry primitives for motion generation.
//!
//! Points and vectors are `nalgebra` types; polygon offsetting and winding
//! tests are delegated to `cavalier_contours`.

pub mod arc;
pub mod bounds;
pub mod line;
pub mod polygon;

pub use arc::{arc_points, ARC_CHORDS};
pub use bounds::BoundingBox;
pub use line::{Line, Plane};
pub use polygon::Polygon;

/// Point type used throughout the crate.
pub type Point3 = nalgebra::Point3<f64>;

/// Vector type used throughout the crate.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Tolerance for coordinate comparisons.
pub const EPSILON: f64 = 1e-5;

/// Copy of `point` moved onto the horizontal plane at `z`.
pub fn project_z(point: &Point3, z: f64) -> Point3 {
    Point3::new(point.x, point.y, z)
}

/// Compare two points within [`EPSILON`] on every axis.
pub fn points_close(a: &Point3, b: &Point3) -> bool {
    (a - b).iter().all(|d| d.abs() < EPSILON)
}
