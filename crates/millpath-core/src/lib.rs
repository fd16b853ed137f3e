//! # MillPath Core
//!
//! Core types shared by the MillPath motion generators:
//! - [`error`]: `thiserror`-based error types
//! - [`geometry`]: points, lines, planes, polygons, bounding boxes and arcs
//! - [`types`]: progress and cancellation callbacks

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{
    GeometryError, GeometryResult, MotionError, MotionResult, ParameterError, ParameterResult,
};

pub use geometry::{
    arc_points, project_z, BoundingBox, Line, Plane, Point3, Polygon, Vector3, EPSILON,
};

pub use types::{poll, CancelAfter, Progress, ProgressCallback};
