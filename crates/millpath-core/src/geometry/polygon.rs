//! Boundary polygons.
//!
//! A polygon is an ordered list of 3D points, either open (a polyline) or
//! closed. Orientation is encoded in the signed XY area: counter-clockwise
//! polygons have a positive area and are treated as outer boundaries,
//! clockwise (or open) polygons have an area of zero or less and are treated
//! as inner boundaries ("holes").
//!
//! Offsetting and point containment are delegated to `cavalier_contours`.

use super::{arc, Line, Point3, EPSILON};
use crate::error::{GeometryError, GeometryResult};
use cavalier_contours::core::math::Vector2;
use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::panic;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonData")]
pub struct Polygon {
    points: Vec<Point3>,
    closed: bool,
}

/// Unchecked serialized form; deserialization goes through [`Polygon::new`].
#[derive(Deserialize)]
struct PolygonData {
    points: Vec<Point3>,
    closed: bool,
}

impl TryFrom<PolygonData> for Polygon {
    type Error = GeometryError;

    fn try_from(data: PolygonData) -> GeometryResult<Self> {
        Polygon::new(data.points, data.closed)
    }
}

impl Polygon {
    /// Creates a polygon from its points.
    ///
    /// For closed polygons a trailing point equal to the first one is
    /// dropped, the closing edge is implicit.
    pub fn new(mut points: Vec<Point3>, closed: bool) -> GeometryResult<Self> {
        if closed && points.len() > 1 {
            let first = points[0];
            if points.last().is_some_and(|last| super::points_close(&first, last)) {
                points.pop();
            }
        }
        let required = if closed { 3 } else { 2 };
        if points.len() < required {
            return Err(GeometryError::TooFewPoints {
                required,
                actual: points.len(),
            });
        }
        Ok(Self { points, closed })
    }

    /// Closed polygon from XY corners at a common height.
    pub fn from_xy(corners: &[(f64, f64)], z: f64) -> GeometryResult<Self> {
        let points = corners
            .iter()
            .map(|&(x, y)| Point3::new(x, y, z))
            .collect();
        Self::new(points, true)
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Signed area of the XY projection; zero for open polygons.
    pub fn area(&self) -> f64 {
        if !self.closed {
            return 0.0;
        }
        let n = self.points.len();
        let mut signed_area = 0.0;
        for i in 0..n {
            let p1 = self.points[i];
            let p2 = self.points[(i + 1) % n];
            signed_area += p1.x * p2.y - p2.x * p1.y;
        }
        signed_area / 2.0
    }

    /// True for outer (counter-clockwise) polygons.
    pub fn is_outer(&self) -> bool {
        self.area() > 0.0
    }

    pub fn min_z(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.z)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_z(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.z)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Edges in traversal order, including the closing edge of a closed
    /// polygon. Zero-length edges are skipped.
    pub fn lines(&self) -> Vec<Line> {
        let n = self.points.len();
        let count = if self.closed { n } else { n - 1 };
        (0..count)
            .map(|i| Line::new(self.points[i], self.points[(i + 1) % n]))
            .filter(|line| !line.is_degenerate())
            .collect()
    }

    /// Reverse the traversal direction in place.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Copy with reversed traversal direction.
    pub fn reversed(&self) -> Self {
        let mut copy = self.clone();
        copy.reverse();
        copy
    }

    /// Offset polygons at `distance`.
    ///
    /// A positive distance moves the boundary to the right of its traversal
    /// direction: outer polygons grow, holes shrink. A negative distance
    /// does the opposite. The result may contain several polygons (when a
    /// shape splits) or none at all (when it collapses). Arcs produced at
    /// rounded corners are flattened to chords. Open polygons have no offset.
    /// All resulting points lie at the polygon's minimum height.
    pub fn offset(&self, distance: f64) -> Vec<Polygon> {
        if !self.closed || distance.abs() < EPSILON {
            return Vec::new();
        }
        let z = self.min_z();
        let pline = self.to_polyline();

        // cavalier offsets to the left for positive values
        let offset_res =
            panic::catch_unwind(panic::AssertUnwindSafe(|| pline.parallel_offset(-distance)));

        match offset_res {
            Ok(offsets) => offsets
                .iter()
                .filter_map(|offset| polyline_to_polygon(offset, z))
                .collect(),
            Err(_) => {
                warn!("Panic during parallel offset of polygon at Z={}", z);
                Vec::new()
            }
        }
    }

    /// True if every point of `other` lies inside this polygon's XY area.
    ///
    /// Always false for open polygons.
    pub fn contains(&self, other: &Polygon) -> bool {
        if !self.closed {
            return false;
        }
        let pline = self.to_polyline();
        other
            .points
            .iter()
            .all(|p| pline.winding_number(Vector2::new(p.x, p.y)) != 0)
    }

    /// Convert to a closed cavalier polyline in the XY plane.
    pub fn to_polyline(&self) -> Polyline<f64> {
        let mut polyline = Polyline::new();
        for p in &self.points {
            polyline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
        }
        polyline.set_is_closed(self.closed);
        polyline
    }

    /// Convert a closed cavalier polyline back into a polygon at height `z`.
    ///
    /// Bulge (arc) vertices are flattened into chords. Returns `None` when
    /// fewer than three distinct points remain.
    pub fn from_polyline(polyline: &Polyline<f64>, z: f64) -> Option<Self> {
        polyline_to_polygon(polyline, z)
    }
}

fn polyline_to_polygon(pline: &Polyline<f64>, z: f64) -> Option<Polygon> {
    let count = pline.vertex_data.len();
    if count < 2 {
        return None;
    }
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let v1 = pline.vertex_data[i];
        let v2 = pline.vertex_data[(i + 1) % count];
        points.push(Point3::new(v1.x, v1.y, z));
        if v1.bulge.abs() > 1e-5 && (pline.is_closed() || i + 1 < count) {
            points.extend(flatten_bulge(&v1, &v2, z));
        }
    }
    Polygon::new(points, true).ok()
}

/// Interior chord points of the arc segment starting at `v1`.
fn flatten_bulge(v1: &PlineVertex<f64>, v2: &PlineVertex<f64>, z: f64) -> Vec<Point3> {
    let dx = v2.x - v1.x;
    let dy = v2.y - v1.y;
    let chord = (dx * dx + dy * dy).sqrt();
    if chord < 1e-5 {
        return Vec::new();
    }
    // signed sweep, positive is counter-clockwise
    let theta = 4.0 * v1.bulge.atan();
    let radius = (chord / (2.0 * (theta / 2.0).sin())).abs();
    let h = chord / (2.0 * (theta / 2.0).tan());
    let cx = (v1.x + v2.x) / 2.0 - dy / chord * h;
    let cy = (v1.y + v2.y) / 2.0 + dx / chord * h;
    let start_angle = (v1.y - cy).atan2(v1.x - cx);

    let segments = ((theta.abs() / (2.0 * PI)) * arc::ARC_CHORDS as f64)
        .ceil()
        .max(2.0) as usize;
    (1..segments)
        .map(|j| {
            let angle = start_angle + theta * j as f64 / segments as f64;
            Point3::new(cx + radius * angle.cos(), cy + radius * angle.sin(), z)
        })
        .collect()
}
